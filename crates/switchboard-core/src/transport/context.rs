//! Call context and the transport carrier.
//!
//! `CallContext` is what business logic receives: a cancellation token plus a
//! small typed value map. The raw transport objects of a call are attached to
//! it under a key type private to this module, so nothing else can collide
//! with (or overwrite) them.

use std::sync::Arc;

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::CallError;

/// Per-call execution context.
///
/// Cloning is cheap and clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: CancellationToken,
    values: http::Extensions,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            values: http::Extensions::new(),
        }
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// `Some(Cancelled)` once the call has been cancelled.
    pub fn err(&self) -> Option<CallError> {
        self.is_cancelled().then(CallError::cancelled)
    }

    /// Resolves when the call is cancelled.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    /// Derive a context carrying `value`; `self` is left untouched.
    pub fn with_value<T: Clone + Send + Sync + 'static>(&self, value: T) -> Self {
        let mut values = self.values.clone();
        values.insert(value);
        Self {
            cancel: self.cancel.clone(),
            values,
        }
    }

    pub fn value<T: Clone + Send + Sync + 'static>(&self) -> Option<&T> {
        self.values.get::<T>()
    }
}

/// Raw transport objects of one call.
///
/// The inbound request is shared read-only. Response headers set here are
/// merged into the outcome when the call finishes, whichever outcome it is.
#[derive(Debug)]
pub struct Transport {
    request: Arc<http::Request<Bytes>>,
    response_headers: Mutex<HeaderMap>,
}

impl Transport {
    pub fn new(request: Arc<http::Request<Bytes>>) -> Self {
        Self {
            request,
            response_headers: Mutex::new(HeaderMap::new()),
        }
    }

    pub fn request(&self) -> &http::Request<Bytes> {
        &self.request
    }

    pub fn set_response_header(&self, name: HeaderName, value: HeaderValue) {
        self.response_headers.lock().insert(name, value);
    }

    pub fn append_response_header(&self, name: HeaderName, value: HeaderValue) {
        self.response_headers.lock().append(name, value);
    }

    /// Take the headers collected so far; later calls see only newer ones.
    pub fn take_response_headers(&self) -> HeaderMap {
        std::mem::take(&mut *self.response_headers.lock())
    }
}

#[derive(Clone)]
struct TransportKey(Arc<Transport>);

pub fn new_transport_context(ctx: &CallContext, transport: Arc<Transport>) -> CallContext {
    ctx.with_value(TransportKey(transport))
}

/// `None` when the context was not produced by a dispatching handler.
pub fn transport_from_context(ctx: &CallContext) -> Option<Arc<Transport>> {
    ctx.value::<TransportKey>().map(|key| Arc::clone(&key.0))
}
