//! HandlerConn - 1 回の呼び出しと codec をつなぐ接着剤
//!
//! 受信 payload の decode は 1 回だけ、encode は `ResponseWriter` へ書き出します。

use std::sync::Arc;

use bytes::Bytes;

use crate::app::option::HandlerConfig;
use crate::domain::errors::CallError;
use crate::transport::writer::ResponseWriter;
use crate::typed::message::Message;

pub struct HandlerConn {
    request: Arc<http::Request<Bytes>>,
    writer: ResponseWriter,
    config: Arc<HandlerConfig>,
    received: bool,
}

impl HandlerConn {
    pub fn new(request: Arc<http::Request<Bytes>>, config: Arc<HandlerConfig>) -> Self {
        Self {
            request,
            writer: ResponseWriter::new(),
            config,
            received: false,
        }
    }

    pub fn request(&self) -> &http::Request<Bytes> {
        &self.request
    }

    /// Decode the inbound payload into `target`. Only the first call decodes.
    pub fn receive(&mut self, target: &mut dyn Message) -> Result<(), CallError> {
        if self.received {
            return Err(CallError::internal("request payload already consumed"));
        }
        self.received = true;
        self.config.decode(&self.request, target)
    }

    pub fn send(&mut self, message: &dyn Message) -> Result<(), CallError> {
        self.config.encode(&mut self.writer, &self.request, message)
    }

    /// Replace whatever was buffered with the encoded error and seal the sink.
    pub fn send_error(&mut self, err: &CallError) {
        self.writer.reset();
        self.config.encode_error(&mut self.writer, &self.request, err);
        self.writer.seal();
    }

    pub fn into_writer(mut self) -> ResponseWriter {
        self.writer.seal();
        self.writer
    }
}
