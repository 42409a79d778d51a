//! ServiceRouter - procedure から Handler への完全一致ルーティング
//!
//! # 設計
//! - 構築時（RouterBuilder）だけ可変
//! - 実行時（ServiceRouter）は不変で、ロック不要
//! - 一致しないパスは 404 を返し、codec 関数は一切呼ばない

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::future::BoxFuture;
use http::header::{CONTENT_TYPE, HeaderValue, X_CONTENT_TYPE_OPTIONS};
use http::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::errors::ConfigError;
use crate::transport::context::CallContext;
use crate::typed::handler::Handler;

/// RouterBuilder は ServiceRouter を組み立てる
///
/// # 使用例
/// ```ignore
/// let router = ServiceRouter::builder("/demo.Echo/")
///     .route(ECHO_DO_PROCEDURE, handler)?
///     .build();
/// ```
#[derive(Debug)]
pub struct RouterBuilder {
    prefix: String,
    routes: HashMap<String, Handler>,
}

impl RouterBuilder {
    /// Handler を登録
    ///
    /// `procedure` は Handler 自身の procedure と一致しなければならず、二重登録もエラー。
    pub fn route(mut self, procedure: &str, handler: Handler) -> Result<Self, ConfigError> {
        if handler.procedure() != procedure {
            return Err(ConfigError::ProcedureMismatch {
                path: procedure.to_string(),
                handler: handler.procedure().to_string(),
            });
        }
        if self.routes.contains_key(procedure) {
            return Err(ConfigError::DuplicateProcedure(procedure.to_string()));
        }
        self.routes.insert(procedure.to_string(), handler);
        Ok(self)
    }

    pub fn build(self) -> ServiceRouter {
        debug!(prefix = %self.prefix, routes = self.routes.len(), "service router built");
        ServiceRouter {
            inner: Arc::new(RouterInner {
                prefix: self.prefix,
                routes: self.routes,
            }),
        }
    }
}

#[derive(Debug)]
struct RouterInner {
    prefix: String,
    routes: HashMap<String, Handler>,
}

/// ServiceRouter は 1 サービス分のルーティング表
///
/// `Arc` で共有されるので `Clone` は安価です。
#[derive(Debug, Clone)]
pub struct ServiceRouter {
    inner: Arc<RouterInner>,
}

impl ServiceRouter {
    pub fn builder(prefix: impl Into<String>) -> RouterBuilder {
        RouterBuilder {
            prefix: prefix.into(),
            routes: HashMap::new(),
        }
    }

    /// サービスのワイヤプレフィックス `/<full_name>/`
    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    pub fn len(&self) -> usize {
        self.inner.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.routes.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.inner.routes.contains_key(path)
    }

    /// 登録済み procedure（ソート済み）
    pub fn procedures(&self) -> Vec<&str> {
        let mut procedures: Vec<&str> = self.inner.routes.keys().map(String::as_str).collect();
        procedures.sort_unstable();
        procedures
    }

    /// パスが完全一致する Handler に渡す。なければ 404
    pub async fn handle(
        &self,
        ctx: CallContext,
        request: http::Request<Bytes>,
    ) -> http::Response<Bytes> {
        match self.inner.routes.get(request.uri().path()) {
            Some(handler) => handler.serve(ctx, request).await,
            None => {
                warn!(prefix = %self.inner.prefix, path = request.uri().path(), "no procedure registered for path");
                not_found()
            }
        }
    }
}

/// tower 互換: リクエスト extensions の `CancellationToken` があれば使う
impl tower::Service<http::Request<Bytes>> for ServiceRouter {
    type Response = http::Response<Bytes>;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: http::Request<Bytes>) -> Self::Future {
        let router = self.clone();
        let ctx = match request.extensions().get::<CancellationToken>() {
            Some(token) => CallContext::with_cancellation(token.clone()),
            None => CallContext::new(),
        };
        Box::pin(async move { Ok::<_, Infallible>(router.handle(ctx, request).await) })
    }
}

/// 一致するルートがないときの応答
pub fn not_found() -> http::Response<Bytes> {
    let mut response = http::Response::new(Bytes::from_static(b"404 page not found\n"));
    *response.status_mut() = StatusCode::NOT_FOUND;
    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}
