//! Handler - 型付きビジネスロジックを HTTP から呼べる単位に変換する
//!
//! # 学習ポイント
//! - ジェネリック trait (UnaryFn<Req, Res>)
//! - Object-safe trait (DynHandler)
//! - Type erasure パターン (UnaryHandler<Req, Res, F> → DynHandler)
//!
//! # 呼び出しの流れ
//! 1. キャンセル確認（decode より前に 1 回だけ）
//! 2. `Req::default()` に decode
//! 3. `Request<Req>` を型消去して渡し、downcast で取り戻してビジネスロジックを呼ぶ
//! 4. 成功なら encode、失敗ならどの段階でも encode-error を 1 回だけ

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::future::BoxFuture;
use tracing::{debug, warn};

use super::envelope::{AnyRequest, AnyResponse, Request, Response};
use super::message::Message;
use crate::app::option::{HandlerConfig, HandlerOption};
use crate::domain::errors::{CallError, ConfigError};
use crate::transport::conn::HandlerConn;
use crate::transport::context::{CallContext, Transport, new_transport_context};

/// UnaryFn は unary メソッドのビジネスロジック
///
/// `Fn(CallContext, Request<Req>) -> impl Future<Output = Result<Response<Res>, CallError>>`
/// を満たすクロージャには自動で実装されます。
pub trait UnaryFn<Req, Res>: Send + Sync + 'static {
    fn call(
        &self,
        ctx: CallContext,
        request: Request<Req>,
    ) -> BoxFuture<'static, Result<Response<Res>, CallError>>;
}

impl<Req, Res, F, Fut> UnaryFn<Req, Res> for F
where
    F: Fn(CallContext, Request<Req>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response<Res>, CallError>> + Send + 'static,
{
    fn call(
        &self,
        ctx: CallContext,
        request: Request<Req>,
    ) -> BoxFuture<'static, Result<Response<Res>, CallError>> {
        Box::pin((self)(ctx, request))
    }
}

/// DynHandler は object-safe な handler の抽象化
///
/// `UnaryHandler<Req, Res, F>` を `Arc<dyn DynHandler>` に入れることで、
/// 型の異なる handler を同じルーティング表に並べられます。
#[async_trait]
pub trait DynHandler: Send + Sync {
    async fn handle_dyn(&self, ctx: CallContext, conn: &mut HandlerConn) -> Result<(), CallError>;

    fn procedure(&self) -> &str;
}

struct UnaryHandler<Req, Res, F> {
    procedure: &'static str,
    unary: F,
    _marker: PhantomData<fn(Req) -> Res>,
}

impl<Req, Res, F> UnaryHandler<Req, Res, F>
where
    Req: Message + Default,
    Res: Message,
    F: UnaryFn<Req, Res>,
{
    /// 型消去されたリクエストを受け取る入口
    async fn invoke(
        &self,
        ctx: CallContext,
        request: Box<dyn AnyRequest>,
    ) -> Result<Box<dyn AnyResponse>, CallError> {
        let type_name = request.any().type_name();
        let typed = request
            .into_any()
            .downcast::<Request<Req>>()
            .map_err(|_| {
                CallError::internal(format!("unexpected handler request type {type_name}"))
            })?;
        let response = self.unary.call(ctx, *typed).await?;
        Ok(Box::new(response))
    }
}

#[async_trait]
impl<Req, Res, F> DynHandler for UnaryHandler<Req, Res, F>
where
    Req: Message + Default,
    Res: Message,
    F: UnaryFn<Req, Res>,
{
    async fn handle_dyn(&self, ctx: CallContext, conn: &mut HandlerConn) -> Result<(), CallError> {
        if let Some(err) = ctx.err() {
            return Err(err);
        }

        let mut msg = Req::default();
        conn.receive(&mut msg)?;

        let response = self.invoke(ctx, Box::new(Request::new(msg))).await?;
        conn.send(response.any())
    }

    fn procedure(&self) -> &str {
        self.procedure
    }
}

/// Handler は 1 つの procedure の decode → invoke → encode を担う
///
/// 設定と実装は `Arc` で共有され、`Clone` は安価です。
#[derive(Clone)]
pub struct Handler {
    config: Arc<HandlerConfig>,
    implementation: Arc<dyn DynHandler>,
}

impl Handler {
    /// unary メソッドから Handler を作る
    ///
    /// # 検証
    /// - codec 関数が揃っていなければ `ConfigError::MissingCodec`
    pub fn new<Req, Res, F>(
        procedure: &'static str,
        unary: F,
        options: &[HandlerOption],
    ) -> Result<Self, ConfigError>
    where
        Req: Message + Default,
        Res: Message,
        F: UnaryFn<Req, Res>,
    {
        let config = HandlerConfig::from_options(procedure, options)?;
        Ok(Self {
            config,
            implementation: Arc::new(UnaryHandler {
                procedure,
                unary,
                _marker: PhantomData,
            }),
        })
    }

    pub fn procedure(&self) -> &str {
        self.implementation.procedure()
    }

    /// 1 回の呼び出しを処理し、成功か失敗のどちらか 1 つの結果を返す
    pub async fn serve(
        &self,
        ctx: CallContext,
        request: http::Request<Bytes>,
    ) -> http::Response<Bytes> {
        let request = Arc::new(request);
        let transport = Arc::new(Transport::new(Arc::clone(&request)));
        let ctx = new_transport_context(&ctx, Arc::clone(&transport));

        let mut conn = HandlerConn::new(request, Arc::clone(&self.config));
        match self.implementation.handle_dyn(ctx, &mut conn).await {
            Ok(()) => debug!(procedure = self.procedure(), "call succeeded"),
            Err(err) => {
                warn!(procedure = self.procedure(), kind = %err.kind(), error = %err, "call failed");
                conn.send_error(&err);
            }
        }

        let mut writer = conn.into_writer();
        writer.merge_headers(transport.take_response_headers());
        writer.into_response()
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("procedure", &self.procedure())
            .finish_non_exhaustive()
    }
}
