//! switchboard-core
//!
//! Runtime and schema compiler for Switchboard services.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（descriptor, procedure, errors）
//! - **ports**: codec 関数のシグネチャ
//! - **transport**: CallContext / Transport carrier / ResponseWriter / HandlerConn
//! - **typed**: 型付き envelope、Handler（decode → invoke → encode）、ストリームハンドル
//! - **app**: HandlerOption と ServiceRouter
//! - **impls**: JSON codec
//! - **codegen**: スキーマコンパイラと protoc プラグイン
//! - **observability**: tracing の初期化
//!
//! 生成コードはこのクレートのルートから再エクスポートされた型だけを参照します。

pub mod app;
pub mod codegen;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod transport;
pub mod typed;

// 生成コードが参照するルート
pub use async_trait::async_trait;

pub use app::{HandlerConfig, HandlerOption, ServiceRouter, not_found};
pub use app::{with_decode_request_fn, with_encode_error_fn, with_encode_response_fn};
pub use domain::{CallError, ConfigError, ErrorKind, Procedure, StreamingShape};
pub use transport::{CallContext, ResponseWriter, Transport, transport_from_context};
pub use typed::{BidiStream, ClientStream, Handler, Message, Request, Response, ServerStream};
