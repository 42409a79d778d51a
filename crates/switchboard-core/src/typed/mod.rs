//! Typed - 型付きメッセージと Handler
//!
//! ビジネスロジックは具体的な `Request<T>` / `Response<T>` で書き、
//! ランタイムは型消去されたビューだけを扱います。
//!
//! # 二層構造
//! - **表層（Typed）**: `Request<T>`, `Response<T>`, `UnaryFn<Req, Res>` - 型安全
//! - **内部（Dyn）**: `AnyRequest`, `AnyResponse`, `DynHandler` - object-safe, type erasure

pub mod envelope;
pub mod handler;
pub mod message;
pub mod stream;

// 主要な trait/型 を再エクスポート
pub use self::envelope::{AnyRequest, AnyResponse, Request, Response};
pub use self::handler::{DynHandler, Handler, UnaryFn};
pub use self::message::Message;
pub use self::stream::{BidiStream, ClientStream, ServerStream};
