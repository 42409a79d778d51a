//! Transport - 1 回の HTTP 呼び出しに紐づくもの
//!
//! - **context**: CallContext（キャンセル + 値）と Transport carrier
//! - **writer**: ResponseWriter（結果を 1 つだけ溜める sink）
//! - **conn**: HandlerConn（codec と request/writer をつなぐ）

pub mod conn;
pub mod context;
pub mod writer;

pub use self::conn::HandlerConn;
pub use self::context::{CallContext, Transport, new_transport_context, transport_from_context};
pub use self::writer::ResponseWriter;
