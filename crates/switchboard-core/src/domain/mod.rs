//! Domain model (descriptor, procedure identifiers, errors).
//!
//! ランタイムとコード生成の両方から参照される純粋なデータ型だけを置きます。

pub mod descriptor;
pub mod errors;
pub mod procedure;

pub use self::descriptor::{
    BoundMethod, FileDescriptor, MessageRef, MethodDescriptor, ServiceDescriptor, StreamingShape,
};
pub use self::errors::{CallError, ConfigError, ErrorKind};
pub use self::procedure::Procedure;
