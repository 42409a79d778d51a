//! Ports - 抽象化レイヤー
//!
//! ランタイムが外部（アプリケーション側の codec）に求める関数シグネチャを
//! 定義します。実装は `impls` かアプリケーション側に置きます。

pub mod codec;

pub use self::codec::{DecodeRequestFn, EncodeErrorFn, EncodeResponseFn};
