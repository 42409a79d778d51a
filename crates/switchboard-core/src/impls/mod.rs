//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **json**: serde_json ベースの codec（decode / encode / encode-error）
//!
//! protobuf など他の形式は、同じ関数シグネチャでアプリケーション側に実装します。

pub mod json;
