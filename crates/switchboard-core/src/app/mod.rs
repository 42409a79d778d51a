//! App - アプリケーション層
//!
//! このモジュールは typed / transport を組み合わせて、
//! 生成コードが呼び出すサービス構築部品を提供します。
//!
//! # 主要コンポーネント
//! - **HandlerOption / HandlerConfig**: codec 関数の組み立て
//! - **ServiceRouter**: procedure → Handler の完全一致ルーティング

pub mod option;
pub mod router;

// 主要な型を再エクスポート
pub use self::option::{
    HandlerConfig, HandlerConfigBuilder, HandlerOption, with_decode_request_fn,
    with_encode_error_fn, with_encode_response_fn,
};
pub use self::router::{RouterBuilder, ServiceRouter, not_found};
