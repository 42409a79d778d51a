//! Codec port - decode / encode / encode-error の 3 関数
//!
//! 3 つとも独立に差し替え可能です。このレイヤーにはデフォルトがなく、
//! 組み立てるアプリケーションが `app::option` 経由で渡します。
//! JSON 実装は `impls::json` を参照。

use std::sync::Arc;

use bytes::Bytes;

use crate::domain::errors::CallError;
use crate::transport::writer::ResponseWriter;
use crate::typed::message::Message;

/// DecodeRequestFn は受信 payload を target に詰める
///
/// # 契約
/// - payload を 2 回以上消費しない（`HandlerConn` が 1 回に制限する）
/// - 失敗時はビジネスロジックは呼ばれない
pub type DecodeRequestFn =
    Arc<dyn Fn(&http::Request<Bytes>, &mut dyn Message) -> Result<(), CallError> + Send + Sync>;

/// EncodeResponseFn は message を sink へ書き出す
///
/// # 契約
/// - 対応する decode で復元できる形式で書く
/// - 途中で失敗したらそれ以上書かない（部分的な出力は Dispatch Core が破棄する）
pub type EncodeResponseFn = Arc<
    dyn Fn(&mut ResponseWriter, &http::Request<Bytes>, &dyn Message) -> Result<(), CallError>
        + Send
        + Sync,
>;

/// EncodeErrorFn はエラーを sink へ書き出す
///
/// # 契約
/// - どんな `CallError` に対しても整った出力を作る
/// - 戻り値なし。書けない場合でも sink を壊さない
pub type EncodeErrorFn =
    Arc<dyn Fn(&mut ResponseWriter, &http::Request<Bytes>, &CallError) + Send + Sync>;
