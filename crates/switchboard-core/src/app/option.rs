//! HandlerOption / HandlerConfig - codec 関数の組み立て
//!
//! # 学習ポイント
//! - Functional options パターン（`with_*` が HandlerOption を返す）
//! - 起動時検証（Fail-fast 設計）: codec 関数が欠けていれば構築時にエラー
//! - `Arc` による共有: 構築後は読み取り専用で、全呼び出しが同じ設定を共有する

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use crate::domain::errors::{CallError, ConfigError};
use crate::ports::codec::{DecodeRequestFn, EncodeErrorFn, EncodeResponseFn};
use crate::transport::writer::ResponseWriter;
use crate::typed::message::Message;

/// HandlerOption は設定を 1 つ書き換える関数
///
/// `Clone` が安いので、1 つのオプション列をサービス内の全 handler に使い回せます。
#[derive(Clone)]
pub struct HandlerOption(Arc<dyn Fn(&mut HandlerConfigBuilder) + Send + Sync>);

impl HandlerOption {
    pub fn new(apply: impl Fn(&mut HandlerConfigBuilder) + Send + Sync + 'static) -> Self {
        Self(Arc::new(apply))
    }
}

impl fmt::Debug for HandlerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HandlerOption")
    }
}

/// 構築途中の設定（全フィールドが Option）
#[derive(Default)]
pub struct HandlerConfigBuilder {
    decode: Option<DecodeRequestFn>,
    encode: Option<EncodeResponseFn>,
    encode_error: Option<EncodeErrorFn>,
}

impl HandlerConfigBuilder {
    pub fn set_decode_request_fn(&mut self, f: DecodeRequestFn) {
        self.decode = Some(f);
    }

    pub fn set_encode_response_fn(&mut self, f: EncodeResponseFn) {
        self.encode = Some(f);
    }

    pub fn set_encode_error_fn(&mut self, f: EncodeErrorFn) {
        self.encode_error = Some(f);
    }
}

/// HandlerConfig は {decode, encode, encode-error} の不変な組
pub struct HandlerConfig {
    decode: DecodeRequestFn,
    encode: EncodeResponseFn,
    encode_error: EncodeErrorFn,
}

impl HandlerConfig {
    /// オプションを順に適用して設定を作る（後勝ち）
    ///
    /// # 検証
    /// - 3 つの関数のどれかが未設定なら `ConfigError::MissingCodec`
    pub fn from_options(
        procedure: &str,
        options: &[HandlerOption],
    ) -> Result<Arc<Self>, ConfigError> {
        let mut builder = HandlerConfigBuilder::default();
        for option in options {
            (option.0)(&mut builder);
        }

        let missing = |function: &'static str| ConfigError::MissingCodec {
            procedure: procedure.to_string(),
            function,
        };
        Ok(Arc::new(Self {
            decode: builder.decode.ok_or_else(|| missing("decode request"))?,
            encode: builder.encode.ok_or_else(|| missing("encode response"))?,
            encode_error: builder
                .encode_error
                .ok_or_else(|| missing("encode error"))?,
        }))
    }

    pub fn decode(
        &self,
        request: &http::Request<Bytes>,
        target: &mut dyn Message,
    ) -> Result<(), CallError> {
        (self.decode)(request, target)
    }

    pub fn encode(
        &self,
        sink: &mut ResponseWriter,
        request: &http::Request<Bytes>,
        message: &dyn Message,
    ) -> Result<(), CallError> {
        (self.encode)(sink, request, message)
    }

    pub fn encode_error(
        &self,
        sink: &mut ResponseWriter,
        request: &http::Request<Bytes>,
        err: &CallError,
    ) {
        (self.encode_error)(sink, request, err)
    }
}

impl fmt::Debug for HandlerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerConfig").finish_non_exhaustive()
    }
}

pub fn with_decode_request_fn<F>(f: F) -> HandlerOption
where
    F: Fn(&http::Request<Bytes>, &mut dyn Message) -> Result<(), CallError>
        + Send
        + Sync
        + 'static,
{
    let f: DecodeRequestFn = Arc::new(f);
    HandlerOption::new(move |c| c.set_decode_request_fn(Arc::clone(&f)))
}

pub fn with_encode_response_fn<F>(f: F) -> HandlerOption
where
    F: Fn(&mut ResponseWriter, &http::Request<Bytes>, &dyn Message) -> Result<(), CallError>
        + Send
        + Sync
        + 'static,
{
    let f: EncodeResponseFn = Arc::new(f);
    HandlerOption::new(move |c| c.set_encode_response_fn(Arc::clone(&f)))
}

pub fn with_encode_error_fn<F>(f: F) -> HandlerOption
where
    F: Fn(&mut ResponseWriter, &http::Request<Bytes>, &CallError) + Send + Sync + 'static,
{
    let f: EncodeErrorFn = Arc::new(f);
    HandlerOption::new(move |c| c.set_encode_error_fn(Arc::clone(&f)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn noop_options() -> Vec<HandlerOption> {
        vec![
            with_decode_request_fn(|_, _| Ok(())),
            with_encode_response_fn(|_, _, _| Ok(())),
            with_encode_error_fn(|_, _, _| {}),
        ]
    }

    #[test]
    fn test_build_success() {
        assert!(HandlerConfig::from_options("/a.B/C", &noop_options()).is_ok());
    }

    #[test]
    fn test_build_missing_encode_error() {
        let mut options = noop_options();
        options.pop();
        let err = HandlerConfig::from_options("/a.B/C", &options).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingCodec {
                procedure: "/a.B/C".to_string(),
                function: "encode error",
            }
        );
    }

    #[test]
    fn test_build_no_options() {
        let err = HandlerConfig::from_options("/a.B/C", &[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCodec { function: "decode request", .. }));
    }

    #[test]
    fn test_later_option_wins() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);

        let mut options = noop_options();
        options.push(with_decode_request_fn(move |_, _| {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));
        let config = HandlerConfig::from_options("/a.B/C", &options).unwrap();

        let req = http::Request::new(Bytes::new());
        let mut target = String::new();
        config.decode(&req, &mut target).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
