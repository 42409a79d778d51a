//! JSON codec - 開発用・小規模サービス用の codec 実装
//!
//! ランタイムはデフォルト codec を持たないので、使う側が明示的に
//! `json::options()` を渡します。
//!
//! # Content negotiation
//! - `Content-Type` なし、または `application/json`（パラメータ付き可）だけ受け付ける
//! - 空 body はゼロ値メッセージのまま（decode しない）
//! - エラーは `{"code": "...", "message": "..."}` と `ErrorKind` 由来のステータス

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use tracing::error;

use crate::app::option::{
    HandlerOption, with_decode_request_fn, with_encode_error_fn, with_encode_response_fn,
};
use crate::domain::errors::{CallError, ErrorKind};
use crate::transport::writer::ResponseWriter;
use crate::typed::message::Message;

pub const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: ErrorKind,
    message: &'a str,
}

pub fn decode_request(
    request: &http::Request<Bytes>,
    target: &mut dyn Message,
) -> Result<(), CallError> {
    if let Some(content_type) = request.headers().get(CONTENT_TYPE) {
        let essence = content_type
            .to_str()
            .unwrap_or_default()
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        if !essence.eq_ignore_ascii_case(CONTENT_TYPE_JSON) {
            return Err(CallError::decode(format!(
                "unsupported content type {content_type:?}"
            )));
        }
    }

    let body = request.body();
    if body.is_empty() {
        return Ok(());
    }
    target.merge_json(body).map_err(CallError::decode)
}

pub fn encode_response(
    sink: &mut ResponseWriter,
    _request: &http::Request<Bytes>,
    message: &dyn Message,
) -> Result<(), CallError> {
    // 先に全部シリアライズしてから書く（途中まで書かない）
    let body = message.to_json().map_err(CallError::encode)?;
    sink.insert_header(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON))?;
    sink.write(&body)
}

pub fn encode_error(sink: &mut ResponseWriter, _request: &http::Request<Bytes>, err: &CallError) {
    let body = ErrorBody {
        code: err.kind(),
        message: err.message(),
    };
    // ErrorBody は文字列と enum だけなので失敗しないが、失敗しても空 body で返す
    let payload = serde_json::to_vec(&body).unwrap_or_default();

    let written = sink
        .set_status(err.kind().http_status())
        .and_then(|()| sink.insert_header(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON)))
        .and_then(|()| sink.write(&payload));
    if let Err(write_err) = written {
        error!(error = %write_err, original = %err, "failed to write error response");
    }
}

/// JSON codec の 3 関数をまとめたオプション列
pub fn options() -> Vec<HandlerOption> {
    vec![
        with_decode_request_fn(decode_request),
        with_encode_response_fn(encode_response),
        with_encode_error_fn(encode_error),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::message::fixtures::{EchoReq, EchoResp};
    use http::StatusCode;
    use rstest::rstest;

    fn request(content_type: Option<&'static str>, body: &'static str) -> http::Request<Bytes> {
        let mut builder = http::Request::builder().method("POST").uri("/demo.Echo/Do");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(Bytes::from_static(body.as_bytes())).unwrap()
    }

    #[rstest]
    #[case::absent(None)]
    #[case::plain(Some("application/json"))]
    #[case::charset(Some("application/json; charset=utf-8"))]
    #[case::upper(Some("Application/JSON"))]
    fn accepts_json_content_types(#[case] content_type: Option<&'static str>) {
        let mut msg = EchoReq::default();
        decode_request(&request(content_type, r#"{"text":"hi"}"#), &mut msg).unwrap();
        assert_eq!(msg.text, "hi");
    }

    #[test]
    fn rejects_other_content_types() {
        let mut msg = EchoReq::default();
        let err = decode_request(&request(Some("application/proto"), "x"), &mut msg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn empty_body_keeps_zero_value() {
        let mut msg = EchoReq::default();
        decode_request(&request(None, ""), &mut msg).unwrap();
        assert_eq!(msg, EchoReq::default());
    }

    #[test]
    fn encodes_response_as_json() {
        let mut sink = ResponseWriter::new();
        let msg = EchoResp {
            text: "a".to_string(),
            length: 1,
        };
        encode_response(&mut sink, &request(None, ""), &msg).unwrap();

        let resp = sink.into_response();
        assert_eq!(resp.headers()[CONTENT_TYPE], CONTENT_TYPE_JSON);
        let back: EchoResp = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn encodes_error_body() {
        let mut sink = ResponseWriter::new();
        encode_error(
            &mut sink,
            &request(None, ""),
            &CallError::new(ErrorKind::InvalidArgument, "text is required"),
        );

        let resp = sink.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let v: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(v["code"], "invalid_argument");
        assert_eq!(v["message"], "text is required");
    }

    #[test]
    fn error_on_sealed_sink_leaves_it_untouched() {
        let mut sink = ResponseWriter::new();
        sink.write(b"kept").unwrap();
        sink.seal();
        encode_error(&mut sink, &request(None, ""), &CallError::internal("late"));
        assert_eq!(sink.body(), b"kept");
        assert_eq!(sink.status(), StatusCode::OK);
    }
}
