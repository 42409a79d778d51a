//! Outbound response sink.

use bytes::{Bytes, BytesMut};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::StatusCode;

use crate::domain::errors::CallError;

/// ResponseWriter buffers one outcome (status, headers, body) for a call.
///
/// Codecs write into it; the dispatch core decides whether the buffered
/// outcome is kept or discarded (`reset`) and then `seal`s it. Writes after
/// `seal` are rejected so at most one outcome ever leaves a call.
#[derive(Debug)]
pub struct ResponseWriter {
    status: StatusCode,
    headers: HeaderMap,
    body: BytesMut,
    sealed: bool,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: BytesMut::new(),
            sealed: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) -> Result<(), CallError> {
        self.ensure_open()?;
        self.status = status;
        Ok(())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) -> Result<(), CallError> {
        self.ensure_open()?;
        self.headers.insert(name, value);
        Ok(())
    }

    pub fn write(&mut self, chunk: &[u8]) -> Result<(), CallError> {
        self.ensure_open()?;
        self.body.extend_from_slice(chunk);
        Ok(())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Drop anything buffered so far.
    pub fn reset(&mut self) {
        if self.sealed {
            return;
        }
        self.status = StatusCode::OK;
        self.headers.clear();
        self.body.clear();
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Add headers that are not already set by the codec.
    ///
    /// A name the writer already carries keeps the codec's values; every value
    /// of a new name is appended.
    pub fn merge_headers(&mut self, extra: HeaderMap) {
        let mut last: Option<HeaderName> = None;
        for (name, value) in extra {
            // HeaderMap の IntoIterator は同名ヘッダの 2 つ目以降で name を None にする
            let name = match name {
                Some(name) => {
                    last = (!self.headers.contains_key(&name)).then(|| name.clone());
                    name
                }
                None => match &last {
                    Some(name) => name.clone(),
                    None => continue,
                },
            };
            if last.as_ref() == Some(&name) {
                self.headers.append(name, value);
            }
        }
    }

    pub fn into_response(self) -> http::Response<Bytes> {
        let mut response = http::Response::new(self.body.freeze());
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }

    fn ensure_open(&self) -> Result<(), CallError> {
        if self.sealed {
            return Err(CallError::internal("response already committed"));
        }
        Ok(())
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;

    #[test]
    fn writes_are_buffered_into_response() {
        let mut w = ResponseWriter::new();
        w.set_status(StatusCode::CREATED).unwrap();
        w.insert_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .unwrap();
        w.write(b"hello ").unwrap();
        w.write(b"world").unwrap();

        let resp = w.into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(resp.body().as_ref(), b"hello world");
    }

    #[test]
    fn reset_discards_partial_outcome() {
        let mut w = ResponseWriter::new();
        w.set_status(StatusCode::ACCEPTED).unwrap();
        w.write(b"partial").unwrap();
        w.reset();
        assert_eq!(w.status(), StatusCode::OK);
        assert!(w.body().is_empty());
    }

    #[test]
    fn sealed_writer_rejects_writes() {
        let mut w = ResponseWriter::new();
        w.write(b"done").unwrap();
        w.seal();
        assert!(w.write(b"more").is_err());
        w.reset();
        assert_eq!(w.body(), b"done");
    }

    #[test]
    fn merge_keeps_repeated_headers() {
        let mut extra = HeaderMap::new();
        extra.append("x-trace", HeaderValue::from_static("a"));
        extra.append("x-trace", HeaderValue::from_static("b"));

        let mut w = ResponseWriter::new();
        w.merge_headers(extra);
        let values: Vec<_> = w.headers().get_all("x-trace").iter().collect();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn merge_leaves_codec_headers_alone() {
        let mut extra = HeaderMap::new();
        extra.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        extra.append("x-trace", HeaderValue::from_static("a"));

        let mut w = ResponseWriter::new();
        w.insert_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .unwrap();
        w.merge_headers(extra);

        let types: Vec<_> = w.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(types, vec!["application/json"]);
        assert_eq!(w.headers()["x-trace"], "a");
    }
}
