//! Typed envelopes - Request<T> / Response<T>
//!
//! # 二層構造
//! - **表層（Typed）**: `Request<T>`, `Response<T>` - ビジネスロジックが見る型
//! - **内部（Any）**: `AnyRequest`, `AnyResponse` - 型消去されたビュー
//!
//! エンベロープは呼び出しごとに作られ、呼び出しが終わると破棄されます。

use std::any::Any;

use super::message::Message;

/// Request はリクエストメッセージを 1 つだけ所有する
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request<T> {
    msg: T,
}

impl<T> Request<T> {
    pub fn new(msg: T) -> Self {
        Self { msg }
    }

    pub fn msg(&self) -> &T {
        &self.msg
    }

    pub fn msg_mut(&mut self) -> &mut T {
        &mut self.msg
    }

    pub fn into_inner(self) -> T {
        self.msg
    }
}

/// Response はレスポンスメッセージを 1 つだけ所有する
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response<T> {
    msg: T,
}

impl<T> Response<T> {
    pub fn new(msg: T) -> Self {
        Self { msg }
    }

    pub fn msg(&self) -> &T {
        &self.msg
    }

    pub fn msg_mut(&mut self) -> &mut T {
        &mut self.msg
    }

    pub fn into_inner(self) -> T {
        self.msg
    }
}

/// AnyRequest は object-safe なリクエストビュー
///
/// `into_any()` で `Box<dyn Any>` に落とし、呼び出し側で
/// `downcast::<Request<T>>()` して型を取り戻します。
pub trait AnyRequest: Send {
    fn any(&self) -> &dyn Message;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T: Message> AnyRequest for Request<T> {
    fn any(&self) -> &dyn Message {
        &self.msg
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// AnyResponse は object-safe なレスポンスビュー
pub trait AnyResponse: Send {
    fn any(&self) -> &dyn Message;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T: Message> AnyResponse for Response<T> {
    fn any(&self) -> &dyn Message {
        &self.msg
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}
