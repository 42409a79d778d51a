// This file is @generated by protoc-gen-switchboard. DO NOT EDIT.
// source: demo/echo.proto
//
// Request and response types must implement serde::Serialize and serde::Deserialize.
// With prost-build, add:
//   .type_attribute(".", "#[derive(serde::Serialize, serde::Deserialize)]")

pub const ECHO_NAME: &str = "demo.Echo";

pub const ECHO_DO_PROCEDURE: &str = "/demo.Echo/Do";
pub const ECHO_WATCH_PROCEDURE: &str = "/demo.Echo/Watch";
pub const ECHO_UPLOAD_PROCEDURE: &str = "/demo.Echo/Upload";
pub const ECHO_CHAT_PROCEDURE: &str = "/demo.Echo/Chat";

/// Echo repeats what it hears.
#[::switchboard_core::async_trait]
pub trait EchoHandler: Send + Sync + 'static {
    /// Do echoes the text back.
    async fn r#do(&self, ctx: ::switchboard_core::CallContext, req: ::switchboard_core::Request<super::EchoReq>) -> ::std::result::Result<::switchboard_core::Response<super::EchoResp>, ::switchboard_core::CallError>;

    async fn watch(&self, ctx: ::switchboard_core::CallContext, req: ::switchboard_core::Request<super::EchoReq>, stream: ::switchboard_core::ServerStream<super::EchoResp>) -> ::std::result::Result<(), ::switchboard_core::CallError>;

    async fn upload(&self, ctx: ::switchboard_core::CallContext, stream: ::switchboard_core::ClientStream<super::EchoReq>) -> ::std::result::Result<::switchboard_core::Response<super::EchoResp>, ::switchboard_core::CallError>;

    async fn chat(&self, ctx: ::switchboard_core::CallContext, stream: ::switchboard_core::BidiStream<super::EchoReq, super::EchoResp>) -> ::std::result::Result<(), ::switchboard_core::CallError>;
}

/// Builds the router for `demo.Echo`. Returns the path prefix to mount it under.
///
/// Only unary methods are routed.
pub fn new_echo_handler<H: EchoHandler>(
    svc: H,
    opts: &[::switchboard_core::HandlerOption],
) -> ::std::result::Result<(&'static str, ::switchboard_core::ServiceRouter), ::switchboard_core::ConfigError> {
    let svc = ::std::sync::Arc::new(svc);
    let echo_do_handler = ::switchboard_core::Handler::new(
        ECHO_DO_PROCEDURE,
        {
            let svc = ::std::sync::Arc::clone(&svc);
            move |ctx: ::switchboard_core::CallContext, req: ::switchboard_core::Request<super::EchoReq>| {
                let svc = ::std::sync::Arc::clone(&svc);
                async move { svc.r#do(ctx, req).await }
            }
        },
        opts,
    )?;
    let router = ::switchboard_core::ServiceRouter::builder("/demo.Echo/")
        .route(ECHO_DO_PROCEDURE, echo_do_handler)?
        .build();
    ::std::result::Result::Ok(("/demo.Echo/", router))
}

