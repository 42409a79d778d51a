// This file is @generated by protoc-gen-switchboard. DO NOT EDIT.
// source: demo/legacy.proto
//
// Request and response types must implement serde::Serialize and serde::Deserialize.
// With prost-build, add:
//   .type_attribute(".", "#[derive(serde::Serialize, serde::Deserialize)]")

pub const LEGACY_NAME: &str = "demo.Legacy";
pub const FEED_NAME: &str = "demo.Feed";

pub const LEGACY_PING_PROCEDURE: &str = "/demo.Legacy/Ping";
pub const LEGACY_TYPE_PROCEDURE: &str = "/demo.Legacy/Type";
pub const FEED_TAIL_PROCEDURE: &str = "/demo.Feed/Tail";
pub const FEED_PUSH_PROCEDURE: &str = "/demo.Feed/Push";

/// Legacy is kept for old clients.
#[deprecated]
#[::switchboard_core::async_trait]
pub trait LegacyHandler: Send + Sync + 'static {
    async fn ping(&self, ctx: ::switchboard_core::CallContext, req: ::switchboard_core::Request<Ping>) -> ::std::result::Result<::switchboard_core::Response<Pong>, ::switchboard_core::CallError>;

    /// Type is going away.
    #[deprecated]
    async fn r#type(&self, ctx: ::switchboard_core::CallContext, req: ::switchboard_core::Request<Ping>) -> ::std::result::Result<::switchboard_core::Response<Pong>, ::switchboard_core::CallError>;
}

/// Builds the router for `demo.Legacy`. Returns the path prefix to mount it under.
///
/// Only unary methods are routed.
#[deprecated]
#[allow(deprecated)]
pub fn new_legacy_handler<H: LegacyHandler>(
    svc: H,
    opts: &[::switchboard_core::HandlerOption],
) -> ::std::result::Result<(&'static str, ::switchboard_core::ServiceRouter), ::switchboard_core::ConfigError> {
    let svc = ::std::sync::Arc::new(svc);
    let legacy_ping_handler = ::switchboard_core::Handler::new(
        LEGACY_PING_PROCEDURE,
        {
            let svc = ::std::sync::Arc::clone(&svc);
            move |ctx: ::switchboard_core::CallContext, req: ::switchboard_core::Request<Ping>| {
                let svc = ::std::sync::Arc::clone(&svc);
                async move { svc.ping(ctx, req).await }
            }
        },
        opts,
    )?;
    let legacy_type_handler = ::switchboard_core::Handler::new(
        LEGACY_TYPE_PROCEDURE,
        {
            let svc = ::std::sync::Arc::clone(&svc);
            move |ctx: ::switchboard_core::CallContext, req: ::switchboard_core::Request<Ping>| {
                let svc = ::std::sync::Arc::clone(&svc);
                async move { svc.r#type(ctx, req).await }
            }
        },
        opts,
    )?;
    let router = ::switchboard_core::ServiceRouter::builder("/demo.Legacy/")
        .route(LEGACY_PING_PROCEDURE, legacy_ping_handler)?
        .route(LEGACY_TYPE_PROCEDURE, legacy_type_handler)?
        .build();
    ::std::result::Result::Ok(("/demo.Legacy/", router))
}

#[::switchboard_core::async_trait]
pub trait FeedHandler: Send + Sync + 'static {
    async fn tail(&self, ctx: ::switchboard_core::CallContext, req: ::switchboard_core::Request<Ping>, stream: ::switchboard_core::ServerStream<Pong>) -> ::std::result::Result<(), ::switchboard_core::CallError>;

    async fn push(&self, ctx: ::switchboard_core::CallContext, stream: ::switchboard_core::ClientStream<Ping>) -> ::std::result::Result<::switchboard_core::Response<Pong>, ::switchboard_core::CallError>;
}

/// Builds the router for `demo.Feed`. Returns the path prefix to mount it under.
///
/// Only unary methods are routed.
pub fn new_feed_handler<H: FeedHandler>(
    svc: H,
    opts: &[::switchboard_core::HandlerOption],
) -> ::std::result::Result<(&'static str, ::switchboard_core::ServiceRouter), ::switchboard_core::ConfigError> {
    let _ = (svc, opts);
    let router = ::switchboard_core::ServiceRouter::builder("/demo.Feed/")
        .build();
    ::std::result::Result::Ok(("/demo.Feed/", router))
}

