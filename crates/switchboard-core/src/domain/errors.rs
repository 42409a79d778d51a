//! Errors - エラー型と分類
//!
//! # 二系統
//! - **ConfigError**: 構築時のエラー（サービス構築・コード生成を中断する）
//! - **CallError**: 呼び出し時のエラー（Dispatch Core が encode-error で解決する）
//!
//! ConfigError は構築した呼び出し元へ同期的に返り、CallError は
//! ルーターの外へ漏れることはありません。

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// ConfigError は構築時の設定ミス
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("package_suffix {0:?} is not a valid Rust identifier")]
    InvalidPackageSuffix(String),

    #[error("unknown plugin option {0:?}")]
    UnknownOption(String),

    #[error("malformed plugin option {0:?}, expected key=value")]
    MalformedOption(String),

    #[error("handler for {procedure} has no {function} function configured")]
    MissingCodec {
        procedure: String,
        function: &'static str,
    },

    #[error("procedure {0} is already registered")]
    DuplicateProcedure(String),

    #[error("handler for {handler} cannot be routed at {path}")]
    ProcedureMismatch { path: String, handler: String },
}

/// ErrorKind は実行エラーの分類
///
/// # 分類
/// - パイプライン由来: Cancelled / Decode / Encode / Internal
/// - アプリケーション由来: それ以外（ビジネスロジックが選ぶ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Cancelled,
    Decode,
    Encode,
    Internal,
    InvalidArgument,
    NotFound,
    PermissionDenied,
    Unauthenticated,
    Unimplemented,
    Unavailable,
    Unknown,
}

impl ErrorKind {
    /// HTTP ステータスへの対応付け
    pub fn http_status(self) -> StatusCode {
        match self {
            // 499 Client Closed Request (nginx)
            ErrorKind::Cancelled => {
                StatusCode::from_u16(499).unwrap_or(StatusCode::REQUEST_TIMEOUT)
            }
            ErrorKind::Decode | ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Unimplemented => StatusCode::NOT_IMPLEMENTED,
            ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Encode | ErrorKind::Internal | ErrorKind::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Decode => "decode",
            ErrorKind::Encode => "encode",
            ErrorKind::Internal => "internal",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::NotFound => "not_found",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::Unimplemented => "unimplemented",
            ErrorKind::Unavailable => "unavailable",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CallError は 1 回の呼び出しの失敗
///
/// ビジネスロジックも同じ型を返します。
/// `Clone` なので encode-error 関数へ参照で渡した後もログに残せます。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct CallError {
    kind: ErrorKind,
    message: String,
}

impl CallError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "call cancelled")
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Decode, format!("decode request: {err}"))
    }

    pub fn encode(err: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Encode, format!("encode response: {err}"))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
