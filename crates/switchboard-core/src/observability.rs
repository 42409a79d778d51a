//! Observability - ログ出力の初期化
//!
//! stdout はプラグインのプロトコルに使うので、ログは必ず stderr に出します。
//! フィルタは `SWITCHBOARD_LOG`（`RUST_LOG` と同じ書式）、未設定なら `warn`。

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SWITCHBOARD_LOG";
const DEFAULT_FILTER: &str = "warn";

/// `SWITCHBOARD_LOG` から読むフィルタ
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// グローバル subscriber を設定する（2 回目以降は何もしない）
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::warn!("logged to stderr");
    }
}
