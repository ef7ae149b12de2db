//! 内部診断ログモジュール
//!
//! ロガー自身の動作（不正な`LOG_LEVEL`の無視、設定ファイルの読み込み、
//! ログの抑制など）は`tracing`で記録される。JSON出力とは別経路。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 診断ログの購読者を初期化
///
/// RUST_LOG環境変数でレベルを設定可能（デフォルトはwarn）。
/// 出力先は標準エラー。既に購読者が登録済みの場合は何もせずfalseを返す。
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
