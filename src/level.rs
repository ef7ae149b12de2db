//! ログレベルモジュール

use crate::error::UnknownLevel;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// 初期ログレベルを指定する環境変数名
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// ログレベル
///
/// 宣言順に重要度が上がる。`Off`は`Error`より上の番兵で、設定すると全出力を抑制する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// 出力レコードに書き込むレベル名
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Off => "OFF",
        }
    }

    /// 環境変数`LOG_LEVEL`から初期レベルを決定
    ///
    /// 未設定・不正値・読み取り失敗はすべて`Info`になる。
    pub fn from_env() -> Self {
        Self::resolve(env::var(LOG_LEVEL_ENV).ok().as_deref())
    }

    /// 生の設定値からレベルを決定（大文字小文字を区別する完全一致）
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            None => LogLevel::Info,
            Some(value) => value.parse().unwrap_or_else(|_| {
                debug!("{}の値が不正なためINFOを使用します: {:?}", LOG_LEVEL_ENV, value);
                LogLevel::Info
            }),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "OFF" => Ok(LogLevel::Off),
            other => Err(UnknownLevel(other.to_string())),
        }
    }
}
