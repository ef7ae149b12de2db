//! エラー型定義モジュール

use std::io;
use thiserror::Error;

/// ログ出力エラー
#[derive(Error, Debug)]
pub enum LogError {
    #[error("シリアライズエラー: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("書き込みエラー: {0}")]
    Io(#[from] io::Error),
}

/// 不明なログレベル名
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("不明なログレベル: {0}")]
pub struct UnknownLevel(pub String);

/// 多倍長整数として解釈できない文字列
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("不正な多倍長整数: {0:?}")]
pub struct InvalidBigInt(pub String);

/// 設定エラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IOエラー: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML解析エラー: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_error_display() {
        let err = LogError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"));
        assert!(err.to_string().contains("書き込みエラー"));
    }

    #[test]
    fn test_serialize_error_display() {
        let inner = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LogError::from(inner);
        assert!(err.to_string().contains("シリアライズエラー"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::IoError(io::Error::new(io::ErrorKind::NotFound, "not found"));
        assert!(err.to_string().contains("IOエラー"));
    }

    #[test]
    fn test_unknown_level_display() {
        let err = UnknownLevel("TRACE".to_string());
        assert_eq!(err.to_string(), "不明なログレベル: TRACE");
    }

    #[test]
    fn test_invalid_big_int_display() {
        let err = InvalidBigInt("12a".to_string());
        assert!(err.to_string().contains("不正な多倍長整数"));
    }

    #[test]
    fn test_parse_error_display() {
        let inner = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err = ConfigError::from(inner);
        assert!(err.to_string().contains("TOML解析エラー"));
    }
}
