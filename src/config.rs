//! 設定モジュール

use crate::error::ConfigError;
use crate::level::LogLevel;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// ロガー設定
///
/// 各フィールドは公開されており、`init`を経由せずに直接書き換えてもよい。
/// 出力のたびに読み直されるため、変更は次の呼び出しから反映される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// 出力する最低レベル
    pub log_level: LogLevel,
    /// 全レコードに付与する相関ID
    pub correlation_id: Option<String>,
    /// trueなら1行のコンパクトJSON、falseなら2スペースインデント
    pub compact_print: bool,
    /// trueなら多倍長整数を`"123n"`形式の文字列として出力
    pub big_int_support: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::from_options(LogOptions::default(), LogLevel::Info)
    }
}

impl LoggerConfig {
    /// オプションから設定を構築
    ///
    /// 省略されたフィールドはマージせず既定値に戻す。レベルの既定値は`default_level`。
    pub fn from_options(options: LogOptions, default_level: LogLevel) -> Self {
        Self {
            log_level: options.log_level.unwrap_or(default_level),
            correlation_id: options.correlation_id,
            compact_print: options.compact_print.unwrap_or(false),
            big_int_support: options.big_int_support.unwrap_or(false),
        }
    }

    /// 指定レベルのログを出力すべきか判定
    ///
    /// `Off`は番兵なので、それ自体を出力レベルとして渡しても出力されない。
    pub fn should_emit(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.log_level
    }

    /// 出力に含める相関ID（空文字列は未設定扱い）
    pub fn active_correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// `init`に渡すオプション
///
/// 設定ファイルではキャメルケースのキーを使う。未知のキーは無視する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogOptions {
    pub log_level: Option<LogLevel>,
    pub correlation_id: Option<String>,
    pub compact_print: Option<bool>,
    pub big_int_support: Option<bool>,
}

impl LogOptions {
    /// TOML文字列からオプションを読み込む
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// TOMLファイルからオプションを読み込む
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let options = Self::from_toml_str(&content)?;
        debug!("ログ設定を読み込みました: {}", path.display());
        Ok(options)
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_compact_print(mut self, compact: bool) -> Self {
        self.compact_print = Some(compact);
        self
    }

    pub fn with_big_int_support(mut self, enabled: bool) -> Self {
        self.big_int_support = Some(enabled);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.correlation_id, None);
        assert!(!config.compact_print);
        assert!(!config.big_int_support);
    }

    #[test]
    fn test_from_options_replaces_every_field() {
        let options = LogOptions::default()
            .with_log_level(LogLevel::Debug)
            .with_correlation_id("abc")
            .with_compact_print(true)
            .with_big_int_support(true);
        let config = LoggerConfig::from_options(options, LogLevel::Info);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.correlation_id.as_deref(), Some("abc"));
        assert!(config.compact_print);
        assert!(config.big_int_support);
    }

    #[test]
    fn test_omitted_level_uses_startup_default() {
        let config = LoggerConfig::from_options(LogOptions::default(), LogLevel::Warn);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_should_emit_threshold() {
        let mut config = LoggerConfig::default();
        config.log_level = LogLevel::Warn;
        assert!(!config.should_emit(LogLevel::Debug));
        assert!(!config.should_emit(LogLevel::Info));
        assert!(config.should_emit(LogLevel::Warn));
        assert!(config.should_emit(LogLevel::Error));
    }

    #[test]
    fn test_should_emit_off_suppresses_everything() {
        let mut config = LoggerConfig::default();
        config.log_level = LogLevel::Off;
        for level in [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
            assert!(!config.should_emit(level));
        }
    }

    #[test]
    fn test_off_is_never_an_emission_level() {
        let mut config = LoggerConfig::default();
        config.log_level = LogLevel::Debug;
        assert!(!config.should_emit(LogLevel::Off));
    }

    #[test]
    fn test_empty_correlation_id_is_inactive() {
        let mut config = LoggerConfig::default();
        config.correlation_id = Some(String::new());
        assert_eq!(config.active_correlation_id(), None);
        config.correlation_id = Some("corr".to_string());
        assert_eq!(config.active_correlation_id(), Some("corr"));
    }

    #[test]
    fn test_from_toml_str() {
        let options = LogOptions::from_toml_str(
            r#"
            logLevel = "ERROR"
            correlationId = "my-corr-id"
            compactPrint = true
            "#,
        )
        .unwrap();
        assert_eq!(options.log_level, Some(LogLevel::Error));
        assert_eq!(options.correlation_id.as_deref(), Some("my-corr-id"));
        assert_eq!(options.compact_print, Some(true));
        assert_eq!(options.big_int_support, None);
    }

    #[test]
    fn test_from_toml_ignores_unknown_keys() {
        let options = LogOptions::from_toml_str("service = \"billing\"\nbigIntSupport = true").unwrap();
        assert_eq!(options.big_int_support, Some(true));
        assert_eq!(options.log_level, None);
    }

    #[test]
    fn test_from_toml_rejects_unknown_level() {
        assert!(LogOptions::from_toml_str("logLevel = \"verbose\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("log.toml");
        fs::write(&path, "logLevel = \"DEBUG\"\n").unwrap();

        let options = LogOptions::load(&path).unwrap();
        assert_eq!(options.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = LogOptions::load(&temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
