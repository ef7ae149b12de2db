//! ロガーモジュール
//!
//! 設定を保持し、レベル判定・レコード構築・シリアライズ・書き込みを行う。

use crate::config::{LogOptions, LoggerConfig};
use crate::error::LogError;
use crate::input::LogInput;
use crate::level::LogLevel;
use crate::record;
use crate::sink::{LogSink, StdStreams};
use chrono::Utc;
use tracing::{debug, trace};

/// 構造化JSONロガー
///
/// プロセスで1つ作成し、参照で呼び出し元に渡して使う。
pub struct Logger<S: LogSink = StdStreams> {
    /// 現在の設定（直接書き換え可）
    pub config: LoggerConfig,
    /// `init`でレベルが省略された場合に戻すレベル
    startup_level: LogLevel,
    sink: S,
}

impl Logger<StdStreams> {
    /// 標準出力・標準エラーに書き込むロガーを作成
    pub fn new() -> Self {
        Self::with_sink(StdStreams)
    }
}

impl Default for Logger<StdStreams> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LogSink> Logger<S> {
    /// 出力先を指定してロガーを作成（初期レベルは環境変数`LOG_LEVEL`）
    pub fn with_sink(sink: S) -> Self {
        Self::with_startup_level(sink, LogLevel::from_env())
    }

    /// 出力先と初期レベルを指定してロガーを作成
    pub fn with_startup_level(sink: S, startup_level: LogLevel) -> Self {
        Self {
            config: LoggerConfig::from_options(LogOptions::default(), startup_level),
            startup_level,
            sink,
        }
    }

    /// 設定を置き換える
    ///
    /// 省略されたフィールドは既定値に戻る（前の値は引き継がない）。
    pub fn init(&mut self, options: LogOptions) {
        self.config = LoggerConfig::from_options(options, self.startup_level);
        debug!(
            "ロガーを初期化しました: level={}, compact={}, big_int={}",
            self.config.log_level, self.config.compact_print, self.config.big_int_support
        );
    }

    pub fn should_emit(&self, level: LogLevel) -> bool {
        self.config.should_emit(level)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// DEBUGログを出力
    pub fn debug(&self, input: impl Into<LogInput>) -> Result<(), LogError> {
        self.log(LogLevel::Debug, input)
    }

    /// INFOログを出力
    pub fn info(&self, input: impl Into<LogInput>) -> Result<(), LogError> {
        self.log(LogLevel::Info, input)
    }

    /// WARNログを出力
    pub fn warn(&self, input: impl Into<LogInput>) -> Result<(), LogError> {
        self.log(LogLevel::Warn, input)
    }

    /// ERRORログを出力
    ///
    /// エラー値のフィールドは`name`・`message`・`stack`を持つオブジェクトに変換される。
    pub fn error(&self, input: impl Into<LogInput>) -> Result<(), LogError> {
        self.log(LogLevel::Error, input)
    }

    /// 指定レベルでログを出力
    pub fn log(&self, level: LogLevel, input: impl Into<LogInput>) -> Result<(), LogError> {
        if let Some(line) = self.format(level, input)? {
            self.sink.write_line(level, &line)?;
        }
        Ok(())
    }

    /// 書き込まずにログ行を生成
    ///
    /// レベル判定で除外された場合は`None`を返す。
    pub fn format(&self, level: LogLevel, input: impl Into<LogInput>) -> Result<Option<String>, LogError> {
        let mut input = input.into();
        if level == LogLevel::Error {
            input = record::preprocess_errors(input);
        }

        if !self.should_emit(level) {
            trace!("{}ログを抑制しました（設定レベル: {}）", level, self.config.log_level);
            return Ok(None);
        }

        let output = record::build_record(&input, level, &self.config, Utc::now());
        let line = record::render(&output, &self.config).map_err(|e| {
            debug!("ログのシリアライズに失敗しました: {}", e);
            e
        })?;
        Ok(Some(line))
    }
}
