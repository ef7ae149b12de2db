//! 出力レコード構築モジュール

use crate::bigint;
use crate::config::LoggerConfig;
use crate::input::LogInput;
use crate::level::LogLevel;
use crate::value::{ErrorValue, Fields, LogValue};
use chrono::{DateTime, SecondsFormat, Utc};

/// 出力レコードへコピーしないフィールド名
pub const EXCLUDED_FIELDS: [&str; 3] = ["message", "xRequestId", "context"];

/// ISO-8601形式のタイムスタンプ（ミリ秒、UTC）
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// エラー値のフィールドをシリアライズ可能な形に変換
///
/// エラー自身のプロパティに`name`・`message`・`stack`（行の配列）を加えた
/// オブジェクトに置き換える。エラー以外の値はそのまま。
pub fn preprocess_errors(mut input: LogInput) -> LogInput {
    for (key, value) in input.fields.iter_mut() {
        if key == "message" {
            continue;
        }
        if let LogValue::Error(error) = value {
            let expanded = expand_error(std::mem::take(error));
            *value = LogValue::Object(expanded);
        }
    }
    input
}

fn expand_error(error: ErrorValue) -> Fields {
    let stack = error.stack_lines();
    let mut fields = error.properties;
    fields.insert("name", error.name);
    fields.insert("message", error.message);
    fields.insert("stack", stack);
    fields
}

/// 出力レコードを構築
///
/// 順序は`timestamp`・`logLevel`・`message`・`correlationId`（設定時のみ）・追加フィールド。
pub fn build_record(
    input: &LogInput,
    level: LogLevel,
    config: &LoggerConfig,
    at: DateTime<Utc>,
) -> Fields {
    let mut record = Fields::new();
    record.insert("timestamp", format_timestamp(at));
    record.insert("logLevel", level.as_str());
    record.insert("message", input.message.as_str());

    if let Some(id) = config.active_correlation_id() {
        record.insert("correlationId", id);
    }

    for (key, value) in input.fields.iter() {
        if EXCLUDED_FIELDS.contains(&key) {
            continue;
        }
        record.insert(key, value.clone());
    }

    record
}

/// 出力レコードを設定に従ってJSON文字列に変換
pub fn render(record: &Fields, config: &LoggerConfig) -> Result<String, serde_json::Error> {
    bigint::fields_to_json_string(record, config.big_int_support, config.compact_print)
}
