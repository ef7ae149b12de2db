//! ログ入力モジュール

use crate::value::{Fields, LogValue};

/// ログ関数に渡す入力
///
/// 必須の`message`と、任意の追加フィールドからなる。文字列は
/// `{message: 文字列}`として扱われる。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogInput {
    pub message: String,
    pub fields: Fields,
}

impl LogInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: Fields::new(),
        }
    }

    /// 追加フィールドを設定
    pub fn field(mut self, key: impl Into<String>, value: impl Into<LogValue>) -> Self {
        self.fields.insert(key, value);
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        for (key, value) in fields {
            self.fields.insert(key, value);
        }
        self
    }
}

impl From<&str> for LogInput {
    fn from(message: &str) -> Self {
        LogInput::new(message)
    }
}

impl From<String> for LogInput {
    fn from(message: String) -> Self {
        LogInput::new(message)
    }
}

impl From<&String> for LogInput {
    fn from(message: &String) -> Self {
        LogInput::new(message.as_str())
    }
}
