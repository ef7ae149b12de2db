//! ログ値モジュール
//!
//! 呼び出し側が渡す任意のフィールド値を表現する。JSONの値に加えて、
//! 多倍長整数とエラー値を区別して保持する。

use crate::error::InvalidBigInt;
use serde_json::Number;
use std::any::type_name;
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

/// フィールド値
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LogValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// 多倍長整数。`big_int_support`が無効な設定ではシリアライズに失敗する
    BigInt(BigInt),
    Array(Vec<LogValue>),
    Object(Fields),
    Error(ErrorValue),
}

impl LogValue {
    pub fn big_int(value: impl Into<BigInt>) -> Self {
        LogValue::BigInt(value.into())
    }
}

/// 任意精度の整数
///
/// 正規化した10進数表現で保持する（先頭の0なし、ゼロは`0`、負数のみ`-`付き）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    digits: String,
}

impl BigInt {
    /// 10進数文字列を解釈（先頭に`+`または`-`を1つ許可）
    pub fn parse(s: &str) -> Result<Self, InvalidBigInt> {
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidBigInt(s.to_string()));
        }

        let trimmed = body.trim_start_matches('0');
        let digits = match (trimmed.is_empty(), negative) {
            (true, _) => "0".to_string(),
            (false, true) => format!("-{}", trimmed),
            (false, false) => trimmed.to_string(),
        };
        Ok(Self { digits })
    }

    pub fn is_negative(&self) -> bool {
        self.digits.starts_with('-')
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl FromStr for BigInt {
    type Err = InvalidBigInt;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

macro_rules! impl_big_int_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                fn from(value: $t) -> Self {
                    Self { digits: value.to_string() }
                }
            }
        )*
    };
}

impl_big_int_from!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<BigInt> for LogValue {
    fn from(value: BigInt) -> Self {
        LogValue::BigInt(value)
    }
}

impl From<bool> for LogValue {
    fn from(value: bool) -> Self {
        LogValue::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for LogValue {
                fn from(value: $t) -> Self {
                    LogValue::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<i128> for LogValue {
    fn from(value: i128) -> Self {
        LogValue::BigInt(value.into())
    }
}

impl From<u128> for LogValue {
    fn from(value: u128) -> Self {
        LogValue::BigInt(value.into())
    }
}

impl From<f64> for LogValue {
    fn from(value: f64) -> Self {
        // NaNと無限大はJSONで表現できないためnullにする
        Number::from_f64(value).map_or(LogValue::Null, LogValue::Number)
    }
}

impl From<f32> for LogValue {
    fn from(value: f32) -> Self {
        LogValue::from(f64::from(value))
    }
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        LogValue::String(value.to_string())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        LogValue::String(value)
    }
}

impl<T: Into<LogValue>> From<Vec<T>> for LogValue {
    fn from(values: Vec<T>) -> Self {
        LogValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(LogValue::Null, Into::into)
    }
}

impl From<Fields> for LogValue {
    fn from(fields: Fields) -> Self {
        LogValue::Object(fields)
    }
}

impl From<ErrorValue> for LogValue {
    fn from(error: ErrorValue) -> Self {
        LogValue::Error(error)
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => LogValue::Null,
            Value::Bool(b) => LogValue::Bool(b),
            Value::Number(n) => LogValue::Number(n),
            Value::String(s) => LogValue::String(s),
            Value::Array(items) => LogValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => LogValue::Object(map.into_iter().collect()),
        }
    }
}

/// 挿入順を保持するフィールドマップ
///
/// キーは一意。既存キーへの挿入は元の位置で値を置き換える。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, LogValue)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドを挿入し、置き換えた場合は以前の値を返す
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<LogValue>) -> Option<LogValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&LogValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<LogValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LogValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut LogValue)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<LogValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

impl IntoIterator for Fields {
    type Item = (String, LogValue);
    type IntoIter = std::vec::IntoIter<(String, LogValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// エラー値
///
/// `name`・`message`・任意の`stack`と、エラー自身が持つ追加プロパティを保持する。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorValue {
    pub name: String,
    pub message: String,
    /// 複数行のスタックテキスト
    pub stack: Option<String>,
    pub properties: Fields,
}

impl ErrorValue {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
            properties: Fields::new(),
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<LogValue>) -> Self {
        self.properties.insert(key, value);
        self
    }

    /// Rustのエラーから変換
    ///
    /// 名前は型名の末尾、スタックは`source()`の連鎖から組み立てる。
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        let name = short_type_name(type_name::<E>());
        let message = err.to_string();

        let mut stack = format!("{}: {}", name, message);
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        Self::new(name, message).with_stack(stack)
    }

    /// スタックテキストを行ごとに分割（スタックがなければ空）
    pub fn stack_lines(&self) -> Vec<String> {
        self.stack
            .as_deref()
            .map(|stack| stack.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// `std::io::error::Error` → `Error`, `dyn core::error::Error` → `Error`
fn short_type_name(full: &str) -> String {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
        .trim_start_matches("dyn ")
        .to_string()
}
