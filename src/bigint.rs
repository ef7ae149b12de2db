//! 多倍長整数対応のシリアライズモジュール
//!
//! `LogValue`をJSONへ書き出す際のビュー。多倍長整数は設定に応じて
//! `"<10進数>n"`形式の文字列に置き換えるか、シリアライズエラーにする。

use crate::value::{BigInt, ErrorValue, Fields, LogValue};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// 多倍長整数を`n`接尾辞付きの文字列に変換
pub fn replace_big_int(value: &BigInt) -> String {
    format!("{}n", value)
}

/// 値をJSON文字列に変換
///
/// `compact`がfalseなら2スペースインデントで整形する。
pub fn to_json_string(
    value: &LogValue,
    big_int_support: bool,
    compact: bool,
) -> Result<String, serde_json::Error> {
    write_json(&JsonView::new(value, big_int_support), compact)
}

/// フィールドマップをJSONオブジェクト文字列に変換
pub(crate) fn fields_to_json_string(
    fields: &Fields,
    big_int_support: bool,
    compact: bool,
) -> Result<String, serde_json::Error> {
    write_json(&FieldsView { fields, big_int_support }, compact)
}

fn write_json<T: Serialize>(view: &T, compact: bool) -> Result<String, serde_json::Error> {
    if compact {
        serde_json::to_string(view)
    } else {
        serde_json::to_string_pretty(view)
    }
}

/// 多倍長整数の扱いを指定したシリアライズビュー
#[derive(Debug, Clone, Copy)]
pub struct JsonView<'a> {
    value: &'a LogValue,
    big_int_support: bool,
}

impl<'a> JsonView<'a> {
    pub fn new(value: &'a LogValue, big_int_support: bool) -> Self {
        Self { value, big_int_support }
    }
}

impl Serialize for JsonView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            LogValue::Null => serializer.serialize_unit(),
            LogValue::Bool(b) => serializer.serialize_bool(*b),
            LogValue::Number(n) => n.serialize(serializer),
            LogValue::String(s) => serializer.serialize_str(s),
            LogValue::BigInt(n) => {
                if self.big_int_support {
                    serializer.serialize_str(&replace_big_int(n))
                } else {
                    Err(S::Error::custom(format!(
                        "多倍長整数はシリアライズできません: {}",
                        n
                    )))
                }
            }
            LogValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&JsonView::new(item, self.big_int_support))?;
                }
                seq.end()
            }
            LogValue::Object(fields) => FieldsView {
                fields,
                big_int_support: self.big_int_support,
            }
            .serialize(serializer),
            // 前処理されていないエラー値は自身のプロパティのみを出力する
            LogValue::Error(ErrorValue { properties, .. }) => FieldsView {
                fields: properties,
                big_int_support: self.big_int_support,
            }
            .serialize(serializer),
        }
    }
}

struct FieldsView<'a> {
    fields: &'a Fields,
    big_int_support: bool,
}

impl Serialize for FieldsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in self.fields.iter() {
            map.serialize_entry(key, &JsonView::new(value, self.big_int_support))?;
        }
        map.end()
    }
}

/// 多倍長整数を含む値はエラーになる
impl Serialize for LogValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        JsonView::new(self, false).serialize(serializer)
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FieldsView {
            fields: self,
            big_int_support: false,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_big_int() {
        assert_eq!(replace_big_int(&BigInt::from(123)), "123n");
        assert_eq!(replace_big_int(&BigInt::from(9007199254740991_i64)), "9007199254740991n");
        assert_eq!(replace_big_int(&BigInt::from(-42)), "-42n");
    }

    #[test]
    fn test_replace_big_int_beyond_i128() {
        let huge = BigInt::parse("-340282366920938463463374607431768211456000").unwrap();
        let value = LogValue::from(vec![LogValue::from(huge)]);
        assert_eq!(
            to_json_string(&value, true, true).unwrap(),
            r#"["-340282366920938463463374607431768211456000n"]"#
        );
    }

    #[test]
    fn test_other_values_unchanged() {
        let value = LogValue::from(serde_json::json!({"s": "hello", "n": 42, "z": null, "a": [1, 2, 3]}));
        let json = to_json_string(&value, true, true).unwrap();
        assert_eq!(json, r#"{"s":"hello","n":42,"z":null,"a":[1,2,3]}"#);
    }

    #[test]
    fn test_nested_big_int_replaced() {
        let nested: Fields = [("big", LogValue::big_int(123))].into_iter().collect();
        let mut fields = Fields::new();
        fields.insert("regular", 42);
        fields.insert("big", LogValue::big_int(9007199254740991_i64));
        fields.insert("nested", nested);

        let json = to_json_string(&LogValue::Object(fields), true, true).unwrap();
        assert_eq!(json, r#"{"regular":42,"big":"9007199254740991n","nested":{"big":"123n"}}"#);
    }

    #[test]
    fn test_big_int_in_array_replaced() {
        let value = LogValue::Array(vec![LogValue::big_int(1), LogValue::from(2)]);
        assert_eq!(to_json_string(&value, true, true).unwrap(), r#"["1n",2]"#);
    }

    #[test]
    fn test_big_int_without_support_fails() {
        let mut fields = Fields::new();
        fields.insert("deep", LogValue::Array(vec![LogValue::big_int(7)]));
        let result = to_json_string(&LogValue::Object(fields), false, true);
        assert!(result.is_err());
    }

    #[test]
    fn test_plain_serialize_is_strict() {
        assert!(serde_json::to_string(&LogValue::big_int(1)).is_err());
        assert_eq!(serde_json::to_string(&LogValue::from("x")).unwrap(), r#""x""#);
    }

    #[test]
    fn test_unprocessed_error_renders_properties_only() {
        let error = ErrorValue::new("Error", "boom").with_property("code", 500);
        let json = to_json_string(&LogValue::Error(error), false, true).unwrap();
        assert_eq!(json, r#"{"code":500}"#);
    }

    #[test]
    fn test_pretty_uses_two_space_indent() {
        let fields: Fields = [("a", 1)].into_iter().collect();
        let json = to_json_string(&LogValue::Object(fields), false, false).unwrap();
        assert_eq!(json, "{\n  \"a\": 1\n}");
    }
}
