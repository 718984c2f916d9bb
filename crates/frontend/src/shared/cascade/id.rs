use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Backend identifier of one selectable option.
///
/// Kept exactly as it arrived: numbers stay numbers (with their original
/// textual form), strings stay strings. Nothing is parsed or reformatted, so
/// the id written to the payload is byte-for-byte the id the endpoint sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionId {
    Number(Number),
    Text(String),
}

impl OptionId {
    /// Accepts JSON numbers and non-blank strings
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(OptionId::Number(n.clone())),
            Value::String(s) if !s.trim().is_empty() => Some(OptionId::Text(s.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            OptionId::Number(n) => Value::Number(n.clone()),
            OptionId::Text(s) => Value::String(s.clone()),
        }
    }

    /// Textual form, used as the `<option value>` and for matching saved ids
    pub fn as_key(&self) -> String {
        match self {
            OptionId::Number(n) => n.to_string(),
            OptionId::Text(s) => s.clone(),
        }
    }

    /// `12` and `"12"` refer to the same option when they come from saved
    /// data, which stores ids with whatever JSON type the screen had at hand.
    pub fn matches_key(&self, key: &str) -> bool {
        match self {
            OptionId::Number(n) => n.to_string() == key.trim(),
            OptionId::Text(s) => s == key || s.trim() == key.trim(),
        }
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionId::Number(n) => write!(f, "{}", n),
            OptionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionId {
    fn from(value: i64) -> Self {
        OptionId::Number(Number::from(value))
    }
}

impl From<&str> for OptionId {
    fn from(value: &str) -> Self {
        OptionId::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ids_are_preserved_exactly() {
        let text = OptionId::from_value(&json!("007")).unwrap();
        assert_eq!(text.to_value(), json!("007"));
        assert_eq!(text.as_key(), "007");

        let number = OptionId::from_value(&json!(42)).unwrap();
        assert_eq!(number.to_value(), json!(42));
        assert_eq!(serde_json::to_string(&number).unwrap(), "42");
    }

    #[test]
    fn test_blank_and_structured_values_are_not_ids() {
        assert_eq!(OptionId::from_value(&json!("  ")), None);
        assert_eq!(OptionId::from_value(&json!(null)), None);
        assert_eq!(OptionId::from_value(&json!({"id": 1})), None);
        assert_eq!(OptionId::from_value(&json!(true)), None);
    }

    #[test]
    fn test_matches_key_across_json_types() {
        assert!(OptionId::from(12).matches_key("12"));
        assert!(OptionId::from(12).matches_key(" 12 "));
        assert!(!OptionId::from(12).matches_key("012"));
        assert!(OptionId::from("SBIN0001").matches_key("SBIN0001"));
        assert!(!OptionId::from("SBIN0001").matches_key("sbin0001"));
    }
}
