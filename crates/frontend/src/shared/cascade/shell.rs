//! Form shell: merges resolved cascade ids with plain form sections into one
//! outbound record.

use super::error::PayloadError;
use super::resolver::CascadeResolver;
use serde::Serialize;
use serde_json::{Map, Value};

/// Collects payload parts; the first failure wins and later parts are ignored.
///
/// ```ignore
/// let payload = PayloadBuilder::new()
///     .cascade(&academic)
///     .cascade(&orientation)
///     .section(&personal)
///     .check(require_text("firstName", "First name", &personal.first_name))
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct PayloadBuilder {
    payload: Map<String, Value>,
    error: Option<PayloadError>,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flat `payload_key -> id` pairs from one resolver
    pub fn cascade(mut self, resolver: &CascadeResolver) -> Self {
        if self.error.is_some() {
            return self;
        }
        match resolver.resolved_payload() {
            Ok(ids) => self.payload.extend(ids),
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Plain section whose fields are merged into the top level
    pub fn section<T: Serialize>(mut self, section: &T) -> Self {
        if self.error.is_some() {
            return self;
        }
        match serde_json::to_value(section) {
            Ok(Value::Object(fields)) => self.payload.extend(fields),
            Ok(other) => {
                self.error = Some(PayloadError::Serialization(format!(
                    "expected an object, got {}",
                    other
                )))
            }
            Err(e) => self.error = Some(PayloadError::Serialization(e.to_string())),
        }
        self
    }

    /// Repeated section kept as an array under `key`
    pub fn list<T: Serialize>(mut self, key: &str, rows: &[T]) -> Self {
        if self.error.is_some() {
            return self;
        }
        match serde_json::to_value(rows) {
            Ok(value) => {
                self.payload.insert(key.to_string(), value);
            }
            Err(e) => self.error = Some(PayloadError::Serialization(e.to_string())),
        }
        self
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        if self.error.is_none() {
            self.payload.insert(key.to_string(), value.into());
        }
        self
    }

    /// Records a validation result
    pub fn check(mut self, result: Result<(), PayloadError>) -> Self {
        if self.error.is_none() {
            if let Err(e) = result {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn build(self) -> Result<Map<String, Value>, PayloadError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.payload),
        }
    }
}

fn invalid(field: &str, title: &str, message: &str) -> PayloadError {
    PayloadError::InvalidField {
        field: field.to_string(),
        title: title.to_string(),
        message: message.to_string(),
    }
}

pub fn require_text(field: &str, title: &str, value: &str) -> Result<(), PayloadError> {
    if value.trim().is_empty() {
        return Err(invalid(field, title, "this field is required"));
    }
    Ok(())
}

/// Indian mobile number: 10 digits starting with 6-9
pub fn require_mobile(field: &str, title: &str, value: &str) -> Result<(), PayloadError> {
    require_text(field, title, value)?;
    let digits = value.trim();
    let valid = digits.len() == 10
        && digits.chars().all(|c| c.is_ascii_digit())
        && matches!(digits.chars().next(), Some('6'..='9'));
    if !valid {
        return Err(invalid(field, title, "enter a 10-digit mobile number"));
    }
    Ok(())
}

/// Empty is accepted; otherwise exactly 12 digits
pub fn optional_aadhaar(field: &str, title: &str, value: &str) -> Result<(), PayloadError> {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        return Ok(());
    }
    if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(field, title, "Aadhaar number has 12 digits"));
    }
    Ok(())
}

pub fn optional_email(field: &str, title: &str, value: &str) -> Result<(), PayloadError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    let valid = match value.split_once('@') {
        Some((user, domain)) => !user.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid {
        return Err(invalid(field, title, "enter a valid e-mail address"));
    }
    Ok(())
}

pub fn percentage(field: &str, title: &str, value: Option<f64>) -> Result<(), PayloadError> {
    match value {
        Some(v) if !(0.0..=100.0).contains(&v) => {
            Err(invalid(field, title, "must be between 0 and 100"))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::cascade::level::LevelSpec;
    use crate::shared::cascade::probe::EntityKind;
    use crate::shared::cascade::resolver::CascadeSettings;
    use serde_json::json;

    const CITY_ONLY: &[LevelSpec] = &[LevelSpec {
        key: "city",
        title: "City",
        kind: EntityKind::City,
        parents: &[],
        required: true,
        payload_key: "cityId",
        saved_id_keys: &["cityId"],
        saved_label_keys: &["cityName"],
    }];

    fn city_resolver(selected: Option<&str>) -> CascadeResolver {
        let mut r = CascadeResolver::new(CITY_ONLY, CascadeSettings::default()).unwrap();
        let ticket = r.start().remove(0);
        r.on_options_loaded(&ticket, vec![json!({"id": 4, "name": "Vijayawada"})]);
        if let Some(label) = selected {
            r.select_level(0, label);
        }
        r
    }

    #[derive(Serialize)]
    struct Personal {
        first_name: &'static str,
    }

    #[test]
    fn test_build_merges_cascade_and_sections() {
        let payload = PayloadBuilder::new()
            .cascade(&city_resolver(Some("Vijayawada")))
            .section(&Personal { first_name: "Ravi" })
            .list("siblings", &[Personal { first_name: "Anu" }])
            .field("feeAmount", 42500.0)
            .build()
            .unwrap();
        assert_eq!(payload["cityId"], json!(4));
        assert_eq!(payload["first_name"], json!("Ravi"));
        assert_eq!(payload["siblings"][0]["first_name"], json!("Anu"));
        assert_eq!(payload["feeAmount"], json!(42500.0));
    }

    #[test]
    fn test_build_fails_fast_on_first_error() {
        let err = PayloadBuilder::new()
            .cascade(&city_resolver(None))
            .check(require_text("firstName", "First name", ""))
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("city"));
    }

    #[test]
    fn test_validators() {
        assert!(require_mobile("m", "Mobile", "9876543210").is_ok());
        assert!(require_mobile("m", "Mobile", "1234567890").is_err());
        assert!(require_mobile("m", "Mobile", "98765").is_err());
        assert!(optional_aadhaar("a", "Aadhaar", "").is_ok());
        assert!(optional_aadhaar("a", "Aadhaar", "1234 5678 9012").is_ok());
        assert!(optional_aadhaar("a", "Aadhaar", "1234").is_err());
        assert!(optional_email("e", "E-mail", "ravi@example.in").is_ok());
        assert!(optional_email("e", "E-mail", "ravi@").is_err());
        assert!(percentage("p", "Marks", Some(101.0)).is_err());
        assert!(percentage("p", "Marks", None).is_ok());
    }
}
