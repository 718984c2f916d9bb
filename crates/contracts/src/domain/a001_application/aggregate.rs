use crate::domain::a002_payment::aggregate::PaymentReceipt;
use crate::enums::Track;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Plain form sections
// ============================================================================
//
// Each section serializes into the flat submission payload next to the
// cascade-resolved ids, so field names are camelCase and must not collide
// with the cascade payload keys (`stateId`, `campusId`, ...).

/// Student personal details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalDetails {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub date_of_birth: Option<NaiveDate>,
    pub aadhaar_no: String,
    pub mobile: String,
    pub email: String,
}

/// Parent / guardian details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParentDetails {
    pub father_name: String,
    pub father_mobile: String,
    pub father_occupation: String,
    pub mother_name: String,
    pub mother_mobile: String,
    pub annual_income: Option<f64>,
}

/// One sibling row; the form keeps a list of them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiblingDetails {
    pub full_name: String,
    pub relation: String,
    pub class_name: String,
    pub institution: String,
}

/// Plain academic fields that sit next to the previous-school cascade
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AcademicDetails {
    pub previous_class: String,
    pub hall_ticket_no: String,
    pub marks_percentage: Option<f64>,
}

/// Fee concession requested at the time of sale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConcessionDetails {
    pub concession_type: String,
    pub amount: Option<f64>,
    pub reason: String,
    pub referred_by: String,
}

impl ConcessionDetails {
    pub fn is_requested(&self) -> bool {
        !self.concession_type.trim().is_empty()
    }
}

// ============================================================================
// Submission / overview
// ============================================================================

/// POST /api/applications body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    /// Set when an existing application is edited from the overview screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_no: Option<String>,
    pub track: Track,
    /// Flat object: cascade ids merged with plain section fields
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationResponse {
    pub application_no: String,
}

/// GET /api/applications/:application_no/overview
///
/// `data` holds the stored payload enriched with display labels under the
/// legacy key names (`cityName`, `branchName`, `schoolName`, ...). Some ids are
/// omitted, so a form re-opened from the overview must reconcile labels back
/// into ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationOverview {
    pub application_no: String,
    pub track: Track,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub data: Map<String, Value>,
    #[serde(default)]
    pub payments: Vec<PaymentReceipt>,
}

impl ApplicationOverview {
    /// Display string for a key, whatever JSON type it was stored as
    pub fn display_value(&self, key: &str) -> Option<String> {
        match self.data.get(key)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_string()),
            other => Some(other.to_string()),
        }
    }

    pub fn total_paid(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sections_use_camel_case_keys() {
        let personal = PersonalDetails {
            first_name: "Asha".into(),
            aadhaar_no: "1234".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&personal).unwrap();
        assert_eq!(value["firstName"], json!("Asha"));
        assert_eq!(value["aadhaarNo"], json!("1234"));
        assert!(value.get("first_name").is_none());
    }

    #[test]
    fn test_overview_display_value() {
        let mut data = Map::new();
        data.insert("cityName".into(), json!("Hyderabad"));
        data.insert("campusId".into(), json!(12));
        data.insert("remarks".into(), json!("  "));
        let overview = ApplicationOverview {
            application_no: "APP-1".into(),
            track: Track::School,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            data,
            payments: Vec::new(),
        };
        assert_eq!(overview.display_value("cityName").as_deref(), Some("Hyderabad"));
        assert_eq!(overview.display_value("campusId").as_deref(), Some("12"));
        assert_eq!(overview.display_value("remarks"), None);
        assert_eq!(overview.display_value("missing"), None);
    }
}
