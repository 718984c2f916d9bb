use crate::enums::Track;
use serde::{Deserialize, Serialize};

// ============================================================================
// Academic background (where the student studied before)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRecord {
    pub state_id: i64,
    pub state_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictRecord {
    pub district_id: i64,
    pub district_name: String,
    pub state_id: i64,
}

/// School and college types share one shape: plain `id` / `name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionTypeRecord {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolRecord {
    pub school_id: i64,
    pub school_name: String,
    pub district_id: i64,
    pub school_type_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeRecord {
    pub college_id: i64,
    pub college_name: String,
    pub district_id: i64,
    pub college_type_id: i64,
}

// ============================================================================
// Orientation (where and what the student is admitted into)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusRecord {
    pub campus_id: i64,
    pub campus_name: String,
    pub city_id: i64,
    pub track: Track,
    #[serde(default)]
    pub class_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub class_id: i64,
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationRecord {
    pub orientation_id: i64,
    pub orientation_name: String,
    pub campus_id: i64,
    pub class_id: i64,
    #[serde(default)]
    pub student_type_ids: Vec<String>,
}

/// Student types come back as `value` / `label` pairs with string ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentTypeRecord {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRecord {
    pub fee_id: i64,
    pub orientation_id: i64,
    pub student_type_id: String,
    pub amount: f64,
}

// ============================================================================
// Payment popup (bank the cheque / DD is drawn on)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRecord {
    pub org_id: i64,
    pub org_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRecord {
    pub bank_id: i64,
    pub bank_name: String,
    pub org_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankBranchRecord {
    /// IFSC-style code, kept as a string id
    pub branch_id: String,
    pub branch_name: String,
    pub bank_id: i64,
}
