use crate::enums::PaymentMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// POST /api/applications/:application_no/payment body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubmission {
    pub mode: PaymentMode,
    pub amount: f64,
    #[serde(default)]
    pub reference_no: String,
    /// Organization / bank / branch ids for cheque and DD payments
    #[serde(default)]
    pub bank_details: Map<String, Value>,
}

/// Stored payment, echoed back in the application overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub receipt_id: Uuid,
    pub application_no: String,
    pub mode: PaymentMode,
    pub amount: f64,
    pub reference_no: String,
    pub paid_at: DateTime<Utc>,
}
