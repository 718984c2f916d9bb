use serde::{Deserialize, Serialize};

/// How an admission fee installment was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    Cash,
    Cheque,
    DemandDraft,
    Card,
    Upi,
}

impl PaymentMode {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Cheque => "cheque",
            PaymentMode::DemandDraft => "demand_draft",
            PaymentMode::Card => "card",
            PaymentMode::Upi => "upi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Cheque => "Cheque",
            PaymentMode::DemandDraft => "Demand draft",
            PaymentMode::Card => "Card",
            PaymentMode::Upi => "UPI",
        }
    }

    pub fn all() -> Vec<PaymentMode> {
        vec![
            PaymentMode::Cash,
            PaymentMode::Cheque,
            PaymentMode::DemandDraft,
            PaymentMode::Card,
            PaymentMode::Upi,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "cash" => Some(PaymentMode::Cash),
            "cheque" => Some(PaymentMode::Cheque),
            "demand_draft" => Some(PaymentMode::DemandDraft),
            "card" => Some(PaymentMode::Card),
            "upi" => Some(PaymentMode::Upi),
            _ => None,
        }
    }

    /// Cheque and DD payments are drawn on a bank, so the popup asks for
    /// organization, bank and branch.
    pub fn needs_bank(&self) -> bool {
        matches!(self, PaymentMode::Cheque | PaymentMode::DemandDraft)
    }
}

impl Default for PaymentMode {
    fn default() -> Self {
        PaymentMode::Cash
    }
}
