use crate::shared::api_utils::post_json;
use crate::shared::cascade::shell::require_text;
use crate::shared::cascade::{CascadeResolver, PayloadBuilder, PayloadError};
use contracts::domain::a002_payment::aggregate::{PaymentReceipt, PaymentSubmission};
use contracts::enums::PaymentMode;
use serde_json::Map;

/// Validates the popup fields and builds the request body.
///
/// The bank cascade only contributes to the body for cheque and DD payments;
/// for other modes it is ignored even if partly filled.
pub fn build_payment(
    mode: PaymentMode,
    amount: Option<f64>,
    reference_no: &str,
    bank: &CascadeResolver,
) -> Result<PaymentSubmission, PayloadError> {
    let amount = match amount {
        Some(a) if a > 0.0 => a,
        _ => {
            return Err(PayloadError::InvalidField {
                field: "amount".to_string(),
                title: "Amount".to_string(),
                message: "enter an amount greater than zero".to_string(),
            })
        }
    };
    if mode != PaymentMode::Cash {
        require_text("referenceNo", reference_title(mode), reference_no)?;
    }

    let bank_details = if mode.needs_bank() {
        PayloadBuilder::new().cascade(bank).build()?
    } else {
        Map::new()
    };

    Ok(PaymentSubmission {
        mode,
        amount,
        reference_no: reference_no.trim().to_string(),
        bank_details,
    })
}

pub fn reference_title(mode: PaymentMode) -> &'static str {
    match mode {
        PaymentMode::Cash => "Receipt book number",
        PaymentMode::Cheque => "Cheque number",
        PaymentMode::DemandDraft => "DD number",
        PaymentMode::Card => "Card transaction id",
        PaymentMode::Upi => "UPI reference",
    }
}

pub async fn submit_payment(
    application_no: &str,
    payment: &PaymentSubmission,
) -> Result<PaymentReceipt, String> {
    let path = format!(
        "/api/applications/{}/payment",
        urlencoding::encode(application_no)
    );
    post_json(&path, payment).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_payment::levels::BANK_LEVELS;
    use crate::shared::cascade::CascadeSettings;
    use serde_json::json;

    fn bank_resolver(complete: bool) -> CascadeResolver {
        let mut r = CascadeResolver::new(BANK_LEVELS, CascadeSettings::default()).unwrap();
        let ticket = r.start().remove(0);
        r.on_options_loaded(&ticket, vec![json!({"orgId": 1, "orgName": "Sri Vidya Trust"})]);
        let ticket = r.select_level(0, "Sri Vidya Trust").fetches.remove(0);
        r.on_options_loaded(&ticket, vec![json!({"bankId": 5, "bankName": "State Bank"})]);
        let ticket = r.select_level(1, "State Bank").fetches.remove(0);
        r.on_options_loaded(
            &ticket,
            vec![json!({"branchId": "SBIN0001234", "branchName": "Ameerpet"})],
        );
        if complete {
            r.select_level(2, "Ameerpet");
        }
        r
    }

    #[test]
    fn test_cash_ignores_bank_cascade() {
        let payment = build_payment(PaymentMode::Cash, Some(5000.0), "", &bank_resolver(false)).unwrap();
        assert!(payment.bank_details.is_empty());
        assert_eq!(payment.amount, 5000.0);
    }

    #[test]
    fn test_cheque_carries_bank_ids() {
        let payment =
            build_payment(PaymentMode::Cheque, Some(20000.0), " 004512 ", &bank_resolver(true)).unwrap();
        assert_eq!(payment.reference_no, "004512");
        assert_eq!(payment.bank_details["organizationId"], json!(1));
        assert_eq!(payment.bank_details["bankId"], json!(5));
        assert_eq!(payment.bank_details["bankBranchId"], json!("SBIN0001234"));
    }

    #[test]
    fn test_cheque_without_branch_is_rejected() {
        let err = build_payment(PaymentMode::DemandDraft, Some(100.0), "77", &bank_resolver(false))
            .unwrap_err();
        assert_eq!(err.field(), Some("bankBranch"));
    }

    #[test]
    fn test_amount_and_reference_are_required() {
        let bank = bank_resolver(true);
        assert_eq!(
            build_payment(PaymentMode::Cash, None, "", &bank).unwrap_err().field(),
            Some("amount")
        );
        assert_eq!(
            build_payment(PaymentMode::Upi, Some(10.0), " ", &bank).unwrap_err().field(),
            Some("referenceNo")
        );
    }
}
