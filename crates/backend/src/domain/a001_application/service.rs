use super::repository::{self, StoredApplication};
use crate::domain::catalog::Catalog;
use chrono::{Datelike, Utc};
use contracts::domain::a001_application::aggregate::{ApplicationOverview, ApplicationSubmission};
use contracts::domain::a002_payment::aggregate::{PaymentReceipt, PaymentSubmission};
use contracts::enums::Track;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

/// Inserts racing for the same number are retried this many times in total
const MAX_NUMBER_ATTEMPTS: usize = 3;

/// `SCH-2026-`; numbering restarts for every track and year
pub fn application_prefix(track: Track, year: i32) -> String {
    let code = match track {
        Track::School => "SCH",
        Track::College => "COL",
    };
    format!("{}-{}-", code, year)
}

/// `SCH-2026-00042` / `COL-2026-00007`
pub fn format_application_no(track: Track, year: i32, sequence: u64) -> String {
    format!("{}{:05}", application_prefix(track, year), sequence)
}

/// Request-level problems reported back as 400
pub fn validate_submission(submission: &ApplicationSubmission) -> Result<(), String> {
    if submission.payload.is_empty() {
        return Err("payload is empty".to_string());
    }
    Ok(())
}

pub fn validate_payment(payment: &PaymentSubmission) -> Result<(), String> {
    if !(payment.amount > 0.0) {
        return Err("amount must be greater than zero".to_string());
    }
    if payment.mode.needs_bank() && payment.bank_details.is_empty() {
        return Err(format!(
            "{} payments need organization, bank and branch",
            payment.mode.display_name()
        ));
    }
    Ok(())
}

/// Creates a new application, or replaces the payload of an existing one.
///
/// Returns `None` when an application number is given but not stored.
pub async fn submit(
    db: &DatabaseConnection,
    submission: ApplicationSubmission,
) -> anyhow::Result<Option<String>> {
    if let Some(application_no) = submission.application_no.as_deref() {
        let updated =
            repository::update_payload(db, application_no, submission.track, &submission.payload)
                .await?;
        if updated {
            tracing::info!("Application {} updated", application_no);
            return Ok(Some(application_no.to_string()));
        }
        tracing::warn!("Application {} not found for update", application_no);
        return Ok(None);
    }

    let now = Utc::now();
    let prefix = application_prefix(submission.track, now.year());
    let mut attempt = 1;
    loop {
        let txn = db.begin().await?;
        let sequence = repository::last_sequence(&txn, &prefix).await? + 1;
        let stored = StoredApplication {
            application_no: format_application_no(submission.track, now.year(), sequence),
            track: submission.track,
            payload: submission.payload.clone(),
            created_at: now,
            updated_at: now,
        };
        match repository::insert(&txn, &stored).await {
            Ok(()) => {
                txn.commit().await?;
                tracing::info!(
                    "Application {} created ({} fields)",
                    stored.application_no,
                    stored.payload.len()
                );
                return Ok(Some(stored.application_no));
            }
            Err(e) if repository::is_duplicate_key(&e) && attempt < MAX_NUMBER_ATTEMPTS => {
                tracing::warn!(
                    "Application number {} already taken, retrying",
                    stored.application_no
                );
                txn.rollback().await?;
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Stored payload with catalog labels, plus payments
pub async fn overview(
    db: &DatabaseConnection,
    catalog: &Catalog,
    application_no: &str,
) -> anyhow::Result<Option<ApplicationOverview>> {
    let Some(stored) = repository::find(db, application_no).await? else {
        return Ok(None);
    };
    let payments = repository::list_payments(db, application_no).await?;

    let mut data = stored.payload;
    catalog.enrich_overview(&mut data);

    Ok(Some(ApplicationOverview {
        application_no: stored.application_no,
        track: stored.track,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
        data,
        payments,
    }))
}

/// `None` when the application does not exist
pub async fn record_payment(
    db: &DatabaseConnection,
    application_no: &str,
    payment: PaymentSubmission,
) -> anyhow::Result<Option<PaymentReceipt>> {
    if repository::find(db, application_no).await?.is_none() {
        return Ok(None);
    }

    let receipt = PaymentReceipt {
        receipt_id: Uuid::new_v4(),
        application_no: application_no.to_string(),
        mode: payment.mode,
        amount: payment.amount,
        reference_no: payment.reference_no,
        paid_at: Utc::now(),
    };
    repository::insert_payment(db, &receipt, &payment.bank_details).await?;
    tracing::info!(
        "Payment {} of {} ({}) recorded for {}",
        receipt.receipt_id,
        receipt.amount,
        receipt.mode.code(),
        application_no
    );
    Ok(Some(receipt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use contracts::enums::PaymentMode;
    use serde_json::{json, Map, Value};

    fn submission(application_no: Option<&str>, payload: Value) -> ApplicationSubmission {
        ApplicationSubmission {
            application_no: application_no.map(str::to_string),
            track: Track::School,
            payload: payload.as_object().cloned().unwrap_or_else(Map::new),
        }
    }

    #[test]
    fn test_application_no_format() {
        assert_eq!(format_application_no(Track::School, 2026, 42), "SCH-2026-00042");
        assert_eq!(format_application_no(Track::College, 2026, 7), "COL-2026-00007");
    }

    #[test]
    fn test_validate_payment() {
        let mut payment = PaymentSubmission {
            mode: PaymentMode::Cheque,
            amount: 1000.0,
            reference_no: "004512".into(),
            bank_details: Map::new(),
        };
        assert!(validate_payment(&payment).is_err());
        payment.bank_details.insert("bankId".into(), json!(11));
        assert!(validate_payment(&payment).is_ok());
        payment.amount = 0.0;
        assert!(validate_payment(&payment).is_err());
    }

    #[tokio::test]
    async fn test_submit_then_update() {
        let db = connect_in_memory().await.unwrap();
        let no = submit(&db, submission(None, json!({"firstName": "Asha", "schoolId": 9002})))
            .await
            .unwrap()
            .unwrap();
        assert!(no.starts_with("SCH-"));
        assert!(no.ends_with("-00001"));

        let same = submit(&db, submission(Some(&no), json!({"firstName": "Asha Rani"})))
            .await
            .unwrap();
        assert_eq!(same.as_deref(), Some(no.as_str()));

        let stored = repository::find(&db, &no).await.unwrap().unwrap();
        assert_eq!(stored.payload["firstName"], json!("Asha Rani"));

        let missing = submit(&db, submission(Some("SCH-1999-00001"), json!({"a": 1})))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    fn stored(application_no: &str, track: Track) -> StoredApplication {
        let now = Utc::now();
        StoredApplication {
            application_no: application_no.to_string(),
            track,
            payload: Map::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_numbers_continue_per_track_and_year() {
        let db = connect_in_memory().await.unwrap();
        let year = Utc::now().year();
        for row in [
            stored(&format_application_no(Track::School, year, 5), Track::School),
            stored(&format_application_no(Track::School, 2020, 9), Track::School),
            stored(&format_application_no(Track::College, year, 40), Track::College),
        ] {
            repository::insert(&db, &row).await.unwrap();
        }

        let no = submit(&db, submission(None, json!({"firstName": "Ravi"})))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(no, format_application_no(Track::School, year, 6));

        let prefix = application_prefix(Track::School, 2020);
        assert_eq!(repository::last_sequence(&db, &prefix).await.unwrap(), 9);
        let prefix = application_prefix(Track::College, 2019);
        assert_eq!(repository::last_sequence(&db, &prefix).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_submits_get_distinct_numbers() {
        let db = connect_in_memory().await.unwrap();
        let (a, b) = tokio::join!(
            submit(&db, submission(None, json!({"firstName": "Asha"}))),
            submit(&db, submission(None, json!({"firstName": "Ravi"}))),
        );
        let a = a.unwrap().unwrap();
        let b = b.unwrap().unwrap();
        assert_ne!(a, b);
        assert!(repository::find(&db, &a).await.unwrap().is_some());
        assert!(repository::find(&db, &b).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_taken_number_is_a_duplicate_key() {
        let db = connect_in_memory().await.unwrap();
        let row = stored("SCH-2026-00001", Track::School);
        repository::insert(&db, &row).await.unwrap();
        let err = repository::insert(&db, &row).await.unwrap_err();
        assert!(repository::is_duplicate_key(&err));
    }

    #[tokio::test]
    async fn test_overview_enriches_and_lists_payments() {
        let db = connect_in_memory().await.unwrap();
        let catalog = Catalog::embedded().unwrap();
        let no = submit(&db, submission(None, json!({"cityId": 1, "campusId": 101})))
            .await
            .unwrap()
            .unwrap();

        let payment = PaymentSubmission {
            mode: PaymentMode::Cash,
            amount: 5000.0,
            reference_no: String::new(),
            bank_details: Map::new(),
        };
        record_payment(&db, &no, payment).await.unwrap().unwrap();

        let overview = overview(&db, &catalog, &no).await.unwrap().unwrap();
        assert_eq!(overview.data["cityName"], json!("Hyderabad"));
        assert_eq!(overview.data["branchName"], json!("Madhapur"));
        assert!(overview.data.get("campusId").is_none());
        assert_eq!(overview.payments.len(), 1);
        assert_eq!(overview.total_paid(), 5000.0);
    }

    #[tokio::test]
    async fn test_payment_for_unknown_application() {
        let db = connect_in_memory().await.unwrap();
        let payment = PaymentSubmission {
            mode: PaymentMode::Upi,
            amount: 10.0,
            reference_no: "UPI-1".into(),
            bank_details: Map::new(),
        };
        assert!(record_payment(&db, "SCH-2026-99999", payment)
            .await
            .unwrap()
            .is_none());
    }
}
