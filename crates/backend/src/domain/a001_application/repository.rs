use chrono::{DateTime, Utc};
use contracts::domain::a002_payment::aggregate::PaymentReceipt;
use contracts::enums::{PaymentMode, Track};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};
use serde_json::{Map, Value};
use uuid::Uuid;

mod application {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "a001_application")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub application_no: String,
        pub track: String,
        pub payload_json: String,
        pub created_at: chrono::DateTime<chrono::Utc>,
        pub updated_at: chrono::DateTime<chrono::Utc>,
        pub version: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

mod payment {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "a002_payment")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub receipt_id: String,
        pub application_no: String,
        pub mode: String,
        pub amount: f64,
        pub reference_no: String,
        pub bank_details_json: String,
        pub paid_at: chrono::DateTime<chrono::Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Stored application: track plus the flat payload exactly as submitted
#[derive(Debug, Clone, PartialEq)]
pub struct StoredApplication {
    pub application_no: String,
    pub track: Track,
    pub payload: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<application::Model> for StoredApplication {
    fn from(m: application::Model) -> Self {
        let payload = match serde_json::from_str::<Value>(&m.payload_json) {
            Ok(Value::Object(map)) => map,
            _ => {
                tracing::warn!("a001_application {}: payload is not a JSON object", m.application_no);
                Map::new()
            }
        };
        StoredApplication {
            track: Track::from_code(&m.track).unwrap_or(Track::School),
            application_no: m.application_no,
            payload,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<payment::Model> for PaymentReceipt {
    fn from(m: payment::Model) -> Self {
        PaymentReceipt {
            receipt_id: Uuid::parse_str(&m.receipt_id).unwrap_or_else(|_| Uuid::nil()),
            application_no: m.application_no,
            mode: PaymentMode::from_code(&m.mode).unwrap_or_default(),
            amount: m.amount,
            reference_no: m.reference_no,
            paid_at: m.paid_at,
        }
    }
}

// ============================================================================
// Applications
// ============================================================================

pub async fn find(
    db: &DatabaseConnection,
    application_no: &str,
) -> Result<Option<StoredApplication>, DbErr> {
    let model = application::Entity::find_by_id(application_no.to_string())
        .one(db)
        .await?;
    Ok(model.map(|m| m.into()))
}

/// Highest sequence among numbers starting with `prefix` (`SCH-2026-`), 0 if none.
/// Relies on the zero-padded sequence sorting the same way as text.
pub async fn last_sequence<C: ConnectionTrait>(db: &C, prefix: &str) -> Result<u64, DbErr> {
    let last = application::Entity::find()
        .filter(application::Column::ApplicationNo.starts_with(prefix))
        .order_by_desc(application::Column::ApplicationNo)
        .one(db)
        .await?;
    Ok(last
        .and_then(|m| m.application_no.get(prefix.len()..)?.parse::<u64>().ok())
        .unwrap_or(0))
}

pub async fn insert<C: ConnectionTrait>(db: &C, stored: &StoredApplication) -> Result<(), DbErr> {
    let active_model = application::ActiveModel {
        application_no: Set(stored.application_no.clone()),
        track: Set(stored.track.code().to_string()),
        payload_json: Set(Value::Object(stored.payload.clone()).to_string()),
        created_at: Set(stored.created_at),
        updated_at: Set(stored.updated_at),
        version: Set(1),
    };
    active_model.insert(db).await?;
    Ok(())
}

/// Replaces the payload; `false` when the application does not exist
pub async fn update_payload(
    db: &DatabaseConnection,
    application_no: &str,
    track: Track,
    payload: &Map<String, Value>,
) -> Result<bool, DbErr> {
    let Some(existing) = application::Entity::find_by_id(application_no.to_string())
        .one(db)
        .await?
    else {
        return Ok(false);
    };

    let version = existing.version;
    let mut active_model: application::ActiveModel = existing.into();
    active_model.track = Set(track.code().to_string());
    active_model.payload_json = Set(Value::Object(payload.clone()).to_string());
    active_model.updated_at = Set(Utc::now());
    active_model.version = Set(version + 1);
    active_model.update(db).await?;
    Ok(true)
}

/// Another writer already took the primary key
pub fn is_duplicate_key(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ============================================================================
// Payments
// ============================================================================

pub async fn list_payments(
    db: &DatabaseConnection,
    application_no: &str,
) -> Result<Vec<PaymentReceipt>, DbErr> {
    let models = payment::Entity::find()
        .filter(payment::Column::ApplicationNo.eq(application_no))
        .order_by_asc(payment::Column::PaidAt)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn insert_payment(
    db: &DatabaseConnection,
    receipt: &PaymentReceipt,
    bank_details: &Map<String, Value>,
) -> Result<(), DbErr> {
    let active_model = payment::ActiveModel {
        receipt_id: Set(receipt.receipt_id.to_string()),
        application_no: Set(receipt.application_no.clone()),
        mode: Set(receipt.mode.code().to_string()),
        amount: Set(receipt.amount),
        reference_no: Set(receipt.reference_no.clone()),
        bank_details_json: Set(Value::Object(bank_details.clone()).to_string()),
        paid_at: Set(receipt.paid_at),
    };
    active_model.insert(db).await?;
    Ok(())
}
