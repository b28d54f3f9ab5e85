use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An objection heard in the field, optionally tied to a lead.
/// `suggested_rebuttal` is filled in by the rebuttal endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Objection {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lead_id: Option<Uuid>,
    pub text: String,
    pub suggested_rebuttal: Option<String>,
    pub created_at: DateTime<Utc>,
}
