use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meeting {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lead_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    /// One of "scheduled", "completed", "cancelled", "no_show".
    pub status: String,
    pub notes: Option<String>,
    pub outcome_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
