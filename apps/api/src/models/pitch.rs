use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PitchRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lead_id: Option<Uuid>,
    pub company_name: String,
    /// The raw company brief the pitch was generated from. NULL for manual pitches.
    pub brief_text: Option<String>,
    /// Serialized `CompanyProfile` from brief parsing. NULL for manual pitches.
    pub company_profile: Option<Value>,
    /// "generated" or "manual".
    pub source: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PitchSectionRow {
    pub id: Uuid,
    pub pitch_id: Uuid,
    /// One of the known section kinds (opener, value_proposition, proof_point,
    /// call_to_action).
    pub kind: String,
    pub content: String,
    pub position: i16,
}
