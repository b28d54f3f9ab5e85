use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One completed practice session: the transcript the user delivered, the
/// S3 key of the uploaded recording (if any), and the critique output.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PracticeSessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pitch_id: Option<Uuid>,
    pub transcript: String,
    pub audio_key: Option<String>,
    pub score: i16,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}
