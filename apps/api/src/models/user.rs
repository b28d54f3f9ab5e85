use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user row. The streak/average fields are the persisted half of the
/// practice-progress computation: read before each session, overwritten after.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Consecutive practice days. Never decremented except by reset to 1.
    pub current_streak: i32,
    /// Last day a practice session completed, truncated to midnight. NULL until
    /// the first-ever session.
    pub last_practice_date: Option<NaiveDate>,
    /// Rounded running average of all session scores, 0 until the first session.
    pub avg_score: i16,
    pub total_sessions: i32,
    pub created_at: DateTime<Utc>,
}
