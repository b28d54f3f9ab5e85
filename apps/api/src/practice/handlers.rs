//! Axum route handlers for the Practice API.
//!
//! Session completion is the one place the core progress computation runs:
//! upload audio → critique the transcript → evaluate streak and average →
//! persist the session row and the updated user fields.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::session::PracticeSessionRow;
use crate::practice::critique::Critique;
use crate::practice::progress::{average_score, evaluate_streak, StreakState};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;
const TREND_LENGTH: i64 = 30;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// The `metadata` part of the multipart session upload.
#[derive(Debug, Deserialize)]
pub struct SessionMetadata {
    pub transcript: String,
    pub pitch_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CompleteSessionResponse {
    pub session_id: Uuid,
    pub critique: Critique,
    pub new_streak: u32,
    pub new_average_score: u8,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub score: i16,
}

#[derive(Debug, Serialize)]
pub struct PracticeStatsResponse {
    pub current_streak: i32,
    pub last_practice_date: Option<NaiveDate>,
    pub average_score: i16,
    pub total_sessions: i32,
    /// Oldest-first scores of the most recent sessions, for the dashboard chart.
    pub trend: Vec<TrendPoint>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/practice/sessions (multipart)
///
/// Parts: `metadata` (JSON: transcript + optional pitch_id) and optionally
/// `audio` (the recording, stored to S3). The critique runs on the transcript;
/// the audio is kept only for playback.
pub async fn handle_complete_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<CompleteSessionResponse>, AppError> {
    let mut metadata: Option<SessionMetadata> = None;
    let mut audio: Option<(Vec<u8>, String)> = None; // (bytes, content type)

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("metadata") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable metadata part: {e}")))?;
                let parsed: SessionMetadata = serde_json::from_str(&text)
                    .map_err(|e| AppError::Validation(format!("Invalid metadata JSON: {e}")))?;
                metadata = Some(parsed);
            }
            Some("audio") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("audio/webm")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable audio part: {e}")))?;
                audio = Some((bytes.to_vec(), content_type));
            }
            _ => {} // unknown parts ignored
        }
    }

    let metadata =
        metadata.ok_or_else(|| AppError::Validation("metadata part is required".to_string()))?;
    if metadata.transcript.trim().is_empty() {
        return Err(AppError::Validation(
            "transcript cannot be empty".to_string(),
        ));
    }

    // Resolve the practiced script, if a pitch was named
    let pitch_text = match metadata.pitch_id {
        Some(pitch_id) => Some(load_pitch_text(&state, user_id, pitch_id).await?),
        None => None,
    };

    let session_id = Uuid::new_v4();

    // Store the recording before anything user-visible depends on it
    let audio_key = match audio {
        Some((bytes, content_type)) => {
            Some(upload_recording(&state, user_id, session_id, bytes, &content_type).await?)
        }
        None => None,
    };

    // Critique via the pluggable backend
    let critique = state
        .critic
        .critique(&metadata.transcript, pitch_text.as_deref())
        .await?;

    // Core progress computation: streak + running average
    let (current_streak, last_practice_date): (i32, Option<NaiveDate>) =
        sqlx::query_as("SELECT current_streak, last_practice_date FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    let today = Local::now().date_naive();
    let new_streak = evaluate_streak(
        &StreakState {
            last_practice_date,
            current_streak: current_streak.max(0) as u32,
        },
        today,
    );

    let prior_scores: Vec<(i16,)> = sqlx::query_as(
        "SELECT score FROM practice_sessions WHERE user_id = $1 ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    let mut scores: Vec<u8> = prior_scores.iter().map(|(s,)| *s as u8).collect();
    scores.push(critique.score);
    let new_average = average_score(&scores);

    sqlx::query(
        r#"
        INSERT INTO practice_sessions
            (id, user_id, pitch_id, transcript, audio_key, score,
             strengths, improvements, summary)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(session_id)
    .bind(user_id)
    .bind(metadata.pitch_id)
    .bind(&metadata.transcript)
    .bind(&audio_key)
    .bind(critique.score as i16)
    .bind(&critique.strengths)
    .bind(&critique.improvements)
    .bind(&critique.summary)
    .execute(&state.db)
    .await?;

    sqlx::query(
        r#"
        UPDATE users
        SET current_streak = $1,
            last_practice_date = $2,
            avg_score = $3,
            total_sessions = total_sessions + 1
        WHERE id = $4
        "#,
    )
    .bind(new_streak as i32)
    .bind(today)
    .bind(new_average as i16)
    .bind(user_id)
    .execute(&state.db)
    .await?;

    info!(
        "Session {} for user {}: score={}, streak {}→{}, avg={}",
        session_id, user_id, critique.score, current_streak, new_streak, new_average
    );

    Ok(Json(CompleteSessionResponse {
        session_id,
        critique,
        new_streak,
        new_average_score: new_average,
    }))
}

/// GET /api/v1/practice/sessions
pub async fn handle_list_sessions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<PracticeSessionRow>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0).max(0);

    let sessions = sqlx::query_as::<_, PracticeSessionRow>(
        r#"
        SELECT * FROM practice_sessions
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(sessions))
}

/// GET /api/v1/practice/stats
///
/// Dashboard payload: streak, average, total count, and a score trend over the
/// most recent sessions.
pub async fn handle_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PracticeStatsResponse>, AppError> {
    let user: Option<(i32, Option<NaiveDate>, i16, i32)> = sqlx::query_as(
        "SELECT current_streak, last_practice_date, avg_score, total_sessions \
         FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?;
    let (current_streak, last_practice_date, average_score, total_sessions) =
        user.ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    let mut recent: Vec<(DateTime<Utc>, i16)> = sqlx::query_as(
        r#"
        SELECT created_at, score FROM practice_sessions
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(TREND_LENGTH)
    .fetch_all(&state.db)
    .await?;
    recent.reverse(); // chart wants oldest first

    Ok(Json(PracticeStatsResponse {
        current_streak,
        last_practice_date,
        average_score,
        total_sessions,
        trend: recent
            .into_iter()
            .map(|(date, score)| TrendPoint { date, score })
            .collect(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Joins a pitch's sections into the script text the user was practicing.
async fn load_pitch_text(
    state: &AppState,
    user_id: Uuid,
    pitch_id: Uuid,
) -> Result<String, AppError> {
    let owned: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM pitches WHERE id = $1 AND user_id = $2")
            .bind(pitch_id)
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;
    if owned.is_none() {
        return Err(AppError::NotFound(format!("Pitch {pitch_id} not found")));
    }

    let sections: Vec<(String,)> = sqlx::query_as(
        "SELECT content FROM pitch_sections WHERE pitch_id = $1 ORDER BY position",
    )
    .bind(pitch_id)
    .fetch_all(&state.db)
    .await?;

    Ok(sections
        .into_iter()
        .map(|(content,)| content)
        .collect::<Vec<_>>()
        .join("\n\n"))
}

async fn upload_recording(
    state: &AppState,
    user_id: Uuid,
    session_id: Uuid,
    bytes: Vec<u8>,
    content_type: &str,
) -> Result<String, AppError> {
    let key = format!("recordings/{user_id}/{session_id}");
    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&key)
        .body(aws_sdk_s3::primitives::ByteStream::from(bytes))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Recording upload failed: {e}")))?;

    info!("Uploaded recording to s3://{}/{}", state.config.s3_bucket, key);
    Ok(key)
}
