//! Axum route handlers for meetings.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::meeting::Meeting;
use crate::state::AppState;

pub const MEETING_STATUSES: &[&str] = &["scheduled", "completed", "cancelled", "no_show"];

#[derive(Debug, Deserialize)]
pub struct CreateMeetingRequest {
    pub lead_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMeetingRequest {
    pub status: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub outcome_notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// When true, only meetings scheduled from now on, soonest first.
    pub upcoming: Option<bool>,
}

/// POST /api/v1/meetings
pub async fn handle_create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreateMeetingRequest>,
) -> Result<Json<Meeting>, AppError> {
    let lead: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM leads WHERE id = $1 AND user_id = $2")
            .bind(request.lead_id)
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;
    if lead.is_none() {
        return Err(AppError::NotFound(format!(
            "Lead {} not found",
            request.lead_id
        )));
    }

    let meeting: Meeting = sqlx::query_as(
        r#"
        INSERT INTO meetings (id, user_id, lead_id, scheduled_at, status, notes)
        VALUES ($1, $2, $3, $4, 'scheduled', $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(request.lead_id)
    .bind(request.scheduled_at)
    .bind(&request.notes)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(meeting))
}

/// GET /api/v1/meetings
pub async fn handle_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Meeting>>, AppError> {
    let meetings = if params.upcoming.unwrap_or(false) {
        sqlx::query_as::<_, Meeting>(
            r#"
            SELECT * FROM meetings
            WHERE user_id = $1 AND scheduled_at >= now() AND status = 'scheduled'
            ORDER BY scheduled_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&state.db)
        .await?
    } else {
        sqlx::query_as::<_, Meeting>(
            "SELECT * FROM meetings WHERE user_id = $1 ORDER BY scheduled_at DESC",
        )
        .bind(user_id)
        .fetch_all(&state.db)
        .await?
    };

    Ok(Json(meetings))
}

/// PATCH /api/v1/meetings/:id
pub async fn handle_update(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(meeting_id): Path<Uuid>,
    Json(request): Json<UpdateMeetingRequest>,
) -> Result<Json<Meeting>, AppError> {
    if let Some(status) = &request.status {
        if !MEETING_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Validation(format!(
                "unknown meeting status '{status}'"
            )));
        }
    }

    let meeting: Option<Meeting> = sqlx::query_as(
        r#"
        UPDATE meetings
        SET status = COALESCE($1, status),
            scheduled_at = COALESCE($2, scheduled_at),
            outcome_notes = COALESCE($3, outcome_notes)
        WHERE id = $4 AND user_id = $5
        RETURNING *
        "#,
    )
    .bind(&request.status)
    .bind(request.scheduled_at)
    .bind(&request.outcome_notes)
    .bind(meeting_id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?;

    meeting
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Meeting {meeting_id} not found")))
}

/// DELETE /api/v1/meetings/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(meeting_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM meetings WHERE id = $1 AND user_id = $2")
        .bind(meeting_id)
        .bind(user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Meeting {meeting_id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
