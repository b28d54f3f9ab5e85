//! Axum route handlers for leads.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::lead::Lead;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

/// The lead pipeline states, in rough funnel order.
pub const LEAD_STATUSES: &[&str] = &["new", "contacted", "qualified", "won", "lost"];

#[derive(Debug, Deserialize)]
pub struct CreateLeadRequest {
    pub company_name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLeadRequest {
    pub status: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/leads
pub async fn handle_create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreateLeadRequest>,
) -> Result<Json<Lead>, AppError> {
    if request.company_name.trim().is_empty() {
        return Err(AppError::Validation(
            "company_name cannot be empty".to_string(),
        ));
    }

    let lead: Lead = sqlx::query_as(
        r#"
        INSERT INTO leads (id, user_id, company_name, contact_name, contact_email, website, status, notes)
        VALUES ($1, $2, $3, $4, $5, $6, 'new', $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(request.company_name.trim())
    .bind(&request.contact_name)
    .bind(&request.contact_email)
    .bind(&request.website)
    .bind(&request.notes)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(lead))
}

/// GET /api/v1/leads
pub async fn handle_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Lead>>, AppError> {
    if let Some(status) = &params.status {
        if !LEAD_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Validation(format!(
                "unknown lead status '{status}'"
            )));
        }
    }
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0).max(0);

    let leads = sqlx::query_as::<_, Lead>(
        r#"
        SELECT * FROM leads
        WHERE user_id = $1 AND ($2::text IS NULL OR status = $2)
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(user_id)
    .bind(&params.status)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(leads))
}

/// GET /api/v1/leads/:id
pub async fn handle_get(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(lead_id): Path<Uuid>,
) -> Result<Json<Lead>, AppError> {
    let lead = fetch_owned(&state, user_id, lead_id).await?;
    Ok(Json(lead))
}

/// PATCH /api/v1/leads/:id
pub async fn handle_update(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(lead_id): Path<Uuid>,
    Json(request): Json<UpdateLeadRequest>,
) -> Result<Json<Lead>, AppError> {
    if let Some(status) = &request.status {
        if !LEAD_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Validation(format!(
                "unknown lead status '{status}'"
            )));
        }
    }

    // Existence check first so a bad id is a 404, not a silent no-op
    fetch_owned(&state, user_id, lead_id).await?;

    let lead: Lead = sqlx::query_as(
        r#"
        UPDATE leads
        SET status = COALESCE($1, status),
            contact_name = COALESCE($2, contact_name),
            contact_email = COALESCE($3, contact_email),
            notes = COALESCE($4, notes),
            updated_at = now()
        WHERE id = $5 AND user_id = $6
        RETURNING *
        "#,
    )
    .bind(&request.status)
    .bind(&request.contact_name)
    .bind(&request.contact_email)
    .bind(&request.notes)
    .bind(lead_id)
    .bind(user_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(lead))
}

/// DELETE /api/v1/leads/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(lead_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM leads WHERE id = $1 AND user_id = $2")
        .bind(lead_id)
        .bind(user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Lead {lead_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn fetch_owned(state: &AppState, user_id: Uuid, lead_id: Uuid) -> Result<Lead, AppError> {
    sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1 AND user_id = $2")
        .bind(lead_id)
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lead {lead_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses_cover_the_funnel() {
        assert_eq!(LEAD_STATUSES.first(), Some(&"new"));
        assert!(LEAD_STATUSES.contains(&"won"));
        assert!(LEAD_STATUSES.contains(&"lost"));
    }

    #[test]
    fn test_update_request_allows_partial_bodies() {
        let request: UpdateLeadRequest =
            serde_json::from_str(r#"{"status": "qualified"}"#).unwrap();
        assert_eq!(request.status.as_deref(), Some("qualified"));
        assert!(request.notes.is_none());
    }
}
