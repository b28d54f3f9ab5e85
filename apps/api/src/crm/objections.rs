//! Axum route handlers for objections, including the LLM rebuttal suggestion.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::crm::prompts::{REBUTTAL_PROMPT_TEMPLATE, REBUTTAL_SYSTEM};
use crate::errors::AppError;
use crate::models::objection::Objection;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct CreateObjectionRequest {
    pub text: String,
    pub lead_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Structured output of the rebuttal LLM call.
#[derive(Debug, Serialize, Deserialize)]
pub struct RebuttalSuggestion {
    pub rebuttal: String,
    pub follow_up_question: String,
}

#[derive(Debug, Serialize)]
pub struct RebuttalResponse {
    pub objection: Objection,
    pub suggestion: RebuttalSuggestion,
}

/// POST /api/v1/objections
pub async fn handle_create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreateObjectionRequest>,
) -> Result<Json<Objection>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    if let Some(lead_id) = request.lead_id {
        let owned: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM leads WHERE id = $1 AND user_id = $2")
                .bind(lead_id)
                .bind(user_id)
                .fetch_optional(&state.db)
                .await?;
        if owned.is_none() {
            return Err(AppError::NotFound(format!("Lead {lead_id} not found")));
        }
    }

    let objection: Objection = sqlx::query_as(
        r#"
        INSERT INTO objections (id, user_id, lead_id, text)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(request.lead_id)
    .bind(request.text.trim())
    .fetch_one(&state.db)
    .await?;

    Ok(Json(objection))
}

/// GET /api/v1/objections
pub async fn handle_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Objection>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0).max(0);

    let objections = sqlx::query_as::<_, Objection>(
        r#"
        SELECT * FROM objections
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

    Ok(Json(objections))
}

/// DELETE /api/v1/objections/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(objection_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM objections WHERE id = $1 AND user_id = $2")
        .bind(objection_id)
        .bind(user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Objection {objection_id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/objections/:id/rebuttal
///
/// Asks the LLM for a suggested rebuttal and persists it on the objection row.
pub async fn handle_suggest_rebuttal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(objection_id): Path<Uuid>,
) -> Result<Json<RebuttalResponse>, AppError> {
    let objection: Objection =
        sqlx::query_as("SELECT * FROM objections WHERE id = $1 AND user_id = $2")
            .bind(objection_id)
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Objection {objection_id} not found")))?;

    let lead_context = match objection.lead_id {
        Some(lead_id) => {
            let lead: Option<(String, Option<String>)> = sqlx::query_as(
                "SELECT company_name, notes FROM leads WHERE id = $1 AND user_id = $2",
            )
            .bind(lead_id)
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;
            match lead {
                Some((company, notes)) => {
                    format!("Company: {company}. Notes: {}", notes.unwrap_or_default())
                }
                None => String::new(),
            }
        }
        None => String::new(),
    };

    let prompt = REBUTTAL_PROMPT_TEMPLATE
        .replace("{objection_text}", &objection.text)
        .replace("{lead_context}", &lead_context);

    let suggestion: RebuttalSuggestion = state
        .llm
        .call_json(&prompt, REBUTTAL_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Rebuttal suggestion failed: {e}")))?;

    let objection: Objection = sqlx::query_as(
        r#"
        UPDATE objections SET suggested_rebuttal = $1
        WHERE id = $2 AND user_id = $3
        RETURNING *
        "#,
    )
    .bind(&suggestion.rebuttal)
    .bind(objection_id)
    .bind(user_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(RebuttalResponse {
        objection,
        suggestion,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuttal_suggestion_deserializes_from_llm_shape() {
        let json = r#"{
            "rebuttal": "Fair concern. Most teams we talk to said the same before the pilot...",
            "follow_up_question": "What would a successful trial need to show you?"
        }"#;
        let suggestion: RebuttalSuggestion = serde_json::from_str(json).unwrap();
        assert!(suggestion.rebuttal.starts_with("Fair concern"));
        assert!(!suggestion.follow_up_question.is_empty());
    }

    #[test]
    fn test_rebuttal_missing_field_fails_deserialization() {
        let json = r#"{"rebuttal": "Sure."}"#;
        let result: Result<RebuttalSuggestion, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
