//! Axum route handlers for the Pitch API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::pitch::{PitchRow, PitchSectionRow};
use crate::pitches::company_brief::{parse_brief, CompanyProfile};
use crate::pitches::generator::{
    generate_pitch, GeneratePitchRequest, GeneratePitchResponse, SECTION_KINDS,
};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseBriefRequest {
    pub brief_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseBriefResponse {
    pub profile: CompanyProfile,
}

/// Manually authored pitch (no LLM involved).
#[derive(Debug, Deserialize)]
pub struct CreatePitchRequest {
    pub company_name: String,
    pub lead_id: Option<Uuid>,
    pub sections: Vec<ManualSection>,
}

#[derive(Debug, Deserialize)]
pub struct ManualSection {
    pub kind: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PitchDetailResponse {
    pub pitch: PitchRow,
    pub sections: Vec<PitchSectionRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/pitches/parse-brief
///
/// Parses a raw company brief and returns the structured profile.
/// Useful for previewing extraction before generating.
pub async fn handle_parse_brief(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(request): Json<ParseBriefRequest>,
) -> Result<Json<ParseBriefResponse>, AppError> {
    if request.brief_text.trim().is_empty() {
        return Err(AppError::Validation(
            "brief_text cannot be empty".to_string(),
        ));
    }

    let profile = parse_brief(&request.brief_text, &state.llm).await?;

    Ok(Json(ParseBriefResponse { profile }))
}

/// POST /api/v1/pitches/generate
///
/// Full generation pipeline: brief parse → voice calibration → LLM sections →
/// persist. Returns the pitch id, profile, and sections.
pub async fn handle_generate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<GeneratePitchRequest>,
) -> Result<Json<GeneratePitchResponse>, AppError> {
    if request.brief_text.trim().is_empty() {
        return Err(AppError::Validation(
            "brief_text cannot be empty".to_string(),
        ));
    }
    if let Some(lead_id) = request.lead_id {
        ensure_lead_owned(&state, user_id, lead_id).await?;
    }

    let response = generate_pitch(&state.db, &state.llm, user_id, request).await?;
    Ok(Json(response))
}

/// POST /api/v1/pitches
///
/// Stores a manually authored pitch. Section kinds are validated against the
/// same vocabulary the generator uses.
pub async fn handle_create_manual(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreatePitchRequest>,
) -> Result<Json<PitchDetailResponse>, AppError> {
    if request.company_name.trim().is_empty() {
        return Err(AppError::Validation(
            "company_name cannot be empty".to_string(),
        ));
    }
    if request.sections.is_empty() {
        return Err(AppError::Validation(
            "a pitch needs at least one section".to_string(),
        ));
    }
    for section in &request.sections {
        if !SECTION_KINDS.contains(&section.kind.as_str()) {
            return Err(AppError::Validation(format!(
                "unknown section kind '{}'",
                section.kind
            )));
        }
        if section.content.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "section '{}' has empty content",
                section.kind
            )));
        }
    }
    if let Some(lead_id) = request.lead_id {
        ensure_lead_owned(&state, user_id, lead_id).await?;
    }

    let pitch: PitchRow = sqlx::query_as(
        r#"
        INSERT INTO pitches (id, user_id, lead_id, company_name, source)
        VALUES ($1, $2, $3, $4, 'manual')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(request.lead_id)
    .bind(request.company_name.trim())
    .fetch_one(&state.db)
    .await?;

    let mut sections = Vec::with_capacity(request.sections.len());
    for (position, section) in request.sections.iter().enumerate() {
        let row: PitchSectionRow = sqlx::query_as(
            r#"
            INSERT INTO pitch_sections (id, pitch_id, kind, content, position)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(pitch.id)
        .bind(&section.kind)
        .bind(&section.content)
        .bind(position as i16)
        .fetch_one(&state.db)
        .await?;
        sections.push(row);
    }

    Ok(Json(PitchDetailResponse { pitch, sections }))
}

/// GET /api/v1/pitches
pub async fn handle_list_pitches(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<PitchRow>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0).max(0);

    let pitches = sqlx::query_as::<_, PitchRow>(
        r#"
        SELECT * FROM pitches
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

    Ok(Json(pitches))
}

/// GET /api/v1/pitches/:id
///
/// Returns the full pitch row and its sections in delivery order.
pub async fn handle_get_pitch(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(pitch_id): Path<Uuid>,
) -> Result<Json<PitchDetailResponse>, AppError> {
    let pitch = sqlx::query_as::<_, PitchRow>(
        "SELECT * FROM pitches WHERE id = $1 AND user_id = $2",
    )
    .bind(pitch_id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Pitch {pitch_id} not found")))?;

    let sections = sqlx::query_as::<_, PitchSectionRow>(
        "SELECT * FROM pitch_sections WHERE pitch_id = $1 ORDER BY position",
    )
    .bind(pitch_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(PitchDetailResponse { pitch, sections }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn ensure_lead_owned(
    state: &AppState,
    user_id: Uuid,
    lead_id: Uuid,
) -> Result<(), AppError> {
    let owned: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM leads WHERE id = $1 AND user_id = $2")
            .bind(lead_id)
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;
    if owned.is_none() {
        return Err(AppError::NotFound(format!("Lead {lead_id} not found")));
    }
    Ok(())
}
