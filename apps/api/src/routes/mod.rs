pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::crm::{leads, meetings, objections};
use crate::pitches::handlers as pitch_handlers;
use crate::practice::handlers as practice_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/register", post(auth_handlers::handle_register))
        .route("/api/v1/auth/login", post(auth_handlers::handle_login))
        // Pitches
        .route(
            "/api/v1/pitches/parse-brief",
            post(pitch_handlers::handle_parse_brief),
        )
        .route(
            "/api/v1/pitches/generate",
            post(pitch_handlers::handle_generate),
        )
        .route(
            "/api/v1/pitches",
            get(pitch_handlers::handle_list_pitches).post(pitch_handlers::handle_create_manual),
        )
        .route("/api/v1/pitches/:id", get(pitch_handlers::handle_get_pitch))
        // Practice
        .route(
            "/api/v1/practice/sessions",
            get(practice_handlers::handle_list_sessions)
                .post(practice_handlers::handle_complete_session),
        )
        .route(
            "/api/v1/practice/stats",
            get(practice_handlers::handle_stats),
        )
        // CRM: leads
        .route(
            "/api/v1/leads",
            get(leads::handle_list).post(leads::handle_create),
        )
        .route(
            "/api/v1/leads/:id",
            get(leads::handle_get)
                .patch(leads::handle_update)
                .delete(leads::handle_delete),
        )
        // CRM: meetings
        .route(
            "/api/v1/meetings",
            get(meetings::handle_list).post(meetings::handle_create),
        )
        .route(
            "/api/v1/meetings/:id",
            patch(meetings::handle_update).delete(meetings::handle_delete),
        )
        // CRM: objections
        .route(
            "/api/v1/objections",
            get(objections::handle_list).post(objections::handle_create),
        )
        .route("/api/v1/objections/:id", delete(objections::handle_delete))
        .route(
            "/api/v1/objections/:id/rebuttal",
            post(objections::handle_suggest_rebuttal),
        )
        .with_state(state)
}
