use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::practice::critique::PitchCritic;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// S3 client for practice-audio recordings (MinIO locally, AWS in prod).
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable critique backend. Default: LlmPitchCritic. Handlers never
    /// talk to the LLM for critiques directly — only through this trait object.
    pub critic: Arc<dyn PitchCritic>,
}
