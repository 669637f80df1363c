//! Axum route handlers for the Interview API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::interview::engine::generate_questions;
use crate::interview::models::{InterviewInput, InterviewResult, ResultOptions};
use crate::interview::settings::{GenerationSettings, SettingsProfile};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InterviewQuestionsRequest {
    #[serde(flatten)]
    pub input: InterviewInput,
    /// Used only when `settings` is omitted.
    #[serde(default)]
    pub profile: Option<SettingsProfile>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub settings: Option<GenerationSettings>,
    #[serde(default)]
    pub options: Option<ResultOptions>,
}

#[derive(Debug, Serialize)]
pub struct InterviewQuestionsResponse {
    #[serde(flatten)]
    pub result: InterviewResult,
    pub has_questions: bool,
}

/// POST /api/v1/interview/questions
///
/// Generates a capped list of interview questions for a job title and/or description.
/// Explicit `settings` win over `profile`; with neither, the request is rejected.
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Json(request): Json<InterviewQuestionsRequest>,
) -> Result<Json<InterviewQuestionsResponse>, AppError> {
    let settings = match (request.settings, request.profile) {
        (Some(settings), _) => Some(settings),
        (None, Some(profile)) => {
            info!("Building {:?} settings profile", profile);
            Some(profile.build(
                request.user.as_deref().unwrap_or_default(),
                state.rng.as_ref(),
            ))
        }
        (None, None) => None,
    };

    let result = generate_questions(
        state.completion.as_ref(),
        state.rng.as_ref(),
        &request.input,
        settings.as_ref(),
        request.options,
        state.shutdown.clone(),
    )
    .await?;

    Ok(Json(InterviewQuestionsResponse {
        has_questions: result.has_questions(),
        result,
    }))
}
