//! Interview question generation — orchestrates the full pipeline.
//!
//! Flow: validate input → resolve settings/options → build prompt →
//!       map request → completion call → parse choices → cap → result.
//!
//! All validation happens before the completion call, so invalid requests
//! never cost an external call.

use std::time::Instant;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::interview::adapter::{complete, map_settings};
use crate::interview::errors::InterviewError;
use crate::interview::models::{
    InterviewInput, InterviewRequest, InterviewResult, ResultOptions, DEFAULT_CAP,
};
use crate::interview::parser::parse_questions;
use crate::interview::prompts::build_prompt;
use crate::interview::random::RandomSource;
use crate::interview::settings::GenerationSettings;
use crate::llm_client::CompletionClient;

/// Runs one interview-question request.
///
/// `cancel` flips to `true` when the caller gives up; an in-flight completion
/// call is then abandoned and `InterviewError::Cancelled` is returned. A
/// dropped sender never cancels.
pub async fn generate_questions(
    client: &dyn CompletionClient,
    rng: &dyn RandomSource,
    input: &InterviewInput,
    settings: Option<&GenerationSettings>,
    options: Option<ResultOptions>,
    mut cancel: watch::Receiver<bool>,
) -> Result<InterviewResult, InterviewError> {
    let start = Instant::now();

    // Step 1: Validate input
    let (job_title, job_description) = input.trimmed();
    if job_title.is_empty() && job_description.is_empty() {
        return Err(InterviewError::InvalidInput);
    }

    // Step 2: Resolve settings and options
    let settings = settings
        .ok_or(InterviewError::MissingSettings)?
        .with_defaults();
    if settings.tunes_both_sampling_controls() {
        warn!(
            "Settings vary both temperature ({:?}) and top_p ({:?}); tune one and leave the other at 1.0",
            settings.temperature, settings.top_p
        );
    }
    let options = options.unwrap_or_else(|| ResultOptions::with_cap(DEFAULT_CAP));
    let cap = options.effective_cap();

    // Step 3: Prompt and wire request
    let prompt = build_prompt(job_title, job_description);
    let request = map_settings(&settings, &prompt)?;
    info!(
        "Requesting interview questions: model={}, cap={}, shuffle={}",
        settings.model, cap, options.shuffle
    );

    // Step 4: Completion call, abandoned on cancellation
    let response = tokio::select! {
        biased;
        _ = cancelled(&mut cancel) => {
            warn!("Interview question request cancelled during completion call");
            return Err(InterviewError::Cancelled);
        }
        response = complete(client, &request) => response?,
    };
    debug!(
        "Completion {} returned {} choice(s)",
        response.id.as_deref().unwrap_or("<no id>"),
        response.choices.len()
    );

    // Step 5: Parse and cap, re-indexing contiguously as questions are kept
    let mut questions = Vec::with_capacity(cap);
    for choice in &response.choices {
        if choice.finish_reason.as_deref() == Some("length") {
            debug!(
                "Choice {} hit the token limit; a trailing partial question is dropped",
                choice.index
            );
        }
        for mut question in parse_questions(&choice.text, options.shuffle, rng) {
            if questions.len() == cap {
                break;
            }
            question.index = questions.len() + 1;
            questions.push(question);
        }
    }

    let duration = start.elapsed();
    info!(
        "Generated {} interview question(s) in {}ms",
        questions.len(),
        duration.as_millis()
    );

    Ok(InterviewResult {
        request: InterviewRequest { prompt, settings },
        options,
        duration,
        questions,
    })
}

/// Resolves once the signal reads `true`; pends forever if the sender is gone.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|&c| c).await.is_err() {
        std::future::pending::<()>().await;
    }
}
