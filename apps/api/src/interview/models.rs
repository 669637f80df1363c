use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};

use crate::interview::settings::GenerationSettings;

pub const DEFAULT_CAP: usize = 5;
pub const MAX_CAP: usize = 50;

/// Caller input. At least one field must hold non-whitespace text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterviewInput {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[cfg(test)]
impl InterviewInput {
    pub fn new(job_title: Option<&str>, job_description: Option<&str>) -> Self {
        Self {
            job_title: job_title.map(str::to_string),
            job_description: job_description.map(str::to_string),
        }
    }
}

impl InterviewInput {
    /// Trimmed title and description, empty when absent.
    pub fn trimmed(&self) -> (&str, &str) {
        (
            self.job_title.as_deref().map(str::trim).unwrap_or_default(),
            self.job_description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultOptions {
    /// Max number of questions to return. `None` means `DEFAULT_CAP`.
    #[serde(default)]
    pub cap: Option<usize>,
    /// Shuffle parsed questions before capping instead of keeping returned order.
    #[serde(default)]
    pub shuffle: bool,
}

impl ResultOptions {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap: Some(cap),
            shuffle: false,
        }
    }

    pub fn effective_cap(&self) -> usize {
        self.cap.unwrap_or(DEFAULT_CAP).min(MAX_CAP)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// 1-based, contiguous within a result.
    pub index: usize,
    pub question: String,
}

/// The request actually sent, echoed back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewRequest {
    pub prompt: String,
    pub settings: GenerationSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewResult {
    pub request: InterviewRequest,
    pub options: ResultOptions,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    pub questions: Vec<Question>,
}

impl InterviewResult {
    pub fn has_questions(&self) -> bool {
        !self.questions.is_empty()
    }

    /// All questions joined with a blank line between consecutive questions.
    pub fn question_text(&self) -> String {
        self.questions
            .iter()
            .map(|q| q.question.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis().try_into().unwrap_or(u64::MAX))
}
