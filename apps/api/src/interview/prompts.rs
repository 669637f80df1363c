// Prompt templates for interview question generation.
// Title and description are normalized independently before composition.

const PROMPT_PREFIX: &str = "Create a list of questions for my interview with a";

/// Collapses each CR/LF line break to a single space and removes "•" bullet glyphs.
///
/// The result is not re-collapsed, so a bullet surrounded by spaces leaves a double space.
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace('\n', " ")
        .replace('•', "")
}

/// Composes the completion prompt from an already-trimmed title and description.
///
/// Callers reject the request before this point when both are empty; in that
/// case the bare prefix is returned.
pub fn build_prompt(job_title: &str, job_description: &str) -> String {
    match (job_title.is_empty(), job_description.is_empty()) {
        (false, false) => format!(
            "{PROMPT_PREFIX} {}, {}",
            normalize(job_title),
            normalize(job_description)
        ),
        (false, true) => format!("{PROMPT_PREFIX} {}", normalize(job_title)),
        (true, false) => format!(
            "{PROMPT_PREFIX} job description of {}",
            normalize(job_description)
        ),
        (true, true) => PROMPT_PREFIX.to_string(),
    }
}
