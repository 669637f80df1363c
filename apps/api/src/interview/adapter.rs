//! Maps generation settings onto the completion wire request and makes the call.

use crate::interview::errors::InterviewError;
use crate::interview::settings::GenerationSettings;
use crate::llm_client::{CompletionClient, CompletionRequest, CompletionResponse};

/// Builds the completion request. Max tokens, temperature and top-p must be set;
/// a missing one is a configuration error, never silently defaulted.
pub fn map_settings(
    settings: &GenerationSettings,
    prompt: &str,
) -> Result<CompletionRequest, InterviewError> {
    Ok(CompletionRequest {
        model: settings.model.clone(),
        prompt: prompt.to_string(),
        echo: false,
        frequency_penalty: settings.frequency_penalty,
        max_tokens: settings
            .max_tokens
            .ok_or(InterviewError::IncompleteSettings("max_tokens"))?,
        n: 1,
        presence_penalty: settings.presence_penalty,
        stream: false,
        temperature: settings
            .temperature
            .ok_or(InterviewError::IncompleteSettings("temperature"))?,
        top_p: settings
            .top_p
            .ok_or(InterviewError::IncompleteSettings("top_p"))?,
        user: settings.user.clone(),
    })
}

/// Invokes the completion call. Errors are passed through untouched.
pub async fn complete(
    client: &dyn CompletionClient,
    request: &CompletionRequest,
) -> Result<CompletionResponse, InterviewError> {
    Ok(client.create_completion(request).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_copies_every_settings_field() {
        let settings = GenerationSettings {
            model: "davinci-002".to_string(),
            frequency_penalty: 0.31,
            presence_penalty: 0.62,
            max_tokens: Some(222),
            temperature: Some(0.44),
            top_p: Some(1.0),
            user: "user-99".to_string(),
        };
        let request = map_settings(&settings, "the prompt").unwrap();

        assert_eq!(request.model, settings.model);
        assert_eq!(request.frequency_penalty, settings.frequency_penalty);
        assert_eq!(request.presence_penalty, settings.presence_penalty);
        assert_eq!(Some(request.max_tokens), settings.max_tokens);
        assert_eq!(Some(request.temperature), settings.temperature);
        assert_eq!(Some(request.top_p), settings.top_p);
        assert_eq!(request.user, settings.user);
        assert_eq!(request.prompt, "the prompt");
    }

    #[test]
    fn test_mapping_fixes_echo_stream_and_n() {
        let request = map_settings(&GenerationSettings::stable("u"), "p").unwrap();
        assert!(!request.echo);
        assert!(!request.stream);
        assert_eq!(request.n, 1);
    }

    #[test]
    fn test_mapping_rejects_missing_max_tokens() {
        let settings = GenerationSettings {
            max_tokens: None,
            ..GenerationSettings::stable("u")
        };
        assert!(matches!(
            map_settings(&settings, "p"),
            Err(InterviewError::IncompleteSettings("max_tokens"))
        ));
    }

    #[test]
    fn test_mapping_rejects_missing_temperature() {
        let settings = GenerationSettings {
            temperature: None,
            ..GenerationSettings::stable("u")
        };
        assert!(matches!(
            map_settings(&settings, "p"),
            Err(InterviewError::IncompleteSettings("temperature"))
        ));
    }

    #[test]
    fn test_mapping_rejects_missing_top_p() {
        let settings = GenerationSettings {
            top_p: None,
            ..GenerationSettings::stable("u")
        };
        assert!(matches!(
            map_settings(&settings, "p"),
            Err(InterviewError::IncompleteSettings("top_p"))
        ));
    }
}
