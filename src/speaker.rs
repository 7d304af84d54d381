use tracing::{error, warn};

use crate::api::{ApiClient, ApiFailure, Message};
use crate::fallback;
use crate::prompt::{self, PromptMode};
use crate::reply::{self, ExtractionRules, SPEAKER_REPLY_MIN_LEN};
use crate::speakers::SpeakerConfig;

#[derive(Debug)]
pub enum Response {
    Live(String),
    Fallback {
        reason: ApiFailure,
        quote: &'static str,
    },
}

impl Response {
    /// Lines for stdout: the marker (on fallback) followed by the result.
    pub fn output_lines(&self) -> Vec<String> {
        match self {
            Response::Live(text) => vec![text.clone()],
            Response::Fallback { reason, quote } => {
                vec![format!("API_FAILED:{}", reason.code()), quote.to_string()]
            }
        }
    }
}

async fn live_reply(
    api: &ApiClient,
    speaker: &SpeakerConfig,
    topic: &str,
    context: &str,
    mode: &PromptMode,
) -> Result<String, ApiFailure> {
    let request = api.request(
        vec![
            Message::system(prompt::build_system_prompt(speaker, topic, context, mode)),
            Message::user(prompt::build_user_message(speaker, topic)),
        ],
        speaker.temperature,
    );

    let candidate = api
        .complete(&request)
        .await?
        .reply(&ExtractionRules::default())?
        .unwrap_or_default();

    reply::accept_reply(&candidate, SPEAKER_REPLY_MIN_LEN)
        .ok_or(ApiFailure::InvalidOrTooShortContent(candidate))
}

pub async fn respond(
    api: &ApiClient,
    speaker: &SpeakerConfig,
    topic: &str,
    context: &str,
    mode: &PromptMode,
) -> Response {
    match live_reply(api, speaker, topic, context, mode).await {
        Ok(text) => Response::Live(text),
        Err(reason) => {
            error!("{reason}");
            let quote = fallback::fallback_quote(&speaker.name, topic, context);
            warn!("Using fallback response for {}", speaker.name);
            Response::Fallback { reason, quote }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DEFAULT_MODEL;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use std::time::Duration;

    const KEY: &str = "test-key-123456";

    fn einstein() -> SpeakerConfig {
        SpeakerConfig {
            name: "Albert Einstein".to_owned(),
            prompt_template: "You are Albert Einstein.".to_owned(),
            temperature: 0.6,
        }
    }

    fn client(server: &MockServer, key: Option<&str>) -> ApiClient {
        ApiClient::new(
            server.url("/v1/chat/completions"),
            DEFAULT_MODEL,
            key.map(str::to_owned),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    async fn respond_with(body: &'static str) -> Response {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST);
            then.status(200)
                .header("content-type", "application/json")
                .body(body);
        });

        respond(
            &client(&server, Some(KEY)),
            &einstein(),
            "Physics",
            "",
            &PromptMode::OpenDebate,
        )
        .await
    }

    #[tokio::test]
    async fn sends_prompt_and_temperature() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .body_contains("Start the debate about Physics as Albert Einstein.")
                .body_contains("Respond as Albert Einstein about Physics")
                .body_contains("\"temperature\":0.6");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"choices":[{"message":{"content":"Relativity changes everything we know."}}]}"#);
        });

        let response = respond(
            &client(&server, Some(KEY)),
            &einstein(),
            "Physics",
            "",
            &PromptMode::OpenDebate,
        )
        .await;

        mock.assert();
        assert_eq!(
            response.output_lines(),
            vec!["Relativity changes everything we know.".to_owned()]
        );
    }

    #[tokio::test]
    async fn reasoning_content_is_mined_when_content_is_empty() {
        let response = respond_with(
            r#"{"choices":[{"message":{"content":"","reasoning_content":"Okay, he would talk about curiosity.\nCuriosity is the engine of every discovery we make."}}]}"#,
        )
        .await;

        assert!(matches!(
            response,
            Response::Live(ref text) if text == "Curiosity is the engine of every discovery we make."
        ));
    }

    #[tokio::test]
    async fn short_content_falls_back() {
        let response =
            respond_with(r#"{"choices":[{"message":{"content":"None"}}]}"#).await;

        let lines = response.output_lines();
        assert_eq!(lines[0], "API_FAILED:INVALID_CONTENT");
        assert_eq!(lines[1], fallback::fallback_quote("Albert Einstein", "Physics", ""));
    }

    #[tokio::test]
    async fn empty_choices_fall_back() {
        let response = respond_with(r#"{"choices":[]}"#).await;
        assert_eq!(response.output_lines()[0], "API_FAILED:NO_CHOICES");
    }

    #[tokio::test]
    async fn http_error_falls_back() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST);
            then.status(500)
                .header("content-type", "application/json")
                .body(r#"{"error":{"message":"overloaded"}}"#);
        });

        let response = respond(
            &client(&server, Some(KEY)),
            &einstein(),
            "Physics",
            "context",
            &PromptMode::ContinueDebate,
        )
        .await;

        assert_eq!(
            response.output_lines(),
            vec![
                "API_FAILED:HTTP_ERROR".to_owned(),
                fallback::fallback_quote("Albert Einstein", "Physics", "context").to_owned(),
            ]
        );
    }

    #[tokio::test]
    async fn timeout_falls_back_after_one_attempt() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(200)
                .header("content-type", "application/json")
                .delay(Duration::from_secs(3))
                .body(r#"{"choices":[{"message":{"content":"Imagination encircles the world."}}]}"#);
        });
        let api = ApiClient::new(
            server.url("/v1/chat/completions"),
            DEFAULT_MODEL,
            Some(KEY.to_owned()),
            Duration::from_secs(1),
        )
        .unwrap();

        let response = respond(&api, &einstein(), "Physics", "", &PromptMode::OpenDebate).await;

        mock.assert_hits(1);
        assert_eq!(
            response.output_lines(),
            vec![
                "API_FAILED:NETWORK_ERROR".to_owned(),
                fallback::fallback_quote("Albert Einstein", "Physics", "").to_owned(),
            ]
        );
    }

    #[tokio::test]
    async fn missing_key_falls_back_without_a_request() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(200);
        });

        let response = respond(
            &client(&server, None),
            &einstein(),
            "Physics",
            "",
            &PromptMode::OpenDebate,
        )
        .await;

        mock.assert_hits(0);
        assert_eq!(response.output_lines()[0], "API_FAILED:INVALID_API_KEY");
    }
}
