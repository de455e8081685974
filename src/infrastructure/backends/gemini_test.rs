use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::gemini_rate_limit_fixture;
use test_utils::gemini_reply_fixture;

use super::Gemini;
use super::EMPTY_REPLY;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::GenerationFailure;
use crate::domain::models::Message;
use crate::domain::models::ReasoningMode;

impl Gemini {
    fn with_url(url: String) -> Gemini {
        return Gemini {
            url,
            token: "abc".to_string(),
            model: "flash-1".to_string(),
            deep_model: "pro-1".to_string(),
            thinking_budget: 1024,
            timeout: "200".to_string(),
        };
    }
}

fn prompt(mode: ReasoningMode) -> BackendPrompt {
    let messages = vec![
        Message::welcome("Hello!"),
        Message::user("1".to_string(), "Where do you work?"),
        Message::assistant("2".to_string(), "At Acme.", false),
    ];

    return BackendPrompt::new("Be helpful.", &messages, "Since when?", mode);
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1beta/models/flash-1?key=abc")
        .with_status(200)
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1beta/models/flash-1?key=abc")
        .with_status(500)
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks_without_token() {
    let mut backend = Gemini::with_url("http://localhost:1".to_string());
    backend.token = "".to_string();

    let res = backend.health_check().await;
    assert_eq!(res.unwrap_err().to_string(), "Gemini token is not defined");
}

#[tokio::test]
async fn it_generates_standard_replies() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/flash-1:generateContent?key=abc")
        .match_body(Matcher::Json(json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "Where do you work?" }] },
                { "role": "model", "parts": [{ "text": "At Acme." }] },
                { "role": "user", "parts": [{ "text": "Since when?" }] }
            ],
            "systemInstruction": { "parts": [{ "text": "Be helpful." }] }
        })))
        .with_status(200)
        .with_body(gemini_reply_fixture())
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend.generate(prompt(ReasoningMode::Standard)).await?;

    mock.assert_async().await;
    assert_eq!(res, "Jane has three years of Lambda experience.");

    return Ok(());
}

#[tokio::test]
async fn it_requests_a_thinking_budget_in_deep_mode() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/pro-1:generateContent?key=abc")
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": { "thinkingConfig": { "thinkingBudget": 1024 } }
        })))
        .with_status(200)
        .with_body(gemini_reply_fixture())
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend.generate(prompt(ReasoningMode::Deep)).await?;

    mock.assert_async().await;
    assert_eq!(res, "Jane has three years of Lambda experience.");

    return Ok(());
}

#[tokio::test]
async fn it_falls_back_when_no_text_is_returned() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/flash-1:generateContent?key=abc")
        .with_status(200)
        .with_body(r#"{ "candidates": [] }"#)
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend.generate(prompt(ReasoningMode::Standard)).await?;

    mock.assert_async().await;
    assert_eq!(res, EMPTY_REPLY);

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_quota_errors_for_classification() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/pro-1:generateContent?key=abc")
        .with_status(429)
        .with_body(gemini_rate_limit_fixture())
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let err = backend
        .generate(prompt(ReasoningMode::Deep))
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(err.to_string().contains("429"));
    assert_eq!(
        GenerationFailure::classify(&err, ReasoningMode::Deep),
        GenerationFailure::RateLimited {
            mode: ReasoningMode::Deep,
            retry_after: Some(13),
        }
    );
}

#[tokio::test]
async fn it_folds_retry_after_headers_into_the_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/flash-1:generateContent?key=abc")
        .with_status(429)
        .with_header("retry-after", "7")
        .with_body("Too Many Requests")
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let err = backend
        .generate(prompt(ReasoningMode::Standard))
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(
        GenerationFailure::classify(&err, ReasoningMode::Standard),
        GenerationFailure::RateLimited {
            mode: ReasoningMode::Standard,
            retry_after: Some(7),
        }
    );
}

#[tokio::test]
async fn it_fails_on_server_errors() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/flash-1:generateContent?key=abc")
        .with_status(500)
        .with_body("internal")
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let err = backend
        .generate(prompt(ReasoningMode::Standard))
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(
        GenerationFailure::classify(&err, ReasoningMode::Standard),
        GenerationFailure::Unavailable
    );
}
