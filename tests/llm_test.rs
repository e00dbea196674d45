mod common;

use std::time::Duration;

use blog_generator::error::AppError;
use blog_generator::llm::CompletionClient;
use blog_generator::prompt::compose_prompt;
use mockito::Matcher;

fn client(server: &mockito::Server) -> CompletionClient {
    CompletionClient::new(server.url(), "gsk_test", "llama-3.3-70b-versatile", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_generate_returns_content() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_header("authorization", "Bearer gsk_test")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""model":"llama-3\.3-70b-versatile""#.into()),
            Matcher::Regex(r#""role":"system""#.into()),
            Matcher::Regex(r#""role":"user""#.into()),
            Matcher::Regex("helpful blog writing assistant".into()),
            Matcher::Regex("Write a blog post in Humorous style about cats".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::completion_body("# Cats\n\nThey rule."))
        .expect(1)
        .create_async()
        .await;

    let prompt = compose_prompt("cats", 300, "Humorous", "");
    let content = client(&server).generate(&prompt).await.unwrap();

    assert_eq!(content, "# Cats\n\nThey rule.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_auth_error_carries_provider_message() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#)
        .create_async()
        .await;

    let err = client(&server)
        .generate(&compose_prompt("cats", 300, "Humorous", ""))
        .await
        .unwrap_err();

    match err {
        AppError::LlmError(msg) => {
            assert!(msg.contains("401"));
            assert!(msg.contains("Invalid API Key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limit_is_an_llm_error() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_status(429)
        .with_body("rate limited")
        .create_async()
        .await;

    let err = client(&server)
        .generate(&compose_prompt("cats", 300, "Humorous", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::LlmError(ref msg) if msg.contains("rate limited")));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_response_is_an_llm_error() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let err = client(&server)
        .generate(&compose_prompt("cats", 300, "Humorous", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::LlmError(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_service_is_an_llm_error() {
    let llm = CompletionClient::new("http://127.0.0.1:1/", "gsk_test", "m", Duration::from_secs(2)).unwrap();
    let err = llm.generate(&compose_prompt("cats", 300, "Humorous", "")).await.unwrap_err();
    assert!(matches!(err, AppError::LlmError(_)));
}
