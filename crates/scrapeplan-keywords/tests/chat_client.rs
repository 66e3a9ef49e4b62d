//! Integration tests for `ChatCompletionsClient` and the cascade over HTTP,
//! using wiremock mocks.

use scrapeplan_core::{KeywordSource, ProjectBrief};
use scrapeplan_keywords::{
    ChatCompletionsClient, GenerationRequest, GenerationSettings, KeywordError, KeywordGenerator,
    KeywordOptions, KeywordSynthesizer,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ChatCompletionsClient {
    ChatCompletionsClient::with_base_url("test-key", 5, base_url)
        .expect("client construction should not fail")
}

fn request() -> GenerationRequest {
    GenerationRequest {
        system_prompt: "system".to_string(),
        user_prompt: "user".to_string(),
        model_id: "test-model".to_string(),
        max_tokens: 64,
        temperature: 0.2,
    }
}

fn completion(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": text }, "finish_reason": "stop" }
        ]
    })
}

fn brief() -> ProjectBrief {
    ProjectBrief {
        description: "Stainless steel insulated tumbler".to_string(),
        category: "home".to_string(),
        subcategory: "drinkware".to_string(),
        ..ProjectBrief::default()
    }
}

#[tokio::test]
async fn posts_chat_completion_with_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "max_tokens": 64,
            "messages": [
                { "role": "system", "content": "system" },
                { "role": "user", "content": "user" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("travel mug\ncold brew tumbler")))
        .expect(1)
        .mount(&server)
        .await;

    let response = test_client(&server.uri())
        .generate(&request())
        .await
        .expect("completion should parse");

    assert_eq!(response.text, "travel mug\ncold brew tumbler");
}

#[tokio::test]
async fn non_success_status_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .generate(&request())
        .await
        .unwrap_err();

    match err {
        KeywordError::Api { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid api key"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_choices_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .generate(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, KeywordError::EmptyResponse));
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .generate(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, KeywordError::Deserialize { .. }));
}

#[tokio::test]
async fn synthesizer_uses_primary_tier_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("1. insulated tumbler\n2. tumbler with straw")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let settings = GenerationSettings {
        backoff_base_ms: 0,
        ..GenerationSettings::default()
    };
    let synth = KeywordSynthesizer::new(Some(test_client(&server.uri())), settings);
    let set = synth.generate(&brief(), &KeywordOptions::default()).await;

    assert_eq!(set.source(), KeywordSource::PrimaryGenerative);
    assert_eq!(set.terms()[0], "insulated tumbler");
    assert_eq!(set.terms()[1], "tumbler with straw");
}

#[tokio::test]
async fn synthesizer_retries_server_errors_then_degrades() {
    let server = MockServer::start().await;

    // Two generative tiers, one retry each.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4)
        .mount(&server)
        .await;

    let settings = GenerationSettings {
        backoff_base_ms: 0,
        ..GenerationSettings::default()
    };
    let synth = KeywordSynthesizer::new(Some(test_client(&server.uri())), settings);
    let set = synth.generate(&brief(), &KeywordOptions::default()).await;

    assert_eq!(set.source(), KeywordSource::RuleBased);
    assert!(set.terms().contains(&"home drinkware".to_string()));
}
