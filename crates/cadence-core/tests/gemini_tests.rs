use cadence_core::{
    CadenceError, GeminiClient, ImageGenerator, MarketingInput, PlanGenerator, Remedy,
    ServiceFailure,
};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const TEXT_PATH: &str = "/v1beta/models/gemini-3-pro-preview:generateContent";
const IMAGE_PATH: &str = "/v1beta/models/gemini-2.5-flash-image:generateContent";

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(Some("AIzaTestKey".to_string()))
        .expect("Failed to create client")
        .with_base_url(&server.uri())
}

fn coffee_shop() -> MarketingInput {
    MarketingInput {
        industry: "咖啡廳".to_string(),
        ..MarketingInput::default()
    }
}

fn plan_text(weeks: u32) -> String {
    let weeks: Vec<Value> = (1..=weeks)
        .map(|n| {
            if n == 1 {
                json!({
                    "weekNumber": 1,
                    "startDate": "2026-10-19",
                    "prepPhase": { "persona": "| 背景 |", "brandPositioning": "溫暖" }
                })
            } else {
                json!({
                    "weekNumber": n,
                    "startDate": "2026-10-26",
                    "posts": [
                        { "platform": "FB", "content": "早安", "imagePrompt": "latte", "hashtags": ["#咖啡"] },
                        { "platform": "IG", "content": "午安", "imagePrompt": "beans", "hashtags": [], "isCompleted": true }
                    ]
                })
            }
        })
        .collect();
    json!({ "weeks": weeks }).to_string()
}

fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_generate_plan_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(header("x-goog-api-key", "AIzaTestKey"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&plan_text(12))))
        .expect(1)
        .mount(&server)
        .await;

    let plan = client(&server).generate_plan(&coffee_shop()).await.unwrap();

    assert_eq!(plan.input.industry, "咖啡廳");
    assert_eq!(plan.weeks.len(), 12);
    assert!(plan.weeks[0].is_prep_week());
    assert!(plan
        .weeks
        .iter()
        .flat_map(|w| &w.posts)
        .all(|post| !post.is_completed));
    assert_eq!(plan.completion(), (0, 22));
}

#[tokio::test]
async fn test_forbidden_status_is_credential_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "The caller does not have permission",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    let error = client(&server)
        .generate_plan(&coffee_shop())
        .await
        .unwrap_err();

    match &error {
        CadenceError::Service {
            failure,
            status,
            message,
        } => {
            assert_eq!(*failure, ServiceFailure::Credential);
            assert_eq!(*status, Some(403));
            assert!(message.contains("PERMISSION_DENIED"));
        }
        other => panic!("expected service error, got {other:?}"),
    }
    assert!(error.remedy().hint().is_some());
}

#[tokio::test]
async fn test_rate_limit_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("Resource has been exhausted"))
        .mount(&server)
        .await;

    let error = client(&server)
        .generate_plan(&coffee_shop())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        CadenceError::Service {
            failure: ServiceFailure::RateLimited,
            ..
        }
    ));
}

#[tokio::test]
async fn test_unsupported_region_is_model_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "User location is not supported for the API use.",
                "status": "FAILED_PRECONDITION"
            }
        })))
        .mount(&server)
        .await;

    let error = client(&server)
        .generate_plan(&coffee_shop())
        .await
        .unwrap_err();

    match &error {
        CadenceError::Service {
            failure, status, ..
        } => {
            assert_eq!(*failure, ServiceFailure::ModelUnavailable);
            assert_eq!(*status, Some(400));
        }
        other => panic!("expected service error, got {other:?}"),
    }
    assert_eq!(error.remedy(), Remedy::ReconfigureCredential);
}

#[tokio::test]
async fn test_empty_text_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "SAFETY" }]
        })))
        .mount(&server)
        .await;

    let error = client(&server)
        .generate_plan(&coffee_shop())
        .await
        .unwrap_err();
    assert!(matches!(error, CadenceError::EmptyResponse));
}

#[tokio::test]
async fn test_missing_weeks_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response("{\"plan\": []}")),
        )
        .mount(&server)
        .await;

    let error = client(&server)
        .generate_plan(&coffee_shop())
        .await
        .unwrap_err();
    assert!(error.is_response_shape());
    assert!(matches!(error, CadenceError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_short_plan_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&plan_text(8))))
        .mount(&server)
        .await;

    let error = client(&server)
        .generate_plan(&coffee_shop())
        .await
        .unwrap_err();
    assert!(matches!(error, CadenceError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = GeminiClient::new(None).unwrap().with_base_url(&server.uri());

    let plan = client.generate_plan(&coffee_shop()).await;
    assert!(matches!(plan, Err(CadenceError::MissingCredential { .. })));

    let image = client.generate_image("latte art").await;
    assert!(matches!(image, Err(CadenceError::MissingCredential { .. })));
}

#[tokio::test]
async fn test_generate_image_returns_inline_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(body_partial_json(json!({
            "generationConfig": { "imageConfig": { "aspectRatio": "1:1" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your image" },
                        { "inlineData": { "mimeType": "image/png", "data": "iVBORw==" } }
                    ]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let image = client(&server).generate_image("latte art").await.unwrap();

    assert_eq!(image.data_uri(), "data:image/png;base64,iVBORw==");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.starts_with("High quality professional social media visual"));
    assert!(prompt.ends_with("latte art"));
}

#[tokio::test]
async fn test_text_only_image_response_is_no_image_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response("I cannot draw that")),
        )
        .mount(&server)
        .await;

    let error = client(&server).generate_image("latte art").await.unwrap_err();
    assert!(matches!(error, CadenceError::NoImageData));
}

#[tokio::test]
async fn test_image_response_without_candidates_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let error = client(&server).generate_image("latte art").await.unwrap_err();
    assert!(matches!(error, CadenceError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_empty_image_prompt_is_invalid_input() {
    let server = MockServer::start().await;
    let error = client(&server).generate_image("  ").await.unwrap_err();
    assert!(matches!(error, CadenceError::InvalidInput { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}
