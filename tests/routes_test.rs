use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use pretty_assertions::assert_eq;
use product_copywriter::generator::{DescriptionGenerator, GeneratorError};
use product_copywriter::routes::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

type Call = (String, Vec<String>, String);

enum Outcome {
    Text(&'static str),
    Fail(&'static str),
    Panic,
}

struct FakeGenerator {
    outcome: Outcome,
    calls: Mutex<Vec<Call>>,
}

impl FakeGenerator {
    fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self { outcome, calls: Mutex::new(Vec::new()) })
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl DescriptionGenerator for FakeGenerator {
    async fn generate(
        &self,
        product_name: &str,
        keywords: &[String],
        tone: &str,
    ) -> Result<String, GeneratorError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((product_name.to_string(), keywords.to_vec(), tone.to_string()));
        match self.outcome {
            Outcome::Text(text) => Ok(text.to_string()),
            Outcome::Fail(cause) => Err(GeneratorError::Http(cause.to_string())),
            Outcome::Panic => panic!("downstream malformed output"),
        }
    }
}

fn router(generator: Arc<FakeGenerator>) -> axum::Router {
    build_router(AppState::new(generator))
}

fn form_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn send(generator: Arc<FakeGenerator>, request: Request<Body>) -> (StatusCode, String) {
    let response = router(generator).oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf8 body"))
}

async fn send_json(generator: Arc<FakeGenerator>, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(generator, request).await;
    (status, serde_json::from_str(&body).expect("json body"))
}

#[tokio::test]
async fn bamboo_mug_end_to_end() {
    let generator = FakeGenerator::new(Outcome::Text("Sip sustainably."));
    let (status, body) = send_json(
        generator.clone(),
        form_post("product_name=Bamboo+Mug&keywords=eco-friendly%2C+reusable&tone=playful"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "description": "Sip sustainably." }));
    assert_eq!(
        generator.calls(),
        vec![(
            "Bamboo Mug".to_string(),
            vec!["eco-friendly".to_string(), "reusable".to_string()],
            "playful".to_string()
        )]
    );
}

#[tokio::test]
async fn inputs_are_trimmed_and_tone_defaults_to_neutral() {
    let generator = FakeGenerator::new(Outcome::Text("ok"));
    let (status, _) = send_json(
        generator.clone(),
        form_post("product_name=++Headphones++&keywords=wireless%2C+durable+%2C++compact"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        generator.calls(),
        vec![(
            "Headphones".to_string(),
            vec!["wireless".to_string(), "durable".to_string(), "compact".to_string()],
            "neutral".to_string()
        )]
    );
}

#[tokio::test]
async fn missing_fields_are_rejected_without_calling_generator() {
    for body in [
        "keywords=a",
        "product_name=+++&keywords=a",
        "product_name=Lamp",
        "product_name=Lamp&keywords=++",
        "",
    ] {
        let generator = FakeGenerator::new(Outcome::Text("unused"));
        let (status, json) = send_json(generator.clone(), form_post(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body:?}");
        assert_eq!(
            json,
            json!({ "success": false, "error": "Product name and keywords are required" })
        );
        assert!(generator.calls().is_empty());
    }
}

#[tokio::test]
async fn keywords_without_content_are_rejected() {
    let generator = FakeGenerator::new(Outcome::Text("unused"));
    let (status, json) =
        send_json(generator.clone(), form_post("product_name=Lamp&keywords=+%2C+%2C")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({ "success": false, "error": "At least one valid keyword is required" })
    );
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn non_form_body_is_treated_as_empty_form() {
    let generator = FakeGenerator::new(Outcome::Text("unused"));
    let request = Request::builder()
        .method("POST")
        .uri("/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"product_name":"Lamp","keywords":"bright"}"#))
        .expect("request");
    let (status, json) = send_json(generator.clone(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Product name and keywords are required");
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn generator_failure_is_a_generic_500() {
    let generator = FakeGenerator::new(Outcome::Fail("HTTP 403: API key leaked-secret-123 invalid"));
    let (status, body) =
        send(generator.clone(), form_post("product_name=Lamp&keywords=bright")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("leaked-secret-123"));
    assert!(!body.contains("403"));
    let json: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(
        json,
        json!({ "success": false, "error": "Failed to generate description. Please try again." })
    );
    assert_eq!(generator.calls().len(), 1);
}

#[tokio::test]
async fn generator_panic_is_a_generic_500() {
    let generator = FakeGenerator::new(Outcome::Panic);
    let (status, body) =
        send(generator.clone(), form_post("product_name=Lamp&keywords=bright")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("downstream malformed output"));
    let json: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(
        json,
        json!({ "success": false, "error": "Failed to generate description. Please try again." })
    );
    assert_eq!(generator.calls().len(), 1);
}

#[tokio::test]
async fn repeated_fields_use_the_first_value() {
    let generator = FakeGenerator::new(Outcome::Text("ok"));
    let (status, json) = send_json(
        generator.clone(),
        form_post("product_name=Lamp&keywords=bright&keywords=x&tone=calm&tone=loud"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "success": true, "description": "ok" }));
    assert_eq!(
        generator.calls(),
        vec![("Lamp".to_string(), vec!["bright".to_string()], "calm".to_string())]
    );
}

#[tokio::test]
async fn tone_reaches_generator_unchanged() {
    let generator = FakeGenerator::new(Outcome::Text("ok"));
    let (status, _) = send_json(
        generator.clone(),
        form_post("product_name=Lamp&keywords=bright&tone=+warm+and+cozy+"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(generator.calls()[0].2, " warm and cozy ");
}

#[tokio::test]
async fn index_serves_landing_page() {
    let generator = FakeGenerator::new(Outcome::Text("unused"));
    let request = Request::builder().uri("/").body(Body::empty()).expect("request");
    let (status, body) = send(generator, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form"));
}

#[tokio::test]
async fn unknown_route_serves_landing_page_with_404() {
    let generator = FakeGenerator::new(Outcome::Text("unused"));
    let home = send(
        generator.clone(),
        Request::builder().uri("/").body(Body::empty()).expect("request"),
    )
    .await
    .1;
    let (status, body) = send(
        generator,
        Request::builder().uri("/no/such/page").body(Body::empty()).expect("request"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, home);
}
