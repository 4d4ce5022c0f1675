use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, Response},
    routing::{get, post},
    Form, Json, Router,
};
use futures_util::FutureExt;
use std::{any::Any, panic::AssertUnwindSafe, sync::Arc};
use tower_http::{catch_panic::CatchPanicLayer, cors::{Any as AnyOrigin, CorsLayer}};
use uuid::Uuid;

use crate::{
    error::{internal_error_response, ApiError},
    generator::{DescriptionGenerator, GeneratorError},
    models::{GenerateForm, GenerationRequest, GenerationResult},
    pages::landing_page,
};

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn DescriptionGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn DescriptionGenerator>) -> Self {
        Self { generator }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate_description))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin)
        )
        .with_state(state)
}

pub async fn index() -> Html<&'static str> {
    Html(landing_page())
}

pub async fn not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html(landing_page()))
}

#[axum::debug_handler]
pub async fn generate_description(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Json<GenerationResult>, ApiError> {
    // A body that is not a form is handled like an empty form.
    let form: GenerateForm = match form {
        Ok(Form(pairs)) => pairs.into_iter().collect(),
        Err(rejection) => {
            tracing::debug!("Form rejected, treating as empty: {}", rejection);
            GenerateForm::default()
        }
    };

    let request = GenerationRequest::try_from(form).map_err(|e| {
        tracing::info!("🚫 Rejected generate request: {}", e);
        ApiError::from(e)
    })?;

    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        "🚀 Generating description for product: {} (keywords: {}, tone: {})",
        request.product_name,
        request.keywords.join(", "),
        request.tone
    );

    // A panicking generator is a generator failure like any other.
    let outcome = AssertUnwindSafe(state.generator.generate(
        &request.product_name,
        &request.keywords,
        &request.tone,
    ))
    .catch_unwind()
    .await
    .unwrap_or_else(|panic| Err(GeneratorError::Panicked(panic_message(panic.as_ref()))));

    match outcome {
        Ok(description) => {
            tracing::info!(%request_id, "✅ Description generated ({} chars)", description.len());
            Ok(Json(GenerationResult::success(description)))
        }
        Err(e) => {
            tracing::error!(%request_id, "❌ Error generating description: {}", e);
            Err(ApiError::from(e))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("💥 Unhandled fault while serving request: {}", panic_message(err.as_ref()));
    internal_error_response()
}
