use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::display::{DisplayGraph, layout_to_display};
use crate::dot_repair;
use crate::engine::{Graphviz, LayoutEngine};
use crate::error::{Error, Result};
use crate::model::{CompletionModel, GeminiClient};
use crate::prompt::{self, NO_WEB_CONTEXT};
use crate::web_context::ContextGatherer;

pub struct Generator {
    config: ServiceConfig,
    model: Box<dyn CompletionModel>,
    engine: Box<dyn LayoutEngine>,
    context: Option<ContextGatherer>,
}

impl Generator {
    pub fn new(
        config: ServiceConfig,
        model: Box<dyn CompletionModel>,
        engine: Box<dyn LayoutEngine>,
        context: Option<ContextGatherer>,
    ) -> Self {
        Self {
            config,
            model,
            engine,
            context,
        }
    }

    pub fn from_config(config: ServiceConfig) -> Self {
        let model = Box::new(GeminiClient::new(config.model.clone()));
        let engine = Box::new(Graphviz::new(config.graphviz.clone()));
        let context = config.web_context.then(ContextGatherer::duckduckgo);
        Self::new(config, model, engine, context)
    }

    pub fn generate(&self, topic: &str) -> Result<DisplayGraph> {
        tracing::info!(topic, "generating architecture");

        let context = match &self.context {
            Some(gatherer) => gatherer.gather(topic),
            None => NO_WEB_CONTEXT.to_string(),
        };
        let prompt = prompt::build(topic, &context);

        let completion = self.model.complete(&prompt)?;
        let dot = dot_repair::repair(&completion);

        layout_to_display(self.engine.as_ref(), &dot, self.config.scale).inspect_err(|err| {
            tracing::error!(error = %err, dot = %dot, "could not convert generated graph");
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TopicRequest {
    pub topic: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

pub struct ApiError(String);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { detail: self.0 }),
        )
            .into_response()
    }
}

pub fn router(generator: Arc<Generator>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/generate", post(generate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(generator)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn generate(
    State(generator): State<Arc<Generator>>,
    Json(request): Json<TopicRequest>,
) -> std::result::Result<Json<DisplayGraph>, ApiError> {
    let topic = request.topic;
    let graph = tokio::task::spawn_blocking(move || generator.generate(&topic))
        .await
        .map_err(|err| ApiError(format!("generation task failed: {err}")))??;
    Ok(Json(graph))
}
