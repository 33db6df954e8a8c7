//! Route handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::app;
use crate::core::check;
use crate::core::correction::NormalizedResult;
use crate::core::gateway::{CompletionGateway, GrammarPrompt};
use crate::core::languages::{self, Language};
use crate::core::turnstile::HumanVerifier;

use super::AppState;
use super::error::ApiError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrammarCheckRequest {
    pub text: String,
    pub input_language: String,
    pub explanation_language: String,
    pub target_language: Option<String>,
    pub turnstile_token: Option<String>,
}

/// Normalized result plus request-scoped extras.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarCheckResponse {
    #[serde(flatten)]
    pub result: NormalizedResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
    service: &'static str,
}

/// `POST /api/grammar-check`
pub(super) async fn grammar_check<G, V>(
    State(state): State<Arc<AppState<G, V>>>,
    body: Result<Json<GrammarCheckRequest>, JsonRejection>,
) -> Result<Json<GrammarCheckResponse>, ApiError>
where
    G: CompletionGateway + 'static,
    V: HumanVerifier + 'static,
{
    let Json(req) = body.map_err(|e| ApiError::invalid_body(e.body_text()))?;

    if req.text.trim().is_empty() {
        return Err(ApiError::bad_request(
            "Text is required and must be a non-empty string",
        ));
    }
    if req.input_language.is_empty() || req.explanation_language.is_empty() {
        return Err(ApiError::bad_request(
            "Both inputLanguage and explanationLanguage are required",
        ));
    }

    let request_id = Uuid::new_v4();
    let token = req.turnstile_token.as_deref().unwrap_or_default();
    if !state.verifier.verify(token).await {
        log::warn!("[{}] Human verification failed", request_id);
        return Err(ApiError::verification_failed());
    }

    log::info!(
        "[{}] Grammar check: {} chars, {} -> {}",
        request_id,
        req.text.chars().count(),
        req.input_language,
        req.explanation_language
    );
    let prompt = GrammarPrompt {
        text: &req.text,
        input_language: &req.input_language,
        explanation_language: &req.explanation_language,
    };
    let normalized = check::check(&state.gateway, &prompt).await.map_err(|e| {
        log::error!("[{}] Grammar check error: {}", request_id, e);
        ApiError::from(e)
    })?;
    log::info!(
        "[{}] {} corrections, confidence {}",
        request_id,
        normalized.result.errors.len(),
        normalized.result.confidence
    );

    Ok(Json(GrammarCheckResponse {
        result: normalized.result,
        translated_text: normalized.translated_text,
        target_language: req.target_language,
    }))
}

/// `GET /api/health`
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        service: app::SERVICE,
    })
}

/// `GET /api/languages`
pub(super) async fn list_languages() -> Json<&'static [Language]> {
    Json(languages::languages())
}
