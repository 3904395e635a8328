// crates/testsmith-server/src/web/api.rs
// REST API handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::{Value, json};
use testsmith_types::{
    ApiResponse, ComponentStatus, Framework, GeneratedTests, HealthReport, Language,
    OllamaModel, PromptTemplate, TemplateKey,
};
use tracing::info;

use crate::error::TestsmithError;
use crate::validation::validate_generation_request;
use crate::web::error::{ApiError, ApiResult};
use crate::web::state::AppState;

// ═══════════════════════════════════════
// GENERATION
// ═══════════════════════════════════════

pub async fn generate_tests(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<GeneratedTests>>> {
    let Json(body) = body.map_err(|e| ApiError::bad_request("Validation failed", e.body_text()))?;
    let request = validate_generation_request(&body)?;

    info!(
        language = %request.language,
        framework = %request.framework,
        code_len = request.code.len(),
        "Test generation requested"
    );

    let result = state.generator.generate(&request).await?;
    Ok(Json(ApiResponse::ok(result, "Tests generated successfully")))
}

// ═══════════════════════════════════════
// MODELS
// ═══════════════════════════════════════

pub async fn list_models(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<OllamaModel>>>> {
    let models = state
        .generator
        .available_models()
        .await
        .map_err(|e| ApiError::from(e).with_label("Failed to retrieve models"))?;
    Ok(Json(ApiResponse::ok(models, "Models retrieved successfully")))
}

// ═══════════════════════════════════════
// HEALTH
// ═══════════════════════════════════════

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let healthy = state.generator.is_healthy().await;
    let report = HealthReport {
        server: ComponentStatus::Healthy,
        ollama: if healthy {
            ComponentStatus::Healthy
        } else {
            ComponentStatus::Unhealthy
        },
        timestamp: Utc::now(),
        uptime: state.uptime_secs(),
    };
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(ApiResponse::ok(report, "Health check completed")))
}

// ═══════════════════════════════════════
// TEMPLATES
// ═══════════════════════════════════════

pub async fn list_templates(State(state): State<AppState>) -> Json<ApiResponse<Vec<TemplateKey>>> {
    Json(ApiResponse::ok(
        state.generator.template_keys(),
        "Templates retrieved successfully",
    ))
}

pub async fn get_template(
    State(state): State<AppState>,
    Path((language, framework)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let (language, framework) = parse_pair(&language, &framework)?;
    let template = state.generator.resolve_template(language, framework);
    let registered = state.generator.templates().contains(language, framework);

    Ok(Json(ApiResponse::ok(
        json!({
            "language": language,
            "framework": framework,
            "registered": registered,
            "template": *template,
        }),
        "Template retrieved successfully",
    )))
}

pub async fn put_template(
    State(state): State<AppState>,
    Path((language, framework)): Path<(String, String)>,
    body: Result<Json<PromptTemplate>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<TemplateKey>>> {
    let (language, framework) = parse_pair(&language, &framework)?;
    let Json(template) =
        body.map_err(|e| ApiError::bad_request("Invalid template", e.body_text()))?;

    state
        .generator
        .register_template(language, framework, template)?;

    Ok(Json(ApiResponse::ok(
        TemplateKey { language, framework },
        "Template registered successfully",
    )))
}

/// Parse path segments into a (language, framework) pair, collecting both errors
fn parse_pair(language: &str, framework: &str) -> Result<(Language, Framework), TestsmithError> {
    let mut errors = Vec::new();
    let language = language.parse::<Language>().ok();
    if language.is_none() {
        errors.push(format!("Language must be one of: {}", Language::supported()));
    }
    let framework = framework.parse::<Framework>().ok();
    if framework.is_none() {
        errors.push(format!("Framework must be one of: {}", Framework::supported()));
    }
    match (language, framework) {
        (Some(l), Some(f)) => Ok((l, f)),
        _ => Err(TestsmithError::Validation(errors)),
    }
}
