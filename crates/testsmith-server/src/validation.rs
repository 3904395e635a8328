// crates/testsmith-server/src/validation.rs
// Generation request validation: every problem is collected, not just the first

use serde_json::{Map, Value};
use testsmith_types::{
    Framework, GenerationRequest, Language, MAX_CODE_CHARS, ModelConfigOverrides,
};

use crate::error::{Result, TestsmithError};

/// Temperature bounds (inclusive)
const TEMPERATURE_RANGE: (f64, f64) = (0.0, 2.0);
/// Max token bounds (inclusive)
const MAX_TOKENS_RANGE: (u64, u64) = (1, 4096);
/// Nucleus sampling bounds (inclusive)
const TOP_P_RANGE: (f64, f64) = (0.0, 1.0);

/// Validate an untyped request body and build the typed request.
///
/// Returns `TestsmithError::Validation` carrying one message per problem, in
/// field order (code, language, framework, modelConfig).
pub fn validate_generation_request(body: &Value) -> Result<GenerationRequest> {
    let mut errors = Vec::new();

    let Some(fields) = body.as_object() else {
        return Err(TestsmithError::Validation(vec![
            "Request body must be a JSON object".to_string(),
        ]));
    };

    let code = validate_code(fields.get("code"), &mut errors);
    let language = validate_language(fields.get("language"), &mut errors);
    let framework = validate_framework(fields.get("framework"), &mut errors);
    let model_config = match fields.get("modelConfig") {
        None | Some(Value::Null) => None,
        Some(Value::Object(config)) => validate_model_config(config, &mut errors),
        Some(_) => {
            errors.push("Model config must be an object".to_string());
            None
        }
    };

    match (code, language, framework) {
        (Some(code), Some(language), Some(framework)) if errors.is_empty() => {
            Ok(GenerationRequest {
                code,
                language,
                framework,
                model_config,
            })
        }
        _ => Err(TestsmithError::Validation(errors)),
    }
}

/// Validate an already-typed request (CLI path).
///
/// Checks the typed fields directly: a JSON round trip would turn NaN and
/// infinity into `null`, which reads as "not set".
pub fn validate_request(request: &GenerationRequest) -> Result<()> {
    let mut errors = Vec::new();
    check_code(&request.code, &mut errors);

    if let Some(config) = &request.model_config {
        if config.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
            errors.push("Model name cannot be empty".to_string());
        }
        check_range(config.temperature, "Temperature", TEMPERATURE_RANGE, &mut errors);
        check_range(config.top_p, "Top P", TOP_P_RANGE, &mut errors);
        if let Some(n) = config.max_tokens {
            if !(MAX_TOKENS_RANGE.0..=MAX_TOKENS_RANGE.1).contains(&u64::from(n)) {
                errors.push(max_tokens_message());
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TestsmithError::Validation(errors))
    }
}

fn check_code(code: &str, errors: &mut Vec<String>) -> bool {
    if code.trim().is_empty() {
        errors.push("Code cannot be empty".to_string());
        false
    } else if code.chars().count() > MAX_CODE_CHARS {
        errors.push("Code must be less than 10,000 characters".to_string());
        false
    } else {
        true
    }
}

/// Range check that also rejects NaN and infinities
fn check_range(
    value: Option<f64>,
    label: &str,
    (min, max): (f64, f64),
    errors: &mut Vec<String>,
) -> bool {
    match value {
        Some(n) if !n.is_finite() || !(min..=max).contains(&n) => {
            errors.push(format!("{} must be between {} and {}", label, min, max));
            false
        }
        _ => true,
    }
}

fn max_tokens_message() -> String {
    format!(
        "Max tokens must be an integer between {} and {}",
        MAX_TOKENS_RANGE.0, MAX_TOKENS_RANGE.1
    )
}

fn validate_code(value: Option<&Value>, errors: &mut Vec<String>) -> Option<String> {
    match value {
        None | Some(Value::Null) => {
            errors.push("Code is required".to_string());
            None
        }
        Some(Value::String(code)) => check_code(code, errors).then(|| code.clone()),
        Some(_) => {
            errors.push("Code must be a string".to_string());
            None
        }
    }
}

fn validate_language(value: Option<&Value>, errors: &mut Vec<String>) -> Option<Language> {
    match value {
        None | Some(Value::Null) => {
            errors.push("Language is required".to_string());
            None
        }
        Some(v) => {
            let parsed = v.as_str().and_then(|s| s.parse::<Language>().ok());
            if parsed.is_none() {
                errors.push(format!("Language must be one of: {}", Language::supported()));
            }
            parsed
        }
    }
}

fn validate_framework(value: Option<&Value>, errors: &mut Vec<String>) -> Option<Framework> {
    match value {
        None | Some(Value::Null) => {
            errors.push("Testing framework is required".to_string());
            None
        }
        Some(v) => {
            let parsed = v.as_str().and_then(|s| s.parse::<Framework>().ok());
            if parsed.is_none() {
                errors.push(format!("Framework must be one of: {}", Framework::supported()));
            }
            parsed
        }
    }
}

fn validate_model_config(
    config: &Map<String, Value>,
    errors: &mut Vec<String>,
) -> Option<ModelConfigOverrides> {
    let before = errors.len();
    let mut overrides = ModelConfigOverrides::default();

    match config.get("model") {
        None | Some(Value::Null) => {}
        Some(Value::String(model)) if !model.trim().is_empty() => {
            overrides.model = Some(model.clone());
        }
        Some(Value::String(_)) => errors.push("Model name cannot be empty".to_string()),
        Some(_) => errors.push("Model name must be a string".to_string()),
    }

    overrides.temperature = float_in_range(config.get("temperature"), "Temperature", TEMPERATURE_RANGE, errors);
    overrides.top_p = float_in_range(config.get("topP"), "Top P", TOP_P_RANGE, errors);

    match config.get("maxTokens") {
        None | Some(Value::Null) => {}
        Some(v) => match v.as_u64() {
            Some(n) if (MAX_TOKENS_RANGE.0..=MAX_TOKENS_RANGE.1).contains(&n) => {
                overrides.max_tokens = Some(n as u32);
            }
            _ if v.is_number() => errors.push(max_tokens_message()),
            _ => errors.push("Max tokens must be a number".to_string()),
        },
    }

    match config.get("stream") {
        None | Some(Value::Null) => {}
        Some(Value::Bool(b)) => overrides.stream = Some(*b),
        Some(_) => errors.push("Stream must be a boolean".to_string()),
    }

    (errors.len() == before).then_some(overrides)
}

fn float_in_range(
    value: Option<&Value>,
    label: &str,
    (min, max): (f64, f64),
    errors: &mut Vec<String>,
) -> Option<f64> {
    let value = value.filter(|v| !v.is_null())?;
    match value.as_f64() {
        Some(n) => check_range(Some(n), label, (min, max), errors).then_some(n),
        None => {
            errors.push(format!("{} must be a number", label));
            None
        }
    }
}
