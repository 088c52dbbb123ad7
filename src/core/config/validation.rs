use serde_json::{Map, Value};

use crate::core::errors::ConfigError;

pub fn validate_config(config: &Value) -> Result<(), ConfigError> {
    let root = config
        .as_object()
        .ok_or_else(|| config_type_error("root", "object"))?;

    for section in ["embedding", "generation"] {
        if let Some(service) = expect_optional_object(root, section)? {
            for key in ["endpoint", "api_key", "api_version", "model"] {
                validate_optional_string_field(service, &format!("{section}.{key}"), key)?;
            }
        }
    }

    if let Some(search) = expect_optional_object(root, "search")? {
        for key in ["endpoint", "api_key", "api_version", "index_name"] {
            validate_optional_string_field(search, &format!("search.{key}"), key)?;
        }
    }

    if let Some(rag) = expect_optional_object(root, "rag")? {
        validate_u64_field(rag, "rag.top_k", "top_k", 1, 50)?;
        validate_u64_field(
            rag,
            "rag.max_context_chars",
            "max_context_chars",
            1,
            1_000_000,
        )?;
        validate_u64_field(rag, "rag.max_tokens", "max_tokens", 1, 128_000)?;
        validate_f64_field(rag, "rag.temperature", "temperature", 0.0, 2.0)?;
        validate_f64_field(rag, "rag.top_p", "top_p", 0.0, 1.0)?;
        validate_optional_string_field(rag, "rag.vector_field", "vector_field")?;
        validate_optional_string_field(rag, "rag.truncation_marker", "truncation_marker")?;
    }

    if let Some(server) = expect_optional_object(root, "server")? {
        validate_optional_string_field(server, "server.host", "host")?;
        validate_string_array_field(server, "server.allowed_origins", "allowed_origins")?;
    }

    Ok(())
}

fn expect_optional_object<'a>(
    root: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a Map<String, Value>>, ConfigError> {
    match root.get(key) {
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(config_type_error(key, "object")),
        None => Ok(None),
    }
}

fn validate_u64_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
    min: u64,
    max: u64,
) -> Result<(), ConfigError> {
    let Some(value) = section.get(key) else {
        return Ok(());
    };
    let Some(number) = value.as_u64() else {
        return Err(config_type_error(path, "integer"));
    };
    if number < min || number > max {
        return Err(out_of_range(path, min, max));
    }
    Ok(())
}

fn validate_f64_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
    min: f64,
    max: f64,
) -> Result<(), ConfigError> {
    let Some(value) = section.get(key) else {
        return Ok(());
    };
    let Some(number) = value.as_f64() else {
        return Err(config_type_error(path, "number"));
    };
    if !(min..=max).contains(&number) {
        return Err(out_of_range(path, min, max));
    }
    Ok(())
}

fn validate_optional_string_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<(), ConfigError> {
    let Some(value) = section.get(key) else {
        return Ok(());
    };
    if value.as_str().is_none() {
        return Err(config_type_error(path, "string"));
    }
    Ok(())
}

fn validate_string_array_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<(), ConfigError> {
    let Some(value) = section.get(key) else {
        return Ok(());
    };
    let Some(items) = value.as_array() else {
        return Err(config_type_error(path, "array of strings"));
    };
    for (index, item) in items.iter().enumerate() {
        let Some(text) = item.as_str() else {
            return Err(config_type_error(&format!("{}[{}]", path, index), "string"));
        };
        if text.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: format!("{}[{}]", path, index),
                reason: "value cannot be empty".to_string(),
            });
        }
    }
    Ok(())
}

fn out_of_range<T: std::fmt::Display>(path: &str, min: T, max: T) -> ConfigError {
    ConfigError::Invalid {
        key: path.to_string(),
        reason: format!("must be between {} and {}", min, max),
    }
}

fn config_type_error(path: &str, expected: &str) -> ConfigError {
    ConfigError::Invalid {
        key: path.to_string(),
        reason: format!("expected {}", expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_default_shaped_config() {
        let config = json!({
            "embedding": { "endpoint": "https://e", "api_key": "k", "model": "m" },
            "search": { "index_name": "legal" },
            "rag": { "top_k": 3, "max_context_chars": 10000, "temperature": 1.0, "top_p": 1.0 },
            "server": { "allowed_origins": ["http://localhost:8501"] }
        });
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_out_of_range_sampling() {
        let err = validate_config(&json!({ "rag": { "top_p": 1.5 } })).unwrap_err();
        assert!(err.to_string().contains("rag.top_p"));

        let err = validate_config(&json!({ "rag": { "top_k": 0 } })).unwrap_err();
        assert!(err.to_string().contains("rag.top_k"));
    }

    #[test]
    fn rejects_wrong_types() {
        let err = validate_config(&json!({ "search": "legal" })).unwrap_err();
        assert!(err.to_string().contains("expected object"));

        let err = validate_config(&json!({ "rag": { "max_context_chars": "big" } })).unwrap_err();
        assert!(err.to_string().contains("expected integer"));

        let err =
            validate_config(&json!({ "server": { "allowed_origins": [""] } })).unwrap_err();
        assert!(err.to_string().contains("server.allowed_origins[0]"));
    }
}
