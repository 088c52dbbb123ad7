use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use super::paths::AppPaths;
use super::settings::AppConfig;
use super::validation::validate_config;
use crate::core::errors::ConfigError;

const REDACT_PLACEHOLDER: &str = "****";

const SENSITIVE_PATTERNS: [&str; 8] = [
    "api_key",
    "secret",
    "password",
    "_token",
    "token_",
    "credential",
    "private_key",
    "access_key",
];

const SENSITIVE_WHITELIST: [&str; 2] = ["max_tokens", "tokens"];

/// Environment variables layered over the YAML files, keyed by config path.
const ENV_OVERRIDES: [(&str, [&str; 2]); 7] = [
    ("AZURE_OPENAI_ENDPOINT", ["embedding", "endpoint"]),
    ("AZURE_OPENAI_KEY", ["embedding", "api_key"]),
    ("AZURE_OAI_ENDPOINT", ["generation", "endpoint"]),
    ("AZURE_OAI_KEY", ["generation", "api_key"]),
    ("AZURE_SEARCH_ENDPOINT", ["search", "endpoint"]),
    ("AZURE_SEARCH_KEY", ["search", "api_key"]),
    ("AZURE_SEARCH_INDEX_NAME", ["search", "index_name"]),
];

#[derive(Clone)]
pub struct ConfigService {
    paths: Arc<AppPaths>,
}

impl ConfigService {
    pub fn new(paths: Arc<AppPaths>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn config_path(&self) -> PathBuf {
        if let Ok(path) = env::var("LEGAL_RAG_CONFIG_PATH") {
            return PathBuf::from(path);
        }

        let user_config = self.paths.user_data_dir.join("config.yml");
        if user_config.exists() {
            return user_config;
        }

        self.paths.project_root.join("config.yml")
    }

    pub fn secrets_path(&self) -> PathBuf {
        self.paths.secrets_path.clone()
    }

    /// Defaults, then `config.yml`, then `secrets.yaml`, then the process environment.
    pub fn load_config(&self) -> Result<Value, ConfigError> {
        self.load_config_with(|key| env::var(key).ok())
    }

    pub fn load_config_with<F>(&self, lookup: F) -> Result<Value, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = serde_json::to_value(AppConfig::default())
            .map_err(|err| ConfigError::Parse(err.to_string()))?;
        let public_config = load_yaml_file(&self.config_path())?;
        let secrets_config = load_yaml_file(&self.secrets_path())?;

        let mut merged = deep_merge(&deep_merge(&defaults, &public_config), &secrets_config);
        apply_env_overrides(&mut merged, lookup);
        validate_config(&merged)?;
        Ok(merged)
    }

    pub fn app_config(&self) -> Result<AppConfig, ConfigError> {
        let merged = self.load_config()?;
        serde_json::from_value(merged).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn redact_sensitive_values(&self, value: &Value) -> Value {
        redact_sensitive_values(value)
    }
}

fn load_yaml_file(path: &Path) -> Result<Value, ConfigError> {
    if !path.exists() {
        return Ok(Value::Object(Map::new()));
    }

    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let value = serde_yaml::from_str::<Value>(&contents)
        .map_err(|err| ConfigError::Parse(format!("{}: {}", path.display(), err)))?;
    match value {
        Value::Object(_) => Ok(value),
        Value::Null => Ok(Value::Object(Map::new())),
        _ => Err(ConfigError::Parse(format!(
            "{}: top level must be a mapping",
            path.display()
        ))),
    }
}

fn apply_env_overrides<F>(config: &mut Value, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for (var, [section, key]) in ENV_OVERRIDES {
        let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        let Some(root) = config.as_object_mut() else {
            return;
        };
        let entry = root
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(map) = entry.as_object_mut() {
            map.insert(key.to_string(), Value::String(value));
        }
    }
}

fn deep_merge(base: &Value, override_value: &Value) -> Value {
    match (base, override_value) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            let mut merged: Map<String, Value> = base_map.clone();
            for (key, value) in override_map {
                let merged_value = match merged.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), merged_value);
            }
            Value::Object(merged)
        }
        _ => override_value.clone(),
    }
}

fn redact_sensitive_values(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut redacted = Map::new();
            for (key, val) in map {
                let is_set = !val.is_null() && val.as_str() != Some("");
                if is_sensitive_key(key) && is_set {
                    redacted.insert(key.clone(), Value::String(REDACT_PLACEHOLDER.to_string()));
                } else {
                    redacted.insert(key.clone(), redact_sensitive_values(val));
                }
            }
            Value::Object(redacted)
        }
        Value::Array(items) => Value::Array(items.iter().map(redact_sensitive_values).collect()),
        _ => value.clone(),
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let key_lower = key.to_lowercase();
    if SENSITIVE_WHITELIST
        .iter()
        .any(|allowed| *allowed == key_lower)
    {
        return false;
    }
    SENSITIVE_PATTERNS
        .iter()
        .any(|pattern| key_lower.contains(pattern))
}
