//! Configuration management for the askdocs service.
//!
//! Configuration is resolved once at process start from, in order of
//! precedence: CLI overrides, environment variables, and an optional YAML
//! config file. The four collaborator settings (`SEARCH_INDEX_ID`,
//! `GUARDRAIL_ID`, `GUARDRAIL_VERSION`, `AWS_REGION`) are required; a missing
//! one is a startup failure, never a per-request failure.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default model identifier for the hosted model collaborator.
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-haiku-20240307-v1:0";

/// Main service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Identifier of the managed search index
    pub search_index_id: String,

    /// Identifier of the content-safety guardrail
    pub guardrail_id: String,

    /// Version of the guardrail policy to apply
    pub guardrail_version: String,

    /// Target region; used to derive collaborator endpoints
    pub region: String,

    /// Model identifier sent to the model invocation service
    pub model_id: String,

    /// Search index service endpoint
    pub retrieval_endpoint: String,

    /// Guardrail service endpoint
    pub guardrail_endpoint: String,

    /// Model invocation service endpoint
    pub model_endpoint: String,

    /// Address the HTTP server binds to
    pub bind_host: String,

    /// Port the HTTP server binds to
    pub bind_port: u16,

    /// Log level override
    pub log_level: Option<String>,

    /// Disable colored output
    pub no_color: bool,
}

/// Optional YAML config file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    service: Option<ServiceFileConfig>,
    logging: Option<LoggingFileConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServiceFileConfig {
    #[serde(rename = "modelId")]
    model_id: Option<String>,
    #[serde(rename = "bindHost")]
    bind_host: Option<String>,
    #[serde(rename = "bindPort")]
    bind_port: Option<u16>,
    #[serde(rename = "retrievalEndpoint")]
    retrieval_endpoint: Option<String>,
    #[serde(rename = "guardrailEndpoint")]
    guardrail_endpoint: Option<String>,
    #[serde(rename = "modelEndpoint")]
    model_endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingFileConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    ///
    /// Required environment variables:
    /// - `SEARCH_INDEX_ID`: managed search index identifier
    /// - `GUARDRAIL_ID`: content-safety guardrail identifier
    /// - `GUARDRAIL_VERSION`: guardrail policy version
    /// - `AWS_REGION`: target region
    ///
    /// Optional:
    /// - `MODEL_ID`, `RETRIEVAL_ENDPOINT`, `GUARDRAIL_ENDPOINT`,
    ///   `MODEL_ENDPOINT`, `BIND_HOST`, `BIND_PORT`, `RUST_LOG`, `NO_COLOR`
    /// - `ASKDOCS_CONFIG`: path to a YAML config file merged underneath
    pub fn load() -> AppResult<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// `load()` passes the process environment; tests pass a map.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let search_index_id = require(&lookup, "SEARCH_INDEX_ID")?;
        let guardrail_id = require(&lookup, "GUARDRAIL_ID")?;
        let guardrail_version = require(&lookup, "GUARDRAIL_VERSION")?;
        let region = require(&lookup, "AWS_REGION")?;

        // Collaborator endpoints follow the region unless overridden.
        let runtime_endpoint = format!("https://bedrock-runtime.{}.amazonaws.com", region);
        let mut config = Self {
            retrieval_endpoint: format!("https://kendra.{}.amazonaws.com", region),
            guardrail_endpoint: runtime_endpoint.clone(),
            model_endpoint: runtime_endpoint,
            model_id: DEFAULT_MODEL_ID.to_string(),
            bind_host: "0.0.0.0".to_string(),
            bind_port: 8080,
            log_level: None,
            no_color: false,
            search_index_id,
            guardrail_id,
            guardrail_version,
            region,
        };

        // YAML config file sits underneath the environment.
        if let Some(path) = lookup("ASKDOCS_CONFIG") {
            config = config.merge_yaml(&PathBuf::from(path))?;
        }

        // Environment variables override YAML config.
        if let Some(model_id) = lookup("MODEL_ID") {
            config.model_id = model_id;
        }
        if let Some(endpoint) = lookup("RETRIEVAL_ENDPOINT") {
            config.retrieval_endpoint = endpoint;
        }
        if let Some(endpoint) = lookup("GUARDRAIL_ENDPOINT") {
            config.guardrail_endpoint = endpoint;
        }
        if let Some(endpoint) = lookup("MODEL_ENDPOINT") {
            config.model_endpoint = endpoint;
        }
        if let Some(host) = lookup("BIND_HOST") {
            config.bind_host = host;
        }
        if let Some(port) = lookup("BIND_PORT") {
            config.bind_port = parse_port(&port)?;
        }
        if let Some(level) = lookup("RUST_LOG") {
            config.log_level = Some(level);
        }
        if lookup("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        if let Some(service) = config_file.service {
            if let Some(model_id) = service.model_id {
                self.model_id = model_id;
            }
            if let Some(bind_host) = service.bind_host {
                self.bind_host = bind_host;
            }
            if let Some(bind_port) = service.bind_port {
                self.bind_port = bind_port;
            }
            if let Some(endpoint) = service.retrieval_endpoint {
                self.retrieval_endpoint = endpoint;
            }
            if let Some(endpoint) = service.guardrail_endpoint {
                self.guardrail_endpoint = endpoint;
            }
            if let Some(endpoint) = service.model_endpoint {
                self.model_endpoint = endpoint;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        Ok(self)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and config file.
    pub fn with_overrides(
        mut self,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose && self.log_level.is_none() {
            self.log_level = Some("debug".to_string());
        }

        if no_color {
            self.no_color = true;
        }

        self
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> AppResult<String> {
    match lookup(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::Config(format!(
            "Required environment variable not set: {}",
            key
        ))),
    }
}

fn parse_port(raw: &str) -> AppResult<u16> {
    raw.parse::<u16>()
        .map_err(|e| AppError::Config(format!("Invalid BIND_PORT '{}': {}", raw, e)))
}
