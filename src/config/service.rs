use crate::generation::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::utils::error::{NumeraError, Result};
use crate::utils::rate_limit::RateLimitConfig;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub generator: GeneratorSection,
    pub rate_limit: Option<RateLimitSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSection {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSection {
    pub per_minute: Option<u32>,
    pub per_hour: Option<u32>,
    pub per_day: Option<u32>,
}

impl ServiceConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NumeraError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string, substituting `${VAR}`
    /// references with environment variables first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| NumeraError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Builds a configuration purely from environment variables, used when
    /// no configuration file is supplied.
    pub fn from_env() -> Self {
        let parse_u32 = |name: &str| std::env::var(name).ok().and_then(|v| v.parse().ok());

        Self {
            generator: GeneratorSection {
                api_key: std::env::var("OPENAI_API_KEY").ok(),
                model: std::env::var("OPENAI_MODEL").ok(),
                temperature: std::env::var("OPENAI_TEMPERATURE")
                    .ok()
                    .and_then(|v| v.parse().ok()),
                max_tokens: parse_u32("OPENAI_MAX_TOKENS"),
                endpoint: std::env::var("OPENAI_ENDPOINT").ok(),
            },
            rate_limit: Some(RateLimitSection {
                per_minute: parse_u32("RATE_LIMIT_PER_MINUTE"),
                per_hour: parse_u32("RATE_LIMIT_HOURLY"),
                per_day: parse_u32("RATE_LIMIT_DAILY"),
            }),
        }
    }

    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        // ${VAR_NAME} placeholders; unset variables are left as-is
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.generator
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty() && !key.starts_with("${"))
    }

    pub fn model(&self) -> &str {
        self.generator.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn temperature(&self) -> f32 {
        self.generator.temperature.unwrap_or(0.7)
    }

    pub fn max_tokens(&self) -> u32 {
        self.generator.max_tokens.unwrap_or(4000)
    }

    pub fn endpoint(&self) -> &str {
        self.generator.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn rate_limits(&self) -> RateLimitConfig {
        let defaults = RateLimitConfig::default();
        match &self.rate_limit {
            Some(section) => RateLimitConfig {
                per_minute: section.per_minute.unwrap_or(defaults.per_minute),
                per_hour: section.per_hour.unwrap_or(defaults.per_hour),
                per_day: section.per_day.unwrap_or(defaults.per_day),
            },
            None => defaults,
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("generator.endpoint", self.endpoint())?;
        validate_non_empty_string("generator.model", self.model())?;
        validate_range("generator.temperature", self.temperature(), 0.0, 2.0)?;
        validate_range("generator.max_tokens", self.max_tokens(), 1, 128_000)?;

        let limits = self.rate_limits();
        validate_range("rate_limit.per_minute", limits.per_minute, 1, 10_000)?;
        validate_range("rate_limit.per_hour", limits.per_hour, 1, 10_000)?;
        validate_range("rate_limit.per_day", limits.per_day, 1, 100_000)?;

        Ok(())
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
