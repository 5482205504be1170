//! Configuration types, built from environment variables.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::llm::{LlmBackend, LlmConfig};
use crate::wizard::AnalysisConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// JSON catalog to load instead of the built-in questionnaire.
    pub catalog_path: Option<PathBuf>,
    /// Serve the HTTP API on this port instead of running the CLI.
    pub http_port: Option<u16>,
    pub llm: LlmConfig,
    pub analysis: AnalysisConfig,
}

impl WizardConfig {
    /// Build config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog_path = lookup("WIZARD_CATALOG_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let http_port = lookup("WIZARD_HTTP_PORT")
            .map(|s| parse_value::<u16>("WIZARD_HTTP_PORT", &s))
            .transpose()?;

        let backend: LlmBackend = lookup("WIZARD_LLM_BACKEND")
            .map(|s| s.parse::<LlmBackend>())
            .transpose()?
            .unwrap_or(LlmBackend::Anthropic);

        let api_key = lookup(backend.api_key_var())
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(backend.api_key_var().to_string()))?;

        let model = lookup("WIZARD_MODEL").unwrap_or_else(|| backend.default_model().to_string());

        let defaults = AnalysisConfig::default();
        let temperature = lookup("WIZARD_ANALYSIS_TEMPERATURE")
            .map(|s| parse_value::<f32>("WIZARD_ANALYSIS_TEMPERATURE", &s))
            .transpose()?
            .unwrap_or(defaults.temperature);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                key: "WIZARD_ANALYSIS_TEMPERATURE".to_string(),
                message: format!("{temperature} is outside 0.0..=2.0"),
            });
        }

        let max_tokens = lookup("WIZARD_ANALYSIS_MAX_TOKENS")
            .map(|s| parse_value::<u32>("WIZARD_ANALYSIS_MAX_TOKENS", &s))
            .transpose()?
            .unwrap_or(defaults.max_tokens);

        Ok(Self {
            catalog_path,
            http_port,
            llm: LlmConfig {
                backend,
                api_key: SecretString::from(api_key),
                model,
            },
            analysis: AnalysisConfig {
                temperature,
                max_tokens,
            },
        })
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("'{raw}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_with_only_api_key() {
        let config = WizardConfig::from_lookup(lookup(&[("ANTHROPIC_API_KEY", "sk-ant-test")])).unwrap();
        assert!(config.catalog_path.is_none());
        assert!(config.http_port.is_none());
        assert_eq!(config.llm.backend, LlmBackend::Anthropic);
        assert_eq!(config.llm.model, "claude-sonnet-4-20250514");
        assert_eq!(config.llm.api_key.expose_secret(), "sk-ant-test");
        assert_eq!(config.analysis.max_tokens, 2048);
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = WizardConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(var) if var == "ANTHROPIC_API_KEY"));
    }

    #[test]
    fn openai_backend_reads_its_own_key() {
        let config = WizardConfig::from_lookup(lookup(&[
            ("WIZARD_LLM_BACKEND", "openai"),
            ("OPENAI_API_KEY", "sk-test"),
            ("WIZARD_MODEL", "gpt-4o-mini"),
        ]))
        .unwrap();
        assert_eq!(config.llm.backend, LlmBackend::OpenAi);
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }

    #[test]
    fn overrides_are_parsed() {
        let config = WizardConfig::from_lookup(lookup(&[
            ("ANTHROPIC_API_KEY", "k"),
            ("WIZARD_CATALOG_PATH", "/etc/wizard/catalog.json"),
            ("WIZARD_HTTP_PORT", "8080"),
            ("WIZARD_ANALYSIS_TEMPERATURE", "0.2"),
            ("WIZARD_ANALYSIS_MAX_TOKENS", "4096"),
        ]))
        .unwrap();
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/wizard/catalog.json"))
        );
        assert_eq!(config.http_port, Some(8080));
        assert_eq!(config.analysis.temperature, 0.2);
        assert_eq!(config.analysis.max_tokens, 4096);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_port = WizardConfig::from_lookup(lookup(&[
            ("ANTHROPIC_API_KEY", "k"),
            ("WIZARD_HTTP_PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(bad_port, ConfigError::InvalidValue { key, .. } if key == "WIZARD_HTTP_PORT"));

        let hot = WizardConfig::from_lookup(lookup(&[
            ("ANTHROPIC_API_KEY", "k"),
            ("WIZARD_ANALYSIS_TEMPERATURE", "5"),
        ]))
        .unwrap_err();
        assert!(matches!(hot, ConfigError::InvalidValue { .. }));
    }
}
