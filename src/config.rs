use thiserror::Error;

use crate::strategy::Strategy;

/// Environment variable selecting the evaluation strategy.
pub const STRATEGY_VAR: &str = "PEOPLE_COLLECTORS_STRATEGY";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown evaluation strategy '{value}' (expected sequential, parallel, chunked or chunked:<n>)")]
    InvalidStrategy { value: String },

    #[error("Invalid chunk count '{value}': expected a positive integer")]
    InvalidChunkCount { value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DemoConfig {
    pub strategy: Strategy,
}

impl DemoConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let strategy = match lookup(STRATEGY_VAR) {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => Strategy::default(),
        };
        Ok(DemoConfig { strategy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_to_parallel() {
        let config = DemoConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.strategy, Strategy::Parallel);

        let blank = DemoConfig::from_lookup(lookup_from(&[(STRATEGY_VAR, "  ")])).unwrap();
        assert_eq!(blank, DemoConfig::default());
    }

    #[test]
    fn test_reads_strategy() {
        let config = DemoConfig::from_lookup(lookup_from(&[(STRATEGY_VAR, "chunked:2")])).unwrap();
        assert_eq!(config.strategy, Strategy::Chunked(2));
    }

    #[test]
    fn test_invalid_strategy_is_an_error() {
        let err = DemoConfig::from_lookup(lookup_from(&[(STRATEGY_VAR, "lazy")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidStrategy { value: "lazy".into() });
        assert!(err.to_string().contains("lazy"));
    }
}
