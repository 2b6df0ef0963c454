use std::time::Duration;

use anyhow::Context;
use cepfinder_lookup::provider::{brasil_api, via_cep};
use cepfinder_lookup::{Backoff, PostalCode, RetryPolicy, DEFAULT_DEADLINE};

/// The postal code every run looks up.
pub const POSTAL_CODE: &str = "60541646";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub postal_code: PostalCode,
    pub deadline: Duration,
    pub retry: RetryPolicy,
    pub brasil_api_url: String,
    pub via_cep_url: String,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let deadline = millis(&lookup, "CEPFINDER_TIMEOUT_MS")?
            .filter(|d| !d.is_zero())
            .unwrap_or(DEFAULT_DEADLINE);

        let max_attempts = number(&lookup, "CEPFINDER_MAX_ATTEMPTS")?.unwrap_or(0);
        let max_attempts = u32::try_from(max_attempts)
            .context("CEPFINDER_MAX_ATTEMPTS does not fit in 32 bits")?;

        let backoff = match millis(&lookup, "CEPFINDER_BACKOFF_MS")? {
            Some(delay) if !delay.is_zero() => Backoff::Fixed(delay),
            _ => Backoff::None,
        };

        let per_attempt_timeout =
            millis(&lookup, "CEPFINDER_ATTEMPT_TIMEOUT_MS")?.filter(|d| !d.is_zero());

        let retry = RetryPolicy::unbounded()
            .with_max_attempts(max_attempts)
            .with_backoff(backoff)
            .with_per_attempt_timeout(per_attempt_timeout);

        let log_format = match lookup("CEPFINDER_LOG_FORMAT") {
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(value) if value.eq_ignore_ascii_case("text") => LogFormat::Text,
            None => LogFormat::Text,
            Some(other) => {
                anyhow::bail!("CEPFINDER_LOG_FORMAT must be 'text' or 'json', got '{}'", other)
            }
        };

        Ok(Self {
            postal_code: POSTAL_CODE.to_string(),
            deadline,
            retry,
            brasil_api_url: lookup("CEPFINDER_BRASILAPI_URL")
                .unwrap_or_else(|| brasil_api::DEFAULT_BASE_URL.to_string()),
            via_cep_url: lookup("CEPFINDER_VIACEP_URL")
                .unwrap_or_else(|| via_cep::DEFAULT_BASE_URL.to_string()),
            log_format,
        })
    }
}

fn number<F>(lookup: &F, key: &str) -> anyhow::Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a non-negative integer, got '{}'", key, raw))
        })
        .transpose()
}

fn millis<F>(lookup: &F, key: &str) -> anyhow::Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(number(lookup, key)?.map(Duration::from_millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_match_the_fixed_race() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.postal_code, "60541646");
        assert_eq!(config.deadline, Duration::from_secs(1));
        assert_eq!(config.retry, RetryPolicy::unbounded());
        assert_eq!(config.brasil_api_url, "https://brasilapi.com.br");
        assert_eq!(config.via_cep_url, "http://viacep.com.br");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_reads_retry_settings() {
        let config = config_from(&[
            ("CEPFINDER_TIMEOUT_MS", "2500"),
            ("CEPFINDER_MAX_ATTEMPTS", "4"),
            ("CEPFINDER_BACKOFF_MS", "50"),
            ("CEPFINDER_ATTEMPT_TIMEOUT_MS", "300"),
            ("CEPFINDER_LOG_FORMAT", "JSON"),
        ])
        .unwrap();

        assert_eq!(config.deadline, Duration::from_millis(2500));
        assert!(config.retry.allows_attempt(4));
        assert!(!config.retry.allows_attempt(5));
        assert_eq!(config.retry.backoff, Backoff::Fixed(Duration::from_millis(50)));
        assert_eq!(
            config.retry.per_attempt_timeout,
            Some(Duration::from_millis(300))
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_zero_means_unset() {
        let config = config_from(&[
            ("CEPFINDER_TIMEOUT_MS", "0"),
            ("CEPFINDER_MAX_ATTEMPTS", "0"),
            ("CEPFINDER_BACKOFF_MS", "0"),
            ("CEPFINDER_ATTEMPT_TIMEOUT_MS", "0"),
        ])
        .unwrap();

        assert_eq!(config.deadline, DEFAULT_DEADLINE);
        assert_eq!(config.retry, RetryPolicy::unbounded());
    }

    #[test]
    fn test_postal_code_is_not_configurable() {
        let config = config_from(&[("CEPFINDER_POSTAL_CODE", "01001000")]).unwrap();
        assert_eq!(config.postal_code, POSTAL_CODE);
    }

    #[test]
    fn test_rejects_malformed_values() {
        let error = config_from(&[("CEPFINDER_TIMEOUT_MS", "soon")]).unwrap_err();
        assert!(error.to_string().contains("CEPFINDER_TIMEOUT_MS"));

        assert!(config_from(&[("CEPFINDER_MAX_ATTEMPTS", "-1")]).is_err());
        assert!(config_from(&[("CEPFINDER_LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_overrides_provider_urls() {
        let config = config_from(&[
            ("CEPFINDER_BRASILAPI_URL", "http://127.0.0.1:8001"),
            ("CEPFINDER_VIACEP_URL", "http://127.0.0.1:8002"),
        ])
        .unwrap();
        assert_eq!(config.brasil_api_url, "http://127.0.0.1:8001");
        assert_eq!(config.via_cep_url, "http://127.0.0.1:8002");
    }
}
