use std::env;
use std::time::Duration;

use reqwest::Url;

use super::form::DEFAULT_FORM_SETTLE;

/// Upper bound on a single transport attempt.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct SubmitConfig {
    pub endpoint: Url,
    pub form_settle: Duration,
    pub attempt_timeout: Duration,
}

impl SubmitConfig {
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            form_settle: DEFAULT_FORM_SETTLE,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// Read `LEARN_RESULTS_ENDPOINT`, `LEARN_FORM_SETTLE_MS` and
    /// `LEARN_SUBMIT_TIMEOUT_MS`.
    ///
    /// Returns `None` when no endpoint is set or it is not a valid URL.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_vars(
            env::var("LEARN_RESULTS_ENDPOINT").ok().as_deref(),
            env::var("LEARN_FORM_SETTLE_MS").ok().as_deref(),
            env::var("LEARN_SUBMIT_TIMEOUT_MS").ok().as_deref(),
        )
    }

    fn from_vars(
        endpoint: Option<&str>,
        settle_ms: Option<&str>,
        timeout_ms: Option<&str>,
    ) -> Option<Self> {
        let endpoint = endpoint?.trim();
        if endpoint.is_empty() {
            return None;
        }
        let endpoint = match Url::parse(endpoint) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(%endpoint, error = %err, "ignoring invalid results endpoint");
                return None;
            }
        };
        Some(Self {
            endpoint,
            form_settle: millis(settle_ms).unwrap_or(DEFAULT_FORM_SETTLE),
            attempt_timeout: millis(timeout_ms)
                .filter(|timeout| !timeout.is_zero())
                .unwrap_or(DEFAULT_ATTEMPT_TIMEOUT),
        })
    }
}

fn millis(raw: Option<&str>) -> Option<Duration> {
    raw.and_then(|ms| ms.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_endpoint_disables_submission() {
        assert!(SubmitConfig::from_vars(None, None, None).is_none());
        assert!(SubmitConfig::from_vars(Some("  "), None, None).is_none());
        assert!(SubmitConfig::from_vars(Some("not a url"), None, None).is_none());
    }

    #[test]
    fn settle_delay_defaults_to_three_seconds() {
        let config =
            SubmitConfig::from_vars(Some("https://example.org/exec"), None, None).unwrap();
        assert_eq!(config.form_settle, Duration::from_secs(3));

        let config =
            SubmitConfig::from_vars(Some("https://example.org/exec"), Some("250"), None).unwrap();
        assert_eq!(config.form_settle, Duration::from_millis(250));
    }

    #[test]
    fn attempt_timeout_is_configurable_and_never_zero() {
        let config =
            SubmitConfig::from_vars(Some("https://example.org/exec"), None, None).unwrap();
        assert_eq!(config.attempt_timeout, DEFAULT_ATTEMPT_TIMEOUT);

        let config =
            SubmitConfig::from_vars(Some("https://example.org/exec"), None, Some("1500")).unwrap();
        assert_eq!(config.attempt_timeout, Duration::from_millis(1500));

        let config =
            SubmitConfig::from_vars(Some("https://example.org/exec"), None, Some("0")).unwrap();
        assert_eq!(config.attempt_timeout, DEFAULT_ATTEMPT_TIMEOUT);
    }
}
