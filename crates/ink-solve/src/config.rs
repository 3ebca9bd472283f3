//! Solver connection settings.

use crate::error::{Result, SolveError};
use reqwest::Url;
use std::time::Duration;

/// Environment variable overriding the service base URL.
pub const URL_VAR: &str = "INK_SOLVE_URL";
/// Environment variable overriding the request timeout, in whole seconds.
pub const TIMEOUT_VAR: &str = "INK_SOLVE_TIMEOUT_SECS";

/// Configuration for `HttpSolveService`.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Service root. The solve endpoint is `<base_url>/solve`.
    pub base_url: String,

    /// Upper bound on one request round trip. Default: **30s**.
    pub timeout: Duration,

    pub user_agent: String,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8900".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("ink-solve/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl SolverConfig {
    /// Defaults, overridden by `INK_SOLVE_URL` / `INK_SOLVE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup(URL_VAR) {
            config.base_url = url;
        }
        if let Some(secs) = lookup(TIMEOUT_VAR) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| SolveError::Config(format!("{TIMEOUT_VAR}={secs:?} is not a number")))?;
            config.timeout = Duration::from_secs(secs);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(SolveError::Config("timeout must be non-zero".into()));
        }
        self.root_url().map(|_| ())
    }

    /// `GET` target for the health check.
    pub fn root_url(&self) -> Result<Url> {
        Url::parse(self.base_url.trim_end_matches('/'))
            .map_err(|e| SolveError::Config(format!("bad base url {:?}: {e}", self.base_url)))
    }

    /// `POST` target for solve requests.
    pub fn solve_url(&self) -> Result<Url> {
        let joined = format!("{}/solve", self.base_url.trim_end_matches('/'));
        Url::parse(&joined).map_err(|e| SolveError::Config(format!("bad solve url {joined:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_point_at_local_service() {
        let config = SolverConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SolverConfig::default());
        assert_eq!(config.solve_url().unwrap().as_str(), "http://localhost:8900/solve");
    }

    #[test]
    fn env_overrides() {
        let config = SolverConfig::from_lookup(lookup(&[
            (URL_VAR, "https://calc.example.com/api/"),
            (TIMEOUT_VAR, " 5 "),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.solve_url().unwrap().as_str(),
            "https://calc.example.com/api/solve"
        );
    }

    #[test]
    fn bad_values_are_config_errors() {
        let err = SolverConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
        assert!(matches!(err, SolveError::Config(_)));

        let err = SolverConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "0")])).unwrap_err();
        assert!(matches!(err, SolveError::Config(_)));

        let err = SolverConfig::from_lookup(lookup(&[(URL_VAR, "not a url")])).unwrap_err();
        assert!(matches!(err, SolveError::Config(_)));
    }
}
