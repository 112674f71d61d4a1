//! Coordinator-level configuration.
//!
//! Read directly from the environment variables `spec.md` §6 names; there is
//! no layered config-file loader here, since that machinery belongs to the
//! excluded CLI bootstrap.

use std::time::Duration;

/// Bounds the coordinator applies to every run it schedules, independent of
/// any per-run overrides a caller supplies at `start_run` time.
#[derive(Debug, Clone, Copy)]
pub struct CoordinatorConfig {
    /// Semaphore bound on concurrently-executing runs.
    pub max_concurrent_runs: usize,
    /// Default hard iteration bound for a run that doesn't override it.
    pub default_max_iterations: u64,
    /// Default wall-clock budget for a run that doesn't override it.
    pub default_run_timeout: Option<Duration>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_runs: 100,
            default_max_iterations: 100,
            default_run_timeout: None,
        }
    }
}

impl CoordinatorConfig {
    /// Builds a config from `MAX_CONCURRENT_RUNS`, `DEFAULT_MAX_ITERATIONS`,
    /// and `DEFAULT_RUN_TIMEOUT_SECONDS`, falling back to [`Default`] for any
    /// variable that is unset or fails to parse.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_concurrent_runs: env_parsed("MAX_CONCURRENT_RUNS").unwrap_or(defaults.max_concurrent_runs),
            default_max_iterations: env_parsed("DEFAULT_MAX_ITERATIONS")
                .unwrap_or(defaults.default_max_iterations),
            default_run_timeout: env_parsed::<u64>("DEFAULT_RUN_TIMEOUT_SECONDS")
                .map(Duration::from_secs)
                .or(defaults.default_run_timeout),
        }
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    parse_value(std::env::var(key).ok())
}

/// The parsing half of `env_parsed`, split out so it can be exercised
/// without mutating process-global environment state (`std::env::set_var`
/// is `unsafe` and this crate forbids `unsafe_code`).
fn parse_value<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|value| value.parse().ok())
}
