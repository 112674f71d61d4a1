use std::time::Duration;

/// Per-run execution bounds.
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    /// Hard upper bound on executed nodes. The mechanism preventing runaway
    /// conditional loops; `0` fails the run before the entry node runs.
    pub max_iterations: u64,
    /// Wall-clock budget, checked between nodes (a running node is never
    /// preempted).
    pub timeout: Option<Duration>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            timeout: None,
        }
    }
}
