use std::time::Duration;

/// Per-run overrides a caller supplies at [`crate::RunCoordinator::start_run`]
/// time, layered over [`crate::CoordinatorConfig`]'s defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub max_iterations: Option<u64>,
    pub timeout: Option<Duration>,
}
