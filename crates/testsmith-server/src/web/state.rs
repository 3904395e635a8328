// crates/testsmith-server/src/web/state.rs
// Web server state management

use std::time::Instant;

use crate::generator::TestGenerator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Generation pipeline (template registry + model client)
    pub generator: TestGenerator,

    /// Process start, for the health endpoint's uptime
    pub started_at: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(generator: TestGenerator) -> Self {
        Self {
            generator,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the server started
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
