// crates/testsmith-server/src/http.rs
// Shared HTTP client construction for calls to the model host

use std::time::Duration;

/// Default request timeout for model calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Create an HTTP client with the given request timeout.
///
/// Create once per model host; reqwest pools connections internally.
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .pool_max_idle_per_host(4)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
