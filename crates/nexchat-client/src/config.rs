use serde::{Deserialize, Serialize};

/// Where to send chat completion requests.
///
/// The endpoint URL is the client's single piece of configuration; it is
/// always supplied externally (config file or CLI flag).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// URL of the chat completion endpoint.
    pub url: String,
}

impl EndpointConfig {
    /// Creates a config pointing at the given endpoint URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
