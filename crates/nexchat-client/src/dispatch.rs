use bytes::Bytes;
use futures_util::Stream;
use nexchat_core::{Message, NexchatError, NexchatResult};
use tracing::{debug, warn};

use crate::config::EndpointConfig;
use crate::wire::ChatRequest;

/// Sends one chat completion request and hands back the response stream.
///
/// The dispatcher has no side effects beyond the network call: it never
/// touches the transcript or the view. All failure modes (network error,
/// non-success status, broken body) surface as the single uniform
/// [`NexchatError::Transport`]; the cause is only distinguished in logs.
pub struct Dispatcher {
    http: reqwest::Client,
    config: EndpointConfig,
}

impl Dispatcher {
    /// Creates a dispatcher for the given endpoint.
    pub fn new(config: EndpointConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// POSTs the full history snapshot as `{"history":[...]}` and returns
    /// the response body as a byte-chunk stream.
    ///
    /// The snapshot must contain at least the just-appended user message.
    pub async fn send(
        &self,
        history: &[Message],
    ) -> NexchatResult<impl Stream<Item = reqwest::Result<Bytes>>> {
        let body = ChatRequest::from_messages(history);
        debug!(
            url = %self.config.url,
            messages = history.len(),
            "dispatching chat request"
        );

        let response = self
            .http
            .post(&self.config.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "chat request failed");
                NexchatError::Transport(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "chat endpoint returned non-success status");
            return Err(NexchatError::Transport(format!(
                "endpoint returned status {status}"
            )));
        }

        Ok(response.bytes_stream())
    }
}
