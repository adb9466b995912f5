//! Driving one chat turn end to end.

use futures_util::StreamExt;
use nexchat_core::{Message, Role};
use nexchat_session::Transcript;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::EndpointConfig;
use crate::decoder::StreamDecoder;
use crate::dispatch::Dispatcher;
use crate::view::ChatView;

/// Fixed human-readable text shown in place of the reply when the
/// transport fails. Never appended to the transcript.
pub const CONNECTION_FAILED_NOTICE: &str =
    "Connection interrupted. Unable to reach the assistant.";

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The stream completed and produced text; an assistant message was
    /// appended to the transcript.
    Finalized {
        /// The assembled reply.
        reply: String,
    },
    /// The stream completed without producing any text. Not an error; no
    /// assistant record is appended.
    Empty,
    /// A transport-level failure. The failure notice was shown and no
    /// assistant record was appended.
    Failed,
    /// The cancellation token fired mid-stream. No assistant record was
    /// appended.
    Cancelled,
}

/// Runs one full user-submit-to-assistant-finalize cycle at a time.
///
/// State machine per turn: idle, requesting, streaming, then finalized or
/// failed. A decode error on an individual line stays within streaming;
/// only a transport-level error moves the turn to failed. Exactly one turn
/// is in flight at a time: the runner borrows the transcript and the view
/// mutably, and the view's input control stays disabled from submit to
/// finalize-or-fail.
///
/// There is no timeout: a stalled stream holds the turn open until the
/// transport gives up or the cancellation token fires. The token is the
/// caller's hook for imposing a deadline.
pub struct TurnRunner {
    dispatcher: Dispatcher,
}

impl TurnRunner {
    /// Creates a runner that talks to the given endpoint.
    pub fn new(config: EndpointConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(config),
        }
    }

    /// Creates a runner from a pre-built dispatcher.
    pub fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Runs one chat turn: append the user message, stream the reply into
    /// the view, and finalize it into the transcript.
    ///
    /// The input is expected to be non-empty; callers filter blank
    /// submissions before reaching the runner. The view's input control is
    /// re-enabled on every exit path.
    pub async fn run_turn(
        &self,
        transcript: &mut Transcript,
        input: &str,
        view: &mut dyn ChatView,
        cancel: &CancellationToken,
    ) -> TurnOutcome {
        view.show_message(&Role::User, input);
        transcript.append(Message::user(input, transcript.id()));
        view.set_input_enabled(false);
        view.begin_reply();

        let outcome = self.drive(transcript, view, cancel).await;

        view.set_input_enabled(true);
        info!(?outcome, "turn finished");
        outcome
    }

    async fn drive(
        &self,
        transcript: &mut Transcript,
        view: &mut dyn ChatView,
        cancel: &CancellationToken,
    ) -> TurnOutcome {
        let stream = match self.dispatcher.send(transcript.snapshot()).await {
            Ok(stream) => stream,
            Err(err) => {
                warn!(error = %err, "turn failed before streaming started");
                view.fail_reply(CONNECTION_FAILED_NOTICE);
                return TurnOutcome::Failed;
            }
        };
        tokio::pin!(stream);

        let mut decoder = StreamDecoder::new();
        // Local mirror of the decoder's accumulated reply, so the view can
        // be updated once per fragment rather than once per chunk.
        let mut shown = String::new();

        loop {
            tokio::select! {
                // Cancellation wins a race with an arriving chunk.
                biased;
                _ = cancel.cancelled() => {
                    debug!("turn cancelled mid-stream");
                    view.finish_reply();
                    return TurnOutcome::Cancelled;
                }
                chunk = stream.next() => match chunk {
                    None => break,
                    Some(Ok(bytes)) => {
                        for fragment in decoder.push(&bytes) {
                            shown.push_str(&fragment);
                            view.update_reply(&shown);
                        }
                    }
                    Some(Err(err)) => {
                        warn!(error = %err, "stream read failed mid-turn");
                        view.fail_reply(CONNECTION_FAILED_NOTICE);
                        return TurnOutcome::Failed;
                    }
                }
            }
        }

        let reply = decoder.finish();
        if reply.is_empty() {
            debug!("stream produced no text; nothing appended");
            view.finish_reply();
            return TurnOutcome::Empty;
        }

        transcript.append(Message::assistant(&reply, transcript.id()));
        view.finish_reply();
        TurnOutcome::Finalized { reply }
    }
}
