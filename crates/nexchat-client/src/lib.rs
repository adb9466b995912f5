//! The nexchat client core: dispatching a conversation to a streaming
//! completion endpoint and decoding the response token by token.
//!
//! The control flow for one chat turn is: append the user message to the
//! transcript, POST the full transcript snapshot ([`dispatch::Dispatcher`]),
//! feed the chunked response through [`decoder::StreamDecoder`], mirror
//! every extracted fragment into a [`view::ChatView`], and finalize the
//! assembled reply back into the transcript ([`turn::TurnRunner`]).

pub mod config;
pub mod decoder;
pub mod dispatch;
pub mod turn;
pub mod view;
pub mod wire;

pub use config::EndpointConfig;
pub use decoder::{DecodeObserver, StreamDecoder, TracingObserver};
pub use dispatch::Dispatcher;
pub use turn::{TurnOutcome, TurnRunner, CONNECTION_FAILED_NOTICE};
pub use view::ChatView;
