//! Speech Input Adapter: microphone capture, phrase segmentation, STT.

pub mod capture;
pub mod listener;
pub mod processing;

use async_trait::async_trait;

use crate::error::ListenError;
use crate::kernel::utterance::Utterance;

pub use listener::MicrophoneListener;

/// Produces one utterance per call.
#[async_trait]
pub trait SpeechInput: Send {
    async fn listen(&mut self) -> Result<Utterance, ListenError>;
}
