pub mod transcript;
pub mod voice;

use async_trait::async_trait;

pub use transcript::{Speaker, Transcript, TranscriptEntry};
pub use voice::SystemVoice;

/// Text-to-speech. `say` returns once the line has been spoken.
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    async fn say(&self, text: &str);
}
