//! External collaborators behind uniform traits.

pub mod browser;
pub mod power;
pub mod stt;
pub mod wikipedia;

use async_trait::async_trait;

use crate::error::{LookupError, PowerError};

pub use browser::SystemBrowser;
pub use power::SystemPower;
pub use stt::SpeechToText;
pub use wikipedia::WikipediaClient;

/// Encyclopedia summary lookup
#[async_trait]
pub trait LookupService: Send + Sync {
    async fn summarize(&self, topic: &str, max_sentences: usize) -> Result<String, LookupError>;
}

/// Opens a URL in the user's browser. Fire-and-forget.
pub trait BrowserOpener: Send + Sync {
    fn open(&self, url: &str);
}

/// Lock, shut down or restart the machine
#[async_trait]
pub trait PowerControl: Send + Sync {
    async fn lock(&self) -> Result<(), PowerError>;
    async fn shutdown(&self) -> Result<(), PowerError>;
    async fn restart(&self) -> Result<(), PowerError>;
}
