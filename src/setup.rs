//! Startup wiring shared by the binaries and the desktop shell

use tracing_subscriber::EnvFilter;

use crate::audio::{MicrophoneListener, SpeechInput};
use crate::config::Config;
use crate::kernel::clock::SystemClock;
use crate::kernel::dispatcher::{Adapters, Dispatcher};
use crate::outputs::SystemVoice;
use crate::services::{SpeechToText, SystemBrowser, SystemPower, WikipediaClient};
use crate::Result;

const DEFAULT_FILTER: &str = "info,voxcmd=info";

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // A second call (e.g. shell + library) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Microphone listener backed by the configured STT endpoint
///
/// # Errors
///
/// Returns error if there is no input device
pub fn microphone(config: &Config) -> Result<Box<dyn SpeechInput>> {
    let stt = SpeechToText::new(&config.stt);
    Ok(Box::new(MicrophoneListener::new(config.listen.clone(), stt)?))
}

/// Dispatcher wired to the real platform adapters
///
/// # Errors
///
/// Returns error if no speech synthesizer is available
pub fn dispatcher(config: &Config, input: Box<dyn SpeechInput>) -> Result<Dispatcher> {
    let voice = SystemVoice::detect(&config.voice)?;
    let adapters = Adapters {
        input,
        output: Box::new(voice),
        lookup: Box::new(WikipediaClient::new(&config.lookup)),
        browser: Box::new(SystemBrowser),
        power: Box::new(SystemPower),
        clock: Box::new(SystemClock),
    };
    Ok(Dispatcher::new(adapters).with_lookup_sentences(config.lookup.sentences))
}
