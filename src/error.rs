//! Error types for voxcmd
//!
//! Recoverable failures (`ListenError`, `LookupError`, `PowerError`) are
//! turned into speech by the dispatcher. `Error` covers adapter setup and is
//! fatal at startup.

use thiserror::Error;

/// Result type alias for adapter setup and I/O
pub type Result<T> = std::result::Result<T, Error>;

/// Startup and adapter faults
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Audio device error
    #[error("audio error: {0}")]
    Audio(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Why a listen call produced no utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListenError {
    /// Silence until the listen timeout elapsed
    #[error("no speech detected")]
    NoSpeechDetected,

    /// Audio was captured but could not be turned into words
    #[error("speech was not recognized")]
    UnrecognizedSpeech,

    /// Recognition service or audio device failed
    #[error("speech service unavailable")]
    ServiceUnavailable,
}

/// Lookup service failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No page matches the topic
    #[error("no page found for '{0}'")]
    NotFound(String),

    /// Network failure, timeout or ambiguous topic
    #[error("lookup failed: {0}")]
    LookupFailed(String),
}

/// Platform power command failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PowerError {
    /// The command ran but the OS refused it
    #[error("permission denied")]
    PermissionDenied,

    /// No command exists for this platform
    #[error("not supported on this platform")]
    Unsupported,

    /// The command could not be spawned or exited non-zero
    #[error("power command failed: {0}")]
    CommandFailed(String),
}
