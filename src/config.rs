//! Configuration
//!
//! Built-in defaults, optionally overridden by a TOML file at `$VOXCMD_CONFIG`,
//! then by individual environment variables.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable naming the optional TOML config file
pub const CONFIG_PATH_ENV: &str = "VOXCMD_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen: ListenConfig,
    pub stt: SttConfig,
    pub lookup: LookupConfig,
    pub voice: VoiceConfig,
}

/// Microphone capture parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Max wait for speech to start, in seconds
    pub timeout_secs: f32,
    /// Max length of one phrase, in seconds
    pub phrase_limit_secs: f32,
    /// Ambient noise calibration before each listen, in seconds
    pub calibration_secs: f32,
    /// Trailing silence that ends a phrase, in seconds
    pub pause_threshold_secs: f32,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 8.0,
            phrase_limit_secs: 15.0,
            calibration_secs: 1.5,
            pause_threshold_secs: 1.0,
        }
    }
}

impl ListenConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f32(self.timeout_secs.max(0.0))
    }

    #[must_use]
    pub fn calibration(&self) -> Duration {
        Duration::from_secs_f32(self.calibration_secs.max(0.0))
    }
}

/// Speech-to-text endpoint (any Whisper-compatible transcription API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SttConfig {
    pub url: String,
    pub model: String,
    pub language: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            url: "https://api.openai.com/v1/audio/transcriptions".to_string(),
            model: "whisper-1".to_string(),
            language: "en".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

/// Encyclopedia lookup endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub api_url: String,
    pub sentences: usize,
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_url: "https://en.wikipedia.org/w/api.php".to_string(),
            sentences: 2,
            timeout_secs: 8,
        }
    }
}

/// Text-to-speech command
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Overrides the platform default speech command (e.g. "espeak-ng")
    pub command: Option<String>,
    /// Voice name passed to the speech command when it supports one
    pub voice: Option<String>,
}

impl Config {
    /// Load defaults, the optional config file, then environment overrides
    ///
    /// # Errors
    ///
    /// Returns error if the config file cannot be read or parsed
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Apply environment overrides through a lookup function
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("VOXCMD_STT_URL") {
            self.stt.url = url;
        }
        if let Some(model) = var("VOXCMD_STT_MODEL") {
            self.stt.model = model;
        }
        if let Some(language) = var("VOXCMD_LANGUAGE") {
            self.stt.language = language;
        }
        if let Some(key) = var("OPENAI_API_KEY") {
            self.stt.api_key = Some(key);
        }
        if let Some(url) = var("VOXCMD_WIKI_URL") {
            self.lookup.api_url = url;
        }
        if let Some(command) = var("VOXCMD_TTS_COMMAND") {
            self.voice.command = Some(command);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.lookup.sentences == 0 {
            return Err(Error::Config("lookup.sentences must be at least 1".to_string()));
        }
        if self.listen.pause_threshold_secs <= 0.0 {
            return Err(Error::Config(
                "listen.pause_threshold_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let config: Config = toml::from_str(
            r#"
            [listen]
            timeout_secs = 3.0

            [lookup]
            sentences = 3
            "#,
        )
        .unwrap();

        assert!((config.listen.timeout_secs - 3.0).abs() < f32::EPSILON);
        assert!((config.listen.calibration_secs - 1.5).abs() < f32::EPSILON);
        assert_eq!(config.lookup.sentences, 3);
        assert_eq!(config.stt.model, "whisper-1");
    }

    #[test]
    fn env_overrides_file() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            "VOXCMD_STT_URL" => Some("http://localhost:9000/v1/audio/transcriptions".to_string()),
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            _ => None,
        });

        assert_eq!(config.stt.url, "http://localhost:9000/v1/audio/transcriptions");
        assert_eq!(config.stt.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.stt.language, "en");
    }

    #[test]
    fn zero_sentences_rejected() {
        let mut config = Config::default();
        config.lookup.sentences = 0;
        assert!(config.validate().is_err());
    }
}
