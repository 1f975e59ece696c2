//! Platform text-to-speech through a command-line synthesizer

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::SpeechOutput;
use crate::config::VoiceConfig;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Synthesizer {
    /// macOS `say`
    Say,
    /// `espeak-ng` / `espeak`
    Espeak,
    /// speech-dispatcher `spd-say`
    SpdSay,
    /// Windows SAPI through PowerShell
    Sapi,
    /// Any other program taking the text as its last argument
    Custom,
}

/// Speaks by running the platform synthesizer and waiting for it to exit.
#[derive(Debug, Clone)]
pub struct SystemVoice {
    program: PathBuf,
    kind: Synthesizer,
    voice: Option<String>,
}

impl SystemVoice {
    /// Pick the configured synthesizer, or the first one found on PATH
    ///
    /// # Errors
    ///
    /// Returns error if no synthesizer is installed
    pub fn detect(config: &VoiceConfig) -> Result<Self> {
        if let Some(command) = &config.command {
            let program = find_on_path(command)
                .ok_or_else(|| Error::Tts(format!("configured speech command '{command}' not found")))?;
            return Ok(Self {
                kind: kind_of(command),
                program,
                voice: config.voice.clone(),
            });
        }

        let candidates: &[&str] = if cfg!(target_os = "macos") {
            &["say"]
        } else if cfg!(target_os = "windows") {
            &["powershell"]
        } else {
            &["espeak-ng", "espeak", "spd-say"]
        };

        candidates
            .iter()
            .find_map(|name| {
                find_on_path(name).map(|program| Self {
                    program,
                    kind: kind_of(name),
                    voice: config.voice.clone(),
                })
            })
            .ok_or_else(|| Error::Tts(format!("no speech synthesizer found (tried {})", candidates.join(", "))))
    }

    fn command(&self, text: &str) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        match self.kind {
            Synthesizer::Say | Synthesizer::Espeak => {
                if let Some(voice) = &self.voice {
                    cmd.args(["-v", voice.as_str()]);
                }
                cmd.arg(text);
            }
            Synthesizer::SpdSay => {
                // -w waits until the message is spoken
                cmd.arg("-w");
                if let Some(voice) = &self.voice {
                    cmd.args(["-y", voice.as_str()]);
                }
                cmd.arg(text);
            }
            Synthesizer::Sapi => {
                let script = sapi_script(text, self.voice.as_deref());
                cmd.args(["-NoProfile", "-NonInteractive", "-Command", script.as_str()]);
            }
            Synthesizer::Custom => {
                cmd.arg(text);
            }
        }
        cmd.kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl SpeechOutput for SystemVoice {
    async fn say(&self, text: &str) {
        debug!(program = %self.program.display(), "speaking");
        match self.command(text).status().await {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(%status, "speech command exited with failure"),
            Err(e) => warn!(error = %e, "failed to spawn speech command"),
        }
    }
}

fn kind_of(command: &str) -> Synthesizer {
    let name = Path::new(command)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(command)
        .to_lowercase();
    match name.as_str() {
        "say" => Synthesizer::Say,
        "espeak-ng" | "espeak" => Synthesizer::Espeak,
        "spd-say" => Synthesizer::SpdSay,
        "powershell" | "pwsh" => Synthesizer::Sapi,
        _ => Synthesizer::Custom,
    }
}

fn sapi_script(text: &str, voice: Option<&str>) -> String {
    let quote = |s: &str| s.replace('\'', "''");
    let select = voice
        .map(|v| format!("$s.SelectVoice('{}'); ", quote(v)))
        .unwrap_or_default();
    format!(
        "Add-Type -AssemblyName System.Speech; $s = New-Object System.Speech.Synthesis.SpeechSynthesizer; {select}$s.Speak('{}')",
        quote(text)
    )
}

fn find_on_path(command: &str) -> Option<PathBuf> {
    which::which(command).ok()
}
