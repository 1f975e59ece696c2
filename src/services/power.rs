//! Platform power control. One command table per target OS.

use async_trait::async_trait;
use tracing::{info, warn};

use super::PowerControl;
use crate::error::PowerError;
use crate::kernel::intent::PowerAction;

#[cfg(target_os = "windows")]
fn command_for(action: PowerAction) -> Option<&'static [&'static str]> {
    Some(match action {
        PowerAction::Lock => &["rundll32.exe", "user32.dll,LockWorkStation"],
        PowerAction::Shutdown => &["shutdown", "/s", "/t", "1"],
        PowerAction::Restart => &["shutdown", "/r", "/t", "1"],
    })
}

#[cfg(target_os = "macos")]
fn command_for(action: PowerAction) -> Option<&'static [&'static str]> {
    Some(match action {
        // Ctrl+Cmd+Q locks regardless of the display-sleep password setting.
        // Needs the Accessibility permission for the calling terminal.
        PowerAction::Lock => &[
            "osascript",
            "-e",
            r#"tell application "System Events" to keystroke "q" using {control down, command down}"#,
        ],
        PowerAction::Shutdown => &["shutdown", "-h", "now"],
        PowerAction::Restart => &["shutdown", "-r", "now"],
    })
}

#[cfg(target_os = "linux")]
fn command_for(action: PowerAction) -> Option<&'static [&'static str]> {
    Some(match action {
        PowerAction::Lock => &["loginctl", "lock-session"],
        PowerAction::Shutdown => &["shutdown", "-h", "now"],
        PowerAction::Restart => &["reboot"],
    })
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn command_for(_action: PowerAction) -> Option<&'static [&'static str]> {
    None
}

/// Runs the OS power commands for the current platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPower;

impl SystemPower {
    async fn run(&self, action: PowerAction) -> Result<(), PowerError> {
        let Some((&program, args)) = command_for(action).and_then(|cmd| cmd.split_first()) else {
            return Err(PowerError::Unsupported);
        };

        info!(?action, program, "running power command");
        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => PowerError::Unsupported,
                std::io::ErrorKind::PermissionDenied => PowerError::PermissionDenied,
                _ => PowerError::CommandFailed(e.to_string()),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(?action, status = %output.status, stderr = %stderr.trim(), "power command exited with failure");
        Err(classify_failure(&stderr))
    }
}

#[async_trait]
impl PowerControl for SystemPower {
    async fn lock(&self) -> Result<(), PowerError> {
        self.run(PowerAction::Lock).await
    }

    async fn shutdown(&self) -> Result<(), PowerError> {
        self.run(PowerAction::Shutdown).await
    }

    async fn restart(&self) -> Result<(), PowerError> {
        self.run(PowerAction::Restart).await
    }
}

/// Map a failed command's stderr to an error kind.
pub fn classify_failure(stderr: &str) -> PowerError {
    let lower = stderr.to_lowercase();
    let denied = [
        "permission denied",
        "not permitted",
        "must be root",
        "access is denied",
        "interactive authentication required",
        "not allowed to send keystrokes",
    ];
    if denied.iter().any(|marker| lower.contains(marker)) {
        PowerError::PermissionDenied
    } else {
        PowerError::CommandFailed(stderr.trim().to_string())
    }
}
