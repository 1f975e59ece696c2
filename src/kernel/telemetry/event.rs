use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ListenError, LookupError};
use crate::kernel::intent::{IntentKind, PowerAction};
use crate::kernel::power::ConfirmationPhase;

// Allowed: IDs, Counts, Enums
// Forbidden: Text of any kind

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TelemetryEvent {
    Listen {
        outcome: ListenOutcome,
    },

    IntentFired {
        kind: IntentKind,
    },

    Lookup {
        outcome: LookupOutcome,
    },

    PowerTransition {
        from: ConfirmationPhase,
        to: ConfirmationPhase,
    },

    PowerCommand {
        action: PowerAction,
        succeeded: bool,
    },

    SessionSummary {
        session_id: Uuid,
        cycles: u64,
        silent_cycles: u64,
        intents_fired: u64,
        unrecognized: u64,
        power_commands_failed: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListenOutcome {
    Recognized,
    NoSpeech,
    Unrecognized,
    ServiceUnavailable,
}

impl From<ListenError> for ListenOutcome {
    fn from(error: ListenError) -> Self {
        match error {
            ListenError::NoSpeechDetected => ListenOutcome::NoSpeech,
            ListenError::UnrecognizedSpeech => ListenOutcome::Unrecognized,
            ListenError::ServiceUnavailable => ListenOutcome::ServiceUnavailable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupOutcome {
    Found,
    NotFound,
    Failed,
}

impl From<&LookupError> for LookupOutcome {
    fn from(error: &LookupError) -> Self {
        match error {
            LookupError::NotFound(_) => LookupOutcome::NotFound, // Topic STRIPPED
            LookupError::LookupFailed(_) => LookupOutcome::Failed,
        }
    }
}
