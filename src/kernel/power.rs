use serde::{Deserialize, Serialize};

use crate::kernel::intent::PowerAction;
use crate::kernel::utterance::Utterance;

/// Token that confirms a destructive power action.
pub const AFFIRMATIVE: &str = "yes";

/// Phases of the power-action sub-dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfirmationPhase {
    /// No power action in flight.
    Idle,
    /// Prompt spoken; the next listen result decides.
    AwaitingConfirmation(PowerAction),
    /// Action goes ahead. Lock lands here directly.
    Confirmed(PowerAction),
    /// Anything but "yes", silence included.
    Aborted(PowerAction),
}

impl Default for ConfirmationPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Inputs that drive the sub-dialogue.
#[derive(Debug, Clone, Copy)]
pub enum DialogueInput<'a> {
    Request(PowerAction),
    /// Result of the single follow-up listen. None when nothing was recognized.
    Reply(Option<&'a Utterance>),
    /// The confirmed or aborted outcome has been acted on.
    Settled,
}

pub struct ConfirmationGraph;

impl ConfirmationGraph {
    /// Pure function: (Current Phase, Input) -> New Phase
    /// Returns None if the transition is invalid.
    pub fn transition(current: ConfirmationPhase, input: DialogueInput<'_>) -> Option<ConfirmationPhase> {
        use ConfirmationPhase::*;
        use DialogueInput::*;

        match (current, input) {
            (Idle, Request(action)) if action.needs_confirmation() => Some(AwaitingConfirmation(action)),
            (Idle, Request(action)) => Some(Confirmed(action)),

            (AwaitingConfirmation(action), Reply(Some(reply))) if reply.contains(AFFIRMATIVE) => {
                Some(Confirmed(action))
            }
            (AwaitingConfirmation(action), Reply(_)) => Some(Aborted(action)),

            (Confirmed(_) | Aborted(_), Settled) => Some(Idle),

            _ => None,
        }
    }
}

/// Holds the current phase. The dispatcher is its only writer.
#[derive(Debug, Default)]
pub struct PowerDialogue {
    phase: ConfirmationPhase,
}

impl PowerDialogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ConfirmationPhase {
        self.phase
    }

    /// Apply an input. Invalid inputs leave the phase untouched.
    pub fn apply(&mut self, input: DialogueInput<'_>) -> ConfirmationPhase {
        match ConfirmationGraph::transition(self.phase, input) {
            Some(next) => {
                tracing::debug!(from = ?self.phase, to = ?next, "power dialogue transition");
                self.phase = next;
            }
            None => tracing::warn!(phase = ?self.phase, input = ?input, "ignored power dialogue input"),
        }
        self.phase
    }
}
