use uuid::Uuid;

use crate::outputs::transcript::Transcript;

/// What the front end should do after a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Per-process session state.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    running: bool,
    pub transcript: Transcript,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            running: true,
            transcript: Transcript::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Set by the exit handler only.
    pub(crate) fn end(&mut self) {
        self.running = false;
    }

    pub fn flow(&self) -> Flow {
        if self.running {
            Flow::Continue
        } else {
            Flow::Exit
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
