use serde::{Deserialize, Serialize};

/// Websites with a dedicated open rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Site {
    YouTube,
    Google,
    StackOverflow,
}

impl Site {
    pub fn url(self) -> &'static str {
        match self {
            Site::YouTube => "https://www.youtube.com",
            Site::Google => "https://www.google.com",
            Site::StackOverflow => "https://stackoverflow.com",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerAction {
    /// Immediate, no confirmation.
    Lock,
    Shutdown,
    Restart,
}

impl PowerAction {
    pub fn needs_confirmation(self) -> bool {
        !matches!(self, PowerAction::Lock)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmallTalk {
    HowAreYou,
    WhoAreYou,
    Thanks,
}

/// What a single utterance asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Encyclopedia summary. `query` has trigger phrases removed.
    Lookup { query: String },
    Open(Site),
    /// "open <something>" with no registered website.
    OpenUnknown { target: String },
    TellTime,
    TellDate,
    Power(PowerAction),
    SmallTalk(SmallTalk),
    Exit,
    /// Default handler: nothing matched.
    Unrecognized,
}

/// Content-free label of an intent, safe for telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    Lookup,
    Open,
    OpenUnknown,
    TellTime,
    TellDate,
    Power,
    SmallTalk,
    Exit,
    Unrecognized,
}

impl From<&Intent> for IntentKind {
    fn from(intent: &Intent) -> Self {
        match intent {
            Intent::Lookup { .. } => IntentKind::Lookup, // Query STRIPPED
            Intent::Open(_) => IntentKind::Open,
            Intent::OpenUnknown { .. } => IntentKind::OpenUnknown, // Target STRIPPED
            Intent::TellTime => IntentKind::TellTime,
            Intent::TellDate => IntentKind::TellDate,
            Intent::Power(_) => IntentKind::Power,
            Intent::SmallTalk(_) => IntentKind::SmallTalk,
            Intent::Exit => IntentKind::Exit,
            Intent::Unrecognized => IntentKind::Unrecognized,
        }
    }
}
