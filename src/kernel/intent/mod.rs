//! Intent classification: an ordered table of substring rules.

pub mod rules;
pub mod types;

pub use rules::{classify, matching_rule, IntentRule, LOOKUP_TRIGGERS, RULES};
pub use types::{Intent, IntentKind, PowerAction, Site, SmallTalk};
