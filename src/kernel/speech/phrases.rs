//! Every line the assistant speaks.

use crate::error::{ListenError, LookupError, PowerError};
use crate::kernel::clock::DayPart;
use crate::kernel::intent::{PowerAction, Site, SmallTalk};

pub const INTRODUCTION: &str = "I am your AI Chatbot. I'm here to assist you. How may I help you today?";
pub const SEARCHING: &str = "Searching Wikipedia...";
pub const EMPTY_LOOKUP: &str = "What would you like me to look up on Wikipedia?";
pub const FAREWELL: &str = "Goodbye! It was nice assisting you.";
pub const BUSY: &str = "Still working on the last command.";
pub const NO_COMMAND: &str = "No command detected. Try again.";
pub const LISTENING: &str = "Listening for your command...";

pub fn greeting(part: DayPart) -> &'static str {
    match part {
        DayPart::Morning => "Good Morning!",
        DayPart::Afternoon => "Good Afternoon!",
        DayPart::Evening => "Good Evening!",
    }
}

/// Spoken feedback for a failed listen. Silence stays silent.
pub fn listen_failure(error: ListenError) -> Option<&'static str> {
    match error {
        ListenError::NoSpeechDetected => None,
        ListenError::UnrecognizedSpeech => {
            Some("Sorry, I didn't quite catch that. Could you please repeat your command?")
        }
        ListenError::ServiceUnavailable => Some(
            "I'm having trouble connecting to the speech recognition service. Please check your internet connection.",
        ),
    }
}

pub fn lookup_result(summary: &str) -> String {
    format!("According to Wikipedia, {summary}")
}

pub fn lookup_failure(query: &str, error: &LookupError) -> String {
    match error {
        LookupError::NotFound(_) => {
            format!("Sorry, I could not find a Wikipedia page matching '{query}'.")
        }
        LookupError::LookupFailed(_) => {
            format!("An error occurred while searching Wikipedia for '{query}'.")
        }
    }
}

pub fn opening(site: Site) -> &'static str {
    match site {
        Site::YouTube => "Opening YouTube in your default browser.",
        Site::Google => "Opening Google Search in your default browser.",
        Site::StackOverflow => "Opening Stack Overflow, a great resource for developers.",
    }
}

pub fn unknown_site(target: &str) -> String {
    if target.is_empty() {
        "Which website would you like me to open?".to_string()
    } else {
        format!("I don't have a website registered for '{target}' yet.")
    }
}

pub fn current_time(formatted: &str) -> String {
    format!("The current time is {formatted}")
}

pub fn current_date(formatted: &str) -> String {
    format!("Today's date is {formatted}")
}

pub fn small_talk(topic: SmallTalk) -> &'static str {
    match topic {
        SmallTalk::HowAreYou => "I am doing great, thank you for asking! I am ready to serve. How are you?",
        SmallTalk::WhoAreYou => {
            "I am your voice-activated AI Chatbot, designed to help you automate tasks and find information."
        }
        SmallTalk::Thanks => "You're very welcome! Is there anything else I can do?",
    }
}

/// Only asked for actions that need confirmation.
pub fn confirmation_prompt(action: PowerAction) -> String {
    format!(
        "Are you sure you want to {}? Please confirm by saying 'yes' or 'no'.",
        action_phrase(action)
    )
}

/// Spoken right before the platform command runs.
pub fn power_confirmed(action: PowerAction) -> &'static str {
    match action {
        PowerAction::Lock => "Locking the computer now.",
        PowerAction::Shutdown => "Shutting down the system. Goodbye!",
        PowerAction::Restart => "Restarting the system. See you soon!",
    }
}

/// "Shutdown aborted." / "Restart aborted."
pub fn power_aborted(action: PowerAction) -> String {
    format!("{action:?} aborted.")
}

pub fn power_failed(action: PowerAction, error: &PowerError) -> String {
    let verb = action_phrase(action);
    match error {
        PowerError::PermissionDenied => {
            format!("I couldn't {verb}. I don't have permission to do that.")
        }
        PowerError::Unsupported => format!("I can't {verb} on this system."),
        PowerError::CommandFailed(_) => format!("Something went wrong while trying to {verb}."),
    }
}

fn action_phrase(action: PowerAction) -> &'static str {
    match action {
        PowerAction::Lock => "lock the computer",
        PowerAction::Shutdown => "shut down the computer",
        PowerAction::Restart => "restart the computer",
    }
}

pub fn unrecognized(utterance: &str) -> String {
    format!("I'm not sure how to handle the command: '{utterance}'. Could you try a different request?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_name_the_action() {
        assert_eq!(
            confirmation_prompt(PowerAction::Restart),
            "Are you sure you want to restart the computer? Please confirm by saying 'yes' or 'no'."
        );
        assert_eq!(power_aborted(PowerAction::Shutdown), "Shutdown aborted.");
    }

    #[test]
    fn empty_open_target_asks_for_site() {
        assert_eq!(unknown_site(""), "Which website would you like me to open?");
    }
}
