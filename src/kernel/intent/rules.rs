use super::types::*;
use crate::kernel::utterance::Utterance;

/// Phrases removed from a lookup utterance to leave the topic.
pub const LOOKUP_TRIGGERS: &[&str] = &["search wikipedia for", "wikipedia", "search for", "what is"];

/// One entry of the ordered rule table.
/// Matching is plain substring containment against any trigger. A trigger
/// ending in a space also matches its word at the very end of the utterance.
pub struct IntentRule {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    build: fn(&Utterance) -> Intent,
}

impl IntentRule {
    pub fn matches(&self, utterance: &Utterance) -> bool {
        let tail = utterance.as_str().trim_end_matches(|c: char| c.is_ascii_punctuation());
        utterance.contains_any(self.triggers)
            || self
                .triggers
                .iter()
                .filter_map(|t| t.strip_suffix(' '))
                .any(|word| tail.ends_with(word))
    }

    pub fn intent_for(&self, utterance: &Utterance) -> Intent {
        (self.build)(utterance)
    }
}

/// Rule table, evaluated top to bottom; the first match wins.
/// Specific open rules must stay above the generic one.
pub static RULES: &[IntentRule] = &[
    IntentRule {
        name: "lookup",
        triggers: &["wikipedia"],
        build: |u| Intent::Lookup { query: trim_punctuation(&u.strip_phrases(LOOKUP_TRIGGERS)) },
    },
    IntentRule {
        name: "open-youtube",
        triggers: &["open youtube"],
        build: |_| Intent::Open(Site::YouTube),
    },
    IntentRule {
        name: "open-google",
        triggers: &["open google"],
        build: |_| Intent::Open(Site::Google),
    },
    IntentRule {
        name: "open-stack-overflow",
        triggers: &["open stack overflow", "open stackoverflow"],
        build: |_| Intent::Open(Site::StackOverflow),
    },
    IntentRule {
        name: "open-generic",
        triggers: &["open "],
        build: |u| Intent::OpenUnknown { target: open_target(u) },
    },
    IntentRule {
        name: "time",
        triggers: &["the time"],
        build: |_| Intent::TellTime,
    },
    IntentRule {
        name: "date",
        triggers: &["the date"],
        build: |_| Intent::TellDate,
    },
    IntentRule {
        name: "lock",
        triggers: &["lock computer", "lock screen", "lock the computer"],
        build: |_| Intent::Power(PowerAction::Lock),
    },
    IntentRule {
        name: "shutdown",
        triggers: &["shutdown computer", "shut down computer", "shut down my pc"],
        build: |_| Intent::Power(PowerAction::Shutdown),
    },
    IntentRule {
        name: "restart",
        triggers: &["restart computer", "reboot my pc"],
        build: |_| Intent::Power(PowerAction::Restart),
    },
    IntentRule {
        name: "how-are-you",
        triggers: &["how are you"],
        build: |_| Intent::SmallTalk(SmallTalk::HowAreYou),
    },
    IntentRule {
        name: "who-are-you",
        triggers: &["who are you"],
        build: |_| Intent::SmallTalk(SmallTalk::WhoAreYou),
    },
    IntentRule {
        name: "thanks",
        triggers: &["thank you", "thanks"],
        build: |_| Intent::SmallTalk(SmallTalk::Thanks),
    },
    IntentRule {
        name: "exit",
        triggers: &["exit", "quit", "stop", "goodbye"],
        build: |_| Intent::Exit,
    },
];

/// First matching rule, if any.
pub fn matching_rule(utterance: &Utterance) -> Option<&'static IntentRule> {
    RULES.iter().find(|rule| rule.matches(utterance))
}

/// Classify an utterance. Falls through to `Intent::Unrecognized`.
pub fn classify(utterance: &Utterance) -> Intent {
    match matching_rule(utterance) {
        Some(rule) => rule.intent_for(utterance),
        None => Intent::Unrecognized,
    }
}

/// Empty when "open" is the last word.
fn open_target(utterance: &Utterance) -> String {
    let text = utterance.as_str();
    text.find("open ")
        .map(|idx| trim_punctuation(&text[idx + "open ".len()..]))
        .unwrap_or_default()
}

/// Recognizers punctuate; "wikipedia, alan turing." leaves ", alan turing.".
fn trim_punctuation(text: &str) -> String {
    text.trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(text: &str) -> Intent {
        classify(&Utterance::parse(text).unwrap())
    }

    #[test]
    fn lookup_strips_triggers() {
        assert_eq!(
            intent("wikipedia alan turing"),
            Intent::Lookup { query: "alan turing".to_string() }
        );
        assert_eq!(
            intent("search wikipedia for the eiffel tower"),
            Intent::Lookup { query: "the eiffel tower".to_string() }
        );
        assert_eq!(
            intent("what is rust wikipedia"),
            Intent::Lookup { query: "rust".to_string() }
        );
    }

    #[test]
    fn lookup_query_drops_recognizer_punctuation() {
        assert_eq!(
            intent("Wikipedia, Alan Turing."),
            Intent::Lookup { query: "alan turing".to_string() }
        );
        assert_eq!(
            intent("Search Wikipedia for: the Eiffel Tower?"),
            Intent::Lookup { query: "the eiffel tower".to_string() }
        );
        assert_eq!(intent("wikipedia."), Intent::Lookup { query: String::new() });
    }

    #[test]
    fn lookup_wins_mid_sentence() {
        // "the time" also appears, but lookup is declared first
        assert!(matches!(
            intent("tell me the time zone history from wikipedia"),
            Intent::Lookup { .. }
        ));
    }

    #[test]
    fn specific_open_beats_generic() {
        assert_eq!(intent("open stack overflow"), Intent::Open(Site::StackOverflow));
        assert_eq!(intent("please open stackoverflow now"), Intent::Open(Site::StackOverflow));
        assert_eq!(intent("open youtube"), Intent::Open(Site::YouTube));
        assert_eq!(
            intent("open reddit"),
            Intent::OpenUnknown { target: "reddit".to_string() }
        );
    }

    #[test]
    fn bare_open_has_empty_target() {
        assert_eq!(intent("open"), Intent::OpenUnknown { target: String::new() });
        assert_eq!(intent("please open"), Intent::OpenUnknown { target: String::new() });
        assert_eq!(intent("Open."), Intent::OpenUnknown { target: String::new() });
        assert_eq!(
            intent("open reddit."),
            Intent::OpenUnknown { target: "reddit".to_string() }
        );
    }

    #[test]
    fn stack_overflow_never_hits_generic_rule() {
        for phrase in ["open stack overflow", "can you open stack overflow for me", "open stackoverflow"] {
            let rule = matching_rule(&Utterance::parse(phrase).unwrap()).unwrap();
            assert_eq!(rule.name, "open-stack-overflow", "phrase: {phrase}");
        }
    }

    #[test]
    fn power_phrases() {
        assert_eq!(intent("lock screen"), Intent::Power(PowerAction::Lock));
        assert_eq!(intent("please shut down my pc"), Intent::Power(PowerAction::Shutdown));
        assert_eq!(intent("reboot my pc"), Intent::Power(PowerAction::Restart));
    }

    #[test]
    fn exit_tokens() {
        for token in ["exit", "quit", "stop", "goodbye"] {
            assert_eq!(intent(token), Intent::Exit, "token: {token}");
        }
    }

    #[test]
    fn unmatched_falls_through() {
        assert_eq!(intent("make me a sandwich"), Intent::Unrecognized);
    }
}
