use std::fmt;

/// One recognized phrase, lower-cased and trimmed.
/// Never empty: blank recognizer output is "no speech", not an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance(String);

impl Utterance {
    /// Normalize raw recognizer output. Returns None for blank text.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.0.contains(n))
    }

    /// Remove every occurrence of each phrase and trim what remains.
    pub fn strip_phrases(&self, phrases: &[&str]) -> String {
        let mut rest = self.0.clone();
        for phrase in phrases {
            rest = rest.replace(phrase, "");
        }
        rest.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
