use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Chatbot,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

/// Append-only record of the current session.
/// Entries are never edited or removed.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    subscribers: Vec<mpsc::UnboundedSender<TranscriptEntry>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        let entry = TranscriptEntry { speaker, text: text.into() };
        // Drop subscribers whose receiver is gone
        self.subscribers.retain(|tx| tx.send(entry.clone()).is_ok());
        self.entries.push(entry);
    }

    /// Live feed of entries appended from now on.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<TranscriptEntry> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Text of everything the chatbot said, in order.
    pub fn spoken(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.speaker == Speaker::Chatbot)
            .map(|e| e.text.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_new_entries_in_order() {
        let mut transcript = Transcript::new();
        transcript.push(Speaker::System, "before");
        let mut rx = transcript.subscribe();
        transcript.push(Speaker::User, "the time");
        transcript.push(Speaker::Chatbot, "The current time is 05:05 PM");

        assert_eq!(rx.try_recv().unwrap().text, "the time");
        assert_eq!(rx.try_recv().unwrap().speaker, Speaker::Chatbot);
        assert!(rx.try_recv().is_err());
        assert_eq!(transcript.entries().len(), 3);
        assert_eq!(transcript.spoken(), vec!["The current time is 05:05 PM"]);
    }
}
