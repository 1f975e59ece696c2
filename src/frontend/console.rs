use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use crate::audio::SpeechInput;
use crate::error::ListenError;
use crate::kernel::dispatcher::Dispatcher;
use crate::kernel::utterance::Utterance;
use crate::outputs::transcript::{Speaker, TranscriptEntry};

/// Blocking console loop: greet, cycle until exit, print the transcript as it grows.
pub async fn run_console(mut dispatcher: Dispatcher) {
    let mut feed = dispatcher.session.transcript.subscribe();
    let printer = tokio::spawn(async move {
        while let Some(entry) = feed.recv().await {
            println!("{}", render(&entry));
        }
    });

    dispatcher.greet().await;
    dispatcher.run().await;
    dispatcher.shutdown();

    // Dropping the dispatcher closes the feed
    drop(dispatcher);
    let _ = printer.await;
}

fn render(entry: &TranscriptEntry) -> String {
    match entry.speaker {
        Speaker::User => format!("User said: {}", entry.text),
        Speaker::Chatbot => format!("Chatbot: {}", entry.text),
        Speaker::System => format!("System: {}", entry.text),
    }
}

/// Typed lines stand in for speech. A blank line is silence; end of input
/// is treated as "exit".
pub struct KeyboardInput<R = BufReader<Stdin>> {
    lines: Lines<R>,
}

impl KeyboardInput {
    /// Read from the process's stdin
    pub fn new() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> KeyboardInput<R> {
    pub fn from_reader(reader: R) -> Self {
        Self { lines: reader.lines() }
    }
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R> SpeechInput for KeyboardInput<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn listen(&mut self) -> Result<Utterance, ListenError> {
        match self.lines.next_line().await {
            Ok(Some(line)) => Utterance::parse(&line).ok_or(ListenError::NoSpeechDetected),
            Ok(None) => {
                info!("input closed");
                Utterance::parse("exit").ok_or(ListenError::NoSpeechDetected)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read input");
                Err(ListenError::ServiceUnavailable)
            }
        }
    }
}
