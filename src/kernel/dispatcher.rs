use tracing::{debug, info, info_span, Instrument};

use crate::audio::SpeechInput;
use crate::kernel::clock::{day_part, Clock};
use crate::kernel::intent::{classify, Intent, IntentKind};
use crate::kernel::power::{ConfirmationPhase, DialogueInput, PowerDialogue};
use crate::kernel::session::{Flow, Session};
use crate::kernel::speech::phrases;
use crate::kernel::telemetry::{ListenOutcome, TelemetryEvent, TelemetryRecorder};
use crate::kernel::utterance::Utterance;
use crate::outputs::transcript::Speaker;
use crate::outputs::SpeechOutput;
use crate::services::{BrowserOpener, LookupService, PowerControl};

/// Everything the dispatcher talks to. Owned, injected once at startup.
pub struct Adapters {
    pub input: Box<dyn SpeechInput>,
    pub output: Box<dyn SpeechOutput>,
    pub lookup: Box<dyn LookupService>,
    pub browser: Box<dyn BrowserOpener>,
    pub power: Box<dyn PowerControl>,
    pub clock: Box<dyn Clock>,
}

/// Shared command core for every front end.
///
/// One cycle is listen → classify → act → speak. Only the power handler
/// touches the confirmation dialogue; only the exit handler ends the session.
pub struct Dispatcher {
    pub(crate) input: Box<dyn SpeechInput>,
    pub(crate) output: Box<dyn SpeechOutput>,
    pub(crate) lookup: Box<dyn LookupService>,
    pub(crate) browser: Box<dyn BrowserOpener>,
    pub(crate) power: Box<dyn PowerControl>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) lookup_sentences: usize,
    pub(crate) power_dialogue: PowerDialogue,
    pub session: Session,
    pub telemetry: TelemetryRecorder,
}

impl Dispatcher {
    pub fn new(adapters: Adapters) -> Self {
        Self {
            input: adapters.input,
            output: adapters.output,
            lookup: adapters.lookup,
            browser: adapters.browser,
            power: adapters.power,
            clock: adapters.clock,
            lookup_sentences: 2,
            power_dialogue: PowerDialogue::new(),
            session: Session::new(),
            telemetry: TelemetryRecorder::new(),
        }
    }

    pub fn with_lookup_sentences(mut self, sentences: usize) -> Self {
        self.lookup_sentences = sentences.max(1);
        self
    }

    pub fn power_dialogue(&self) -> &PowerDialogue {
        &self.power_dialogue
    }

    /// Speak and record a line. Blocks until the voice finishes.
    pub async fn say(&mut self, text: &str) {
        self.session.transcript.push(Speaker::Chatbot, text);
        self.output.say(text).await;
    }

    /// Time-of-day greeting plus introduction.
    pub async fn greet(&mut self) {
        let part = day_part(self.clock.now());
        self.say(phrases::greeting(part)).await;
        self.say(phrases::INTRODUCTION).await;
    }

    /// One listen call. Failures are spoken here (silence excepted)
    /// and come back as None.
    pub async fn listen(&mut self) -> Option<Utterance> {
        match self.input.listen().await {
            Ok(utterance) => {
                debug!(text = %utterance, "recognized");
                self.telemetry.record(TelemetryEvent::Listen { outcome: ListenOutcome::Recognized });
                self.session.transcript.push(Speaker::User, utterance.as_str());
                Some(utterance)
            }
            Err(error) => {
                debug!(%error, "listen produced no utterance");
                self.telemetry.record(TelemetryEvent::Listen { outcome: error.into() });
                if let Some(message) = phrases::listen_failure(error) {
                    self.say(message).await;
                }
                None
            }
        }
    }

    /// Route one utterance to exactly one handler.
    /// None means recognition failed: no rule is evaluated.
    pub async fn dispatch(&mut self, utterance: Option<Utterance>) -> Flow {
        let Some(utterance) = utterance else {
            return self.session.flow();
        };

        let intent = classify(&utterance);
        let kind = IntentKind::from(&intent);
        info!(?kind, "intent matched");
        self.telemetry.record(TelemetryEvent::IntentFired { kind });

        match intent {
            Intent::Lookup { query } => self.handle_lookup(&query).await,
            Intent::Open(site) => self.handle_open(site).await,
            Intent::OpenUnknown { target } => self.handle_open_unknown(&target).await,
            Intent::TellTime => self.handle_time().await,
            Intent::TellDate => self.handle_date().await,
            Intent::Power(action) => self.handle_power(action).await,
            Intent::SmallTalk(topic) => self.handle_small_talk(topic).await,
            Intent::Exit => self.handle_exit().await,
            Intent::Unrecognized => self.handle_unrecognized(&utterance).await,
        }

        self.session.flow()
    }

    /// listen + dispatch.
    pub async fn run_cycle(&mut self) -> Flow {
        if !self.session.is_running() {
            return Flow::Exit;
        }
        let utterance = self.listen().await;
        self.dispatch(utterance).await
    }

    /// Cycle until the exit intent fires.
    pub async fn run(&mut self) {
        let span = info_span!("session", id = %self.session.id);
        async {
            info!("dispatch loop started");
            while self.run_cycle().await == Flow::Continue {}
            info!("dispatch loop finished");
        }
        .instrument(span)
        .await;
    }

    /// Record and log the session summary.
    pub fn shutdown(&mut self) -> TelemetryEvent {
        let summary = self.telemetry.aggregate_session(self.session.id);
        info!(summary = ?summary, "session closed");
        self.telemetry.record(summary.clone());
        summary
    }

    pub(crate) fn advance_power_dialogue(&mut self, input: DialogueInput<'_>) -> ConfirmationPhase {
        let from = self.power_dialogue.phase();
        let to = self.power_dialogue.apply(input);
        if from != to {
            self.telemetry.record(TelemetryEvent::PowerTransition { from, to });
        }
        to
    }
}
