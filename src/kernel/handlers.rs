//! Action handlers. Each converts its own failures into speech.

use tracing::{info, warn};

use crate::kernel::clock::{format_date, format_time};
use crate::kernel::dispatcher::Dispatcher;
use crate::kernel::intent::{PowerAction, Site, SmallTalk};
use crate::kernel::power::{ConfirmationPhase, DialogueInput};
use crate::kernel::speech::phrases;
use crate::kernel::telemetry::{LookupOutcome, TelemetryEvent};
use crate::kernel::utterance::Utterance;

impl Dispatcher {
    pub(crate) async fn handle_lookup(&mut self, query: &str) {
        if query.is_empty() {
            self.say(phrases::EMPTY_LOOKUP).await;
            return;
        }

        self.say(phrases::SEARCHING).await;
        match self.lookup.summarize(query, self.lookup_sentences).await {
            Ok(summary) => {
                self.telemetry.record(TelemetryEvent::Lookup { outcome: LookupOutcome::Found });
                self.say(&phrases::lookup_result(&summary)).await;
            }
            Err(error) => {
                warn!(%error, "lookup failed");
                self.telemetry.record(TelemetryEvent::Lookup { outcome: (&error).into() });
                self.say(&phrases::lookup_failure(query, &error)).await;
            }
        }
    }

    pub(crate) async fn handle_open(&mut self, site: Site) {
        self.say(phrases::opening(site)).await;
        self.browser.open(site.url());
    }

    pub(crate) async fn handle_open_unknown(&mut self, target: &str) {
        self.say(&phrases::unknown_site(target)).await;
    }

    pub(crate) async fn handle_time(&mut self) {
        let now = format_time(self.clock.now());
        self.say(&phrases::current_time(&now)).await;
    }

    pub(crate) async fn handle_date(&mut self) {
        let today = format_date(self.clock.now());
        self.say(&phrases::current_date(&today)).await;
    }

    /// Lock runs at once. Shutdown and restart ask first and consume
    /// exactly one more listen result; anything but "yes" aborts.
    pub(crate) async fn handle_power(&mut self, action: PowerAction) {
        let mut phase = self.advance_power_dialogue(DialogueInput::Request(action));

        if let ConfirmationPhase::AwaitingConfirmation(pending) = phase {
            self.say(&phrases::confirmation_prompt(pending)).await;
            let reply = self.listen().await;
            phase = self.advance_power_dialogue(DialogueInput::Reply(reply.as_ref()));
        }

        match phase {
            ConfirmationPhase::Confirmed(confirmed) => {
                self.say(phrases::power_confirmed(confirmed)).await;
                let result = match confirmed {
                    PowerAction::Lock => self.power.lock().await,
                    PowerAction::Shutdown => self.power.shutdown().await,
                    PowerAction::Restart => self.power.restart().await,
                };
                self.telemetry.record(TelemetryEvent::PowerCommand {
                    action: confirmed,
                    succeeded: result.is_ok(),
                });
                if let Err(error) = result {
                    warn!(?confirmed, %error, "power command failed");
                    self.say(&phrases::power_failed(confirmed, &error)).await;
                }
            }
            ConfirmationPhase::Aborted(aborted) => {
                info!(?aborted, "power action aborted");
                self.say(&phrases::power_aborted(aborted)).await;
            }
            ConfirmationPhase::Idle | ConfirmationPhase::AwaitingConfirmation(_) => {}
        }

        self.advance_power_dialogue(DialogueInput::Settled);
    }

    pub(crate) async fn handle_small_talk(&mut self, topic: SmallTalk) {
        self.say(phrases::small_talk(topic)).await;
    }

    pub(crate) async fn handle_exit(&mut self) {
        self.say(phrases::FAREWELL).await;
        self.session.end();
    }

    pub(crate) async fn handle_unrecognized(&mut self, utterance: &Utterance) {
        self.say(&phrases::unrecognized(utterance.as_str())).await;
    }
}
