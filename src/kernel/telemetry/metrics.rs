use std::collections::VecDeque;

use super::event::{ListenOutcome, LookupOutcome, TelemetryEvent};
use crate::kernel::intent::IntentKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    pub listen: ListenStats,
    pub intents_fired: u64,
    pub unrecognized: u64,
    pub lookups: LookupStats,
    pub power: PowerStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenStats {
    pub cycles: u64,
    pub recognized: u64,
    pub silent: u64,
    pub unrecognized: u64,
    pub service_unavailable: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupStats {
    pub found: u64,
    pub not_found: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerStats {
    pub transitions: u64,
    pub commands_succeeded: u64,
    pub commands_failed: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::Listen { outcome } => {
                snap.listen.cycles += 1;
                match outcome {
                    ListenOutcome::Recognized => snap.listen.recognized += 1,
                    ListenOutcome::NoSpeech => snap.listen.silent += 1,
                    ListenOutcome::Unrecognized => snap.listen.unrecognized += 1,
                    ListenOutcome::ServiceUnavailable => snap.listen.service_unavailable += 1,
                }
            }
            TelemetryEvent::IntentFired { kind } => {
                snap.intents_fired += 1;
                if *kind == IntentKind::Unrecognized {
                    snap.unrecognized += 1;
                }
            }
            TelemetryEvent::Lookup { outcome } => match outcome {
                LookupOutcome::Found => snap.lookups.found += 1,
                LookupOutcome::NotFound => snap.lookups.not_found += 1,
                LookupOutcome::Failed => snap.lookups.failed += 1,
            },
            TelemetryEvent::PowerTransition { .. } => snap.power.transitions += 1,
            TelemetryEvent::PowerCommand { succeeded, .. } => {
                if *succeeded {
                    snap.power.commands_succeeded += 1;
                } else {
                    snap.power.commands_failed += 1;
                }
            }
            TelemetryEvent::SessionSummary { .. } => {}
        }
    }

    snap
}
