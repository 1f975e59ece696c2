//! Dispatch telemetry
//!
//! # PRIVACY INVARIANT
//! Telemetry events must **NEVER** contain user content (utterances, queries,
//! summaries). Only enums, counts and the session id are allowed.
//!
//! Telemetry is read-only with respect to dispatch: nothing in the dispatcher
//! reads it back to make a decision.

pub mod event;
pub mod metrics;
pub mod recorder;

pub use event::{ListenOutcome, LookupOutcome, TelemetryEvent};
pub use metrics::TelemetrySnapshot;
pub use recorder::TelemetryRecorder;
