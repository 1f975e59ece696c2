//! Button-triggered front end
//!
//! Each press runs exactly one listen → dispatch cycle on a background task
//! so the UI thread never waits on the microphone. A busy flag rejects
//! presses while a cycle is in flight; the microphone is never shared.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::kernel::dispatcher::Dispatcher;
use crate::kernel::session::Flow;
use crate::kernel::speech::phrases;
use crate::kernel::telemetry::TelemetryEvent;
use crate::outputs::transcript::{Speaker, TranscriptEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("a command is already being handled")]
    Busy,
}

/// Clears the busy flag when the cycle ends, panics included.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct GuiSession {
    dispatcher: Arc<Mutex<Dispatcher>>,
    busy: Arc<AtomicBool>,
}

impl GuiSession {
    /// Wrap a dispatcher. The receiver yields every transcript entry
    /// for display.
    pub fn new(mut dispatcher: Dispatcher) -> (Self, mpsc::UnboundedReceiver<TranscriptEntry>) {
        let feed = dispatcher.session.transcript.subscribe();
        let session = Self {
            dispatcher: Arc::new(Mutex::new(dispatcher)),
            busy: Arc::new(AtomicBool::new(false)),
        };
        (session, feed)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn greet(&self) {
        self.dispatcher.lock().await.greet().await;
    }

    /// Start one cycle in the background. Returns the cycle's outcome handle.
    pub fn trigger(&self) -> Result<JoinHandle<Flow>, TriggerError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("trigger rejected: cycle in flight");
            return Err(TriggerError::Busy);
        }

        let guard = BusyGuard(Arc::clone(&self.busy));
        let dispatcher = Arc::clone(&self.dispatcher);

        Ok(tokio::spawn(async move {
            let _guard = guard;
            let mut dispatcher = dispatcher.lock().await;
            if !dispatcher.session.is_running() {
                return Flow::Exit;
            }

            dispatcher.session.transcript.push(Speaker::System, phrases::LISTENING);
            let utterance = dispatcher.listen().await;
            if utterance.is_none() {
                dispatcher.session.transcript.push(Speaker::System, phrases::NO_COMMAND);
            }
            dispatcher.dispatch(utterance).await
        }))
    }

    /// Record the session summary. Waits for an in-flight cycle.
    pub async fn shutdown(&self) -> TelemetryEvent {
        self.dispatcher.lock().await.shutdown()
    }
}
