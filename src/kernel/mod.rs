pub mod clock;
pub mod dispatcher;
mod handlers;
pub mod intent;
pub mod power;
pub mod session;
pub mod speech;
pub mod telemetry;
pub mod utterance;
