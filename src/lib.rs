//! voxcmd: voice-driven command dispatcher
//!
//! ```text
//! Front End ──► Speech Input ──► Dispatcher ──► Action Handler ──► service
//!     ▲                                              │
//!     └──────────── transcript ◄── Speech Output ◄───┘
//! ```
//!
//! The console binary and the desktop shell share one `Dispatcher`.

pub mod audio;
pub mod config;
pub mod error;
pub mod frontend;
pub mod kernel;
pub mod outputs;
pub mod services;
pub mod setup;

pub use config::Config;
pub use error::{Error, ListenError, LookupError, PowerError, Result};
pub use kernel::dispatcher::{Adapters, Dispatcher};
pub use kernel::session::Flow;
pub use kernel::utterance::Utterance;
