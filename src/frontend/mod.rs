//! Thin front ends over the shared dispatcher.

pub mod console;
pub mod gui;

pub use console::{run_console, KeyboardInput};
pub use gui::{GuiSession, TriggerError};
