use tracing::{debug, warn};

use super::BrowserOpener;

/// Opens URLs with the platform's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) {
        // Launcher runs detached; the handler does not wait for the browser
        match open::that_detached(url) {
            Ok(()) => debug!(url, "browser launched"),
            Err(e) => warn!(url, error = %e, "failed to launch browser"),
        }
    }
}
