//! Console front end that reads typed lines instead of the microphone.

use anyhow::Context;
use voxcmd::frontend::{self, KeyboardInput};
use voxcmd::{setup, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup::init_tracing();

    let config = Config::load().context("failed to load configuration")?;
    let dispatcher = setup::dispatcher(&config, Box::new(KeyboardInput::new()))
        .context("failed to initialize speech output")?;

    println!("Type a command and press Enter. An empty line counts as silence.");
    frontend::run_console(dispatcher).await;
    Ok(())
}
