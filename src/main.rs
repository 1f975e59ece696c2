use anyhow::Context;
use voxcmd::{frontend, setup, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup::init_tracing();
    tracing::info!("voxcmd starting");

    let config = Config::load().context("failed to load configuration")?;
    let input = setup::microphone(&config).context("failed to open the microphone")?;
    let dispatcher = setup::dispatcher(&config, input).context("failed to initialize speech output")?;

    frontend::run_console(dispatcher).await;
    Ok(())
}
