#![cfg_attr(
  all(not(debug_assertions), target_os = "windows"),
  windows_subsystem = "windows"
)]

use anyhow::Context;
use tauri::{AppHandle, Emitter, Manager, State};
use voxcmd::frontend::{GuiSession, TriggerError};
use voxcmd::kernel::speech::phrases;
use voxcmd::outputs::{Speaker, TranscriptEntry};
use voxcmd::{setup, Config, Flow};

const TRANSCRIPT_EVENT: &str = "transcript";

/// Speak button: one listen → dispatch cycle in the background.
#[tauri::command]
async fn speak(app: AppHandle, gui: State<'_, GuiSession>) -> Result<(), String> {
    let cycle = match gui.trigger() {
        Ok(cycle) => cycle,
        Err(TriggerError::Busy) => {
            let busy = TranscriptEntry { speaker: Speaker::System, text: phrases::BUSY.to_string() };
            app.emit(TRANSCRIPT_EVENT, busy).map_err(|e| e.to_string())?;
            return Ok(());
        }
    };

    let flow = cycle.await.map_err(|e| e.to_string())?;
    if flow == Flow::Exit {
        gui.shutdown().await;
        app.exit(0);
    }
    Ok(())
}

fn build_session() -> anyhow::Result<(GuiSession, tokio::sync::mpsc::UnboundedReceiver<TranscriptEntry>)> {
    let config = Config::load().context("failed to load configuration")?;
    let input = setup::microphone(&config).context("failed to open the microphone")?;
    let dispatcher = setup::dispatcher(&config, input).context("failed to initialize speech output")?;
    Ok(GuiSession::new(dispatcher))
}

fn main() -> anyhow::Result<()> {
    setup::init_tracing();
    let (gui, mut feed) = build_session()?;

    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![speak])
        .setup(move |app| {
            let handle = app.handle().clone();

            // Core -> UI: forward every transcript line
            let forward = handle.clone();
            tauri::async_runtime::spawn(async move {
                while let Some(entry) = feed.recv().await {
                    if let Err(e) = forward.emit(TRANSCRIPT_EVENT, &entry) {
                        tracing::warn!(error = %e, "failed to emit transcript entry");
                    }
                }
            });

            let greeter = gui.clone();
            tauri::async_runtime::spawn(async move { greeter.greet().await });

            handle.manage(gui);
            Ok(())
        })
        .run(tauri::generate_context!())
        .context("error while running tauri application")
}
