mod common;

use std::time::Duration;

use common::{said, Rig, ScriptedInput};
use voxcmd::frontend::{GuiSession, TriggerError};
use voxcmd::outputs::Speaker;
use voxcmd::{Flow, ListenError};

#[tokio::test]
async fn test_overlapping_trigger_is_rejected() {
    let rig = Rig::default();
    let input = ScriptedInput::slow(vec![said("how are you")], Duration::from_millis(200));
    let (gui, _feed) = GuiSession::new(rig.dispatcher(input));

    // 1. First press starts a cycle
    let cycle = gui.trigger().expect("first trigger should start");
    assert!(gui.is_busy());

    // 2. Second press while listening is refused
    assert_eq!(gui.trigger().unwrap_err(), TriggerError::Busy);

    // 3. After the cycle the button works again
    assert_eq!(cycle.await.unwrap(), Flow::Continue);
    assert!(!gui.is_busy());
    assert_eq!(rig.spoken().len(), 1);

    let again = gui.trigger().expect("trigger after completion");
    again.await.unwrap();
}

#[tokio::test]
async fn test_feed_shows_listening_and_no_command() {
    let rig = Rig::default();
    let input = ScriptedInput::new(vec![Err(ListenError::NoSpeechDetected)]);
    let (gui, mut feed) = GuiSession::new(rig.dispatcher(input));

    gui.trigger().unwrap().await.unwrap();

    let first = feed.recv().await.unwrap();
    let second = feed.recv().await.unwrap();
    assert_eq!((first.speaker, first.text.as_str()), (Speaker::System, "Listening for your command..."));
    assert_eq!((second.speaker, second.text.as_str()), (Speaker::System, "No command detected. Try again."));
    assert!(rig.spoken().is_empty());
}

#[tokio::test]
async fn test_exit_through_button() {
    let rig = Rig::default();
    let input = ScriptedInput::new(vec![said("goodbye")]);
    let (gui, _feed) = GuiSession::new(rig.dispatcher(input));

    assert_eq!(gui.trigger().unwrap().await.unwrap(), Flow::Exit);
    // The session is over; later presses report exit without listening
    assert_eq!(gui.trigger().unwrap().await.unwrap(), Flow::Exit);
    assert_eq!(rig.spoken(), vec!["Goodbye! It was nice assisting you."]);
}

#[tokio::test]
async fn test_greeting_reaches_feed() {
    let rig = Rig::default();
    let (gui, mut feed) = GuiSession::new(rig.dispatcher(ScriptedInput::new(vec![])));

    gui.greet().await;

    let entry = feed.recv().await.unwrap();
    assert_eq!(entry.speaker, Speaker::Chatbot);
    assert_eq!(entry.text, "Good Afternoon!");
}
