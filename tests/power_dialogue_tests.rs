mod common;

use common::{said, Rig, ScriptedInput};
use voxcmd::kernel::power::ConfirmationPhase;
use voxcmd::kernel::telemetry::TelemetryEvent;
use voxcmd::{Flow, ListenError, PowerError};

#[tokio::test]
async fn test_shutdown_runs_after_yes() {
    let rig = Rig::default();
    let mut dispatcher = rig.dispatcher(ScriptedInput::new(vec![
        said("shutdown computer"),
        said("yes"),
    ]));

    let flow = dispatcher.run_cycle().await;

    // 1. Command ran exactly once
    assert_eq!(flow, Flow::Continue);
    assert_eq!(*rig.power.calls.lock().unwrap(), vec!["shutdown"]);

    // 2. Prompt then confirmation
    let spoken = rig.spoken();
    assert!(spoken[0].starts_with("Are you sure you want to shut down the computer?"));
    assert_eq!(spoken[1], "Shutting down the system. Goodbye!");

    // 3. Dialogue is back to Idle
    assert_eq!(dispatcher.power_dialogue().phase(), ConfirmationPhase::Idle);
}

#[tokio::test]
async fn test_anything_but_yes_aborts() {
    let replies = vec![
        said("no"),
        said("not now"),
        Err(ListenError::NoSpeechDetected),
        Err(ListenError::UnrecognizedSpeech),
    ];

    for reply in replies {
        let rig = Rig::default();
        let mut dispatcher = rig.dispatcher(ScriptedInput::new(vec![said("restart computer"), reply]));

        dispatcher.run_cycle().await;

        assert!(rig.power.calls.lock().unwrap().is_empty());
        assert_eq!(rig.last_spoken(), "Restart aborted.");
        assert_eq!(dispatcher.power_dialogue().phase(), ConfirmationPhase::Idle);
    }
}

#[tokio::test]
async fn test_confirmation_consumes_one_listen() {
    let rig = Rig::default();
    let mut dispatcher = rig.dispatcher(ScriptedInput::new(vec![
        said("shut down my pc"),
        said("no"),
        said("yes"),
    ]));

    dispatcher.run_cycle().await;
    // The stray "yes" is a fresh command, not a late confirmation
    dispatcher.run_cycle().await;

    assert!(rig.power.calls.lock().unwrap().is_empty());
    assert_eq!(
        rig.last_spoken(),
        "I'm not sure how to handle the command: 'yes'. Could you try a different request?"
    );
}

#[tokio::test]
async fn test_lock_needs_no_confirmation() {
    let rig = Rig::default();
    let mut dispatcher = rig.dispatcher(ScriptedInput::new(vec![said("lock screen"), said("yes")]));

    dispatcher.run_cycle().await;

    assert_eq!(*rig.power.calls.lock().unwrap(), vec!["lock"]);
    assert_eq!(rig.spoken(), vec!["Locking the computer now."]);

    // Only the first scripted result was consumed
    assert_eq!(dispatcher.telemetry.snapshot().listen.cycles, 1);
}

#[tokio::test]
async fn test_power_failure_is_spoken() {
    let mut rig = Rig::default();
    rig.power.failure = Some(PowerError::PermissionDenied);
    let mut dispatcher = rig.dispatcher(ScriptedInput::new(vec![said("reboot my pc"), said("yes")]));

    assert_eq!(dispatcher.run_cycle().await, Flow::Continue);

    assert_eq!(*rig.power.calls.lock().unwrap(), vec!["restart"]);
    assert_eq!(
        rig.last_spoken(),
        "I couldn't restart the computer. I don't have permission to do that."
    );
    assert_eq!(dispatcher.telemetry.snapshot().power.commands_failed, 1);
}

#[tokio::test]
async fn test_transitions_are_recorded() {
    let rig = Rig::default();
    let mut dispatcher = rig.dispatcher(ScriptedInput::new(vec![said("shutdown computer"), said("no")]));

    dispatcher.run_cycle().await;

    let transitions: Vec<_> = dispatcher
        .telemetry
        .events()
        .filter_map(|e| match e {
            TelemetryEvent::PowerTransition { to, .. } => Some(*to),
            _ => None,
        })
        .collect();

    use voxcmd::kernel::intent::PowerAction::Shutdown;
    assert_eq!(
        transitions,
        vec![
            ConfirmationPhase::AwaitingConfirmation(Shutdown),
            ConfirmationPhase::Aborted(Shutdown),
            ConfirmationPhase::Idle,
        ]
    );
}
