#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use voxcmd::audio::SpeechInput;
use voxcmd::kernel::clock::FixedClock;
use voxcmd::outputs::SpeechOutput;
use voxcmd::services::{BrowserOpener, LookupService, PowerControl};
use voxcmd::{Adapters, Dispatcher, ListenError, LookupError, PowerError, Utterance};

/// Monday 2025-10-20 17:05
pub fn monday_evening() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 20).unwrap().and_hms_opt(17, 5, 0).unwrap()
}

pub fn said(text: &str) -> Result<Utterance, ListenError> {
    Ok(Utterance::parse(text).unwrap())
}

/// Replays queued listen results. Runs dry into silence.
pub struct ScriptedInput {
    script: VecDeque<Result<Utterance, ListenError>>,
    delay: Option<Duration>,
}

impl ScriptedInput {
    pub fn new(script: Vec<Result<Utterance, ListenError>>) -> Self {
        Self { script: script.into(), delay: None }
    }

    pub fn slow(script: Vec<Result<Utterance, ListenError>>, delay: Duration) -> Self {
        Self { script: script.into(), delay: Some(delay) }
    }
}

#[async_trait]
impl SpeechInput for ScriptedInput {
    async fn listen(&mut self) -> Result<Utterance, ListenError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.script.pop_front().unwrap_or(Err(ListenError::NoSpeechDetected))
    }
}

#[derive(Clone, Default)]
pub struct RecordingVoice {
    pub lines: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl SpeechOutput for RecordingVoice {
    async fn say(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }
}

#[derive(Clone, Default)]
pub struct FakeLookup {
    pub queries: Arc<Mutex<Vec<(String, usize)>>>,
    pub failure: Option<LookupError>,
}

#[async_trait]
impl LookupService for FakeLookup {
    async fn summarize(&self, topic: &str, max_sentences: usize) -> Result<String, LookupError> {
        self.queries.lock().unwrap().push((topic.to_string(), max_sentences));
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(format!("{topic} is a topic.")),
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingBrowser {
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl BrowserOpener for RecordingBrowser {
    fn open(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

#[derive(Clone, Default)]
pub struct FakePower {
    pub calls: Arc<Mutex<Vec<&'static str>>>,
    pub failure: Option<PowerError>,
}

impl FakePower {
    fn call(&self, name: &'static str) -> Result<(), PowerError> {
        self.calls.lock().unwrap().push(name);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PowerControl for FakePower {
    async fn lock(&self) -> Result<(), PowerError> {
        self.call("lock")
    }

    async fn shutdown(&self) -> Result<(), PowerError> {
        self.call("shutdown")
    }

    async fn restart(&self) -> Result<(), PowerError> {
        self.call("restart")
    }
}

/// Handles onto every fake wired into a test dispatcher.
#[derive(Clone, Default)]
pub struct Rig {
    pub voice: RecordingVoice,
    pub lookup: FakeLookup,
    pub browser: RecordingBrowser,
    pub power: FakePower,
}

impl Rig {
    pub fn dispatcher(&self, input: ScriptedInput) -> Dispatcher {
        Dispatcher::new(Adapters {
            input: Box::new(input),
            output: Box::new(self.voice.clone()),
            lookup: Box::new(self.lookup.clone()),
            browser: Box::new(self.browser.clone()),
            power: Box::new(self.power.clone()),
            clock: Box::new(FixedClock(monday_evening())),
        })
    }

    pub fn spoken(&self) -> Vec<String> {
        self.voice.lines.lock().unwrap().clone()
    }

    pub fn last_spoken(&self) -> String {
        self.spoken().last().cloned().unwrap_or_default()
    }
}
