use std::time::{Duration, Instant};

use async_trait::async_trait;
use ringbuf::traits::{Consumer, Observer, Split};
use ringbuf::HeapRb;
use tracing::{error, info, warn};
use webrtc_vad::{SampleRate, Vad, VadMode};

use super::capture::{samples_to_wav, AudioCapture};
use super::processing::{PhraseSegmenter, SegmentStep, SegmenterParams};
use super::SpeechInput;
use crate::config::ListenConfig;
use crate::error::ListenError;
use crate::kernel::utterance::Utterance;
use crate::services::stt::SpeechToText;
use crate::{Error, Result};

/// ~1.5s at 16k; room for scheduling jitter
const RING_CAPACITY: usize = 8192 * 3;
/// Extra wall-clock allowance before a silent stream counts as stalled
const STALL_GRACE: Duration = Duration::from_secs(2);

/// Microphone + speech-to-text.
pub struct MicrophoneListener {
    config: ListenConfig,
    stt: SpeechToText,
}

impl MicrophoneListener {
    /// Fails when there is no input device.
    pub fn new(config: ListenConfig, stt: SpeechToText) -> Result<Self> {
        let device = AudioCapture::probe()?;
        info!(%device, "microphone ready");
        Ok(Self { config, stt })
    }
}

#[async_trait]
impl SpeechInput for MicrophoneListener {
    async fn listen(&mut self) -> std::result::Result<Utterance, ListenError> {
        info!("Listening...");
        let config = self.config.clone();
        let captured = tokio::task::spawn_blocking(move || capture_phrase(&config)).await;

        let (samples, rate) = match captured {
            Ok(Ok(Some(phrase))) => phrase,
            Ok(Ok(None)) => return Err(ListenError::NoSpeechDetected),
            Ok(Err(e)) => {
                error!(error = %e, "audio capture failed");
                return Err(ListenError::ServiceUnavailable);
            }
            Err(e) => {
                error!(error = %e, "capture worker panicked");
                return Err(ListenError::ServiceUnavailable);
            }
        };

        let wav = samples_to_wav(&samples, rate).map_err(|e| {
            error!(error = %e, "wav encoding failed");
            ListenError::ServiceUnavailable
        })?;

        info!("Recognizing...");
        let text = self.stt.transcribe(wav).await?;
        Utterance::parse(&text).ok_or(ListenError::UnrecognizedSpeech)
    }
}

fn vad_rate(rate: u32) -> Result<SampleRate> {
    match rate {
        8000 => Ok(SampleRate::Rate8kHz),
        16000 => Ok(SampleRate::Rate16kHz),
        32000 => Ok(SampleRate::Rate32kHz),
        48000 => Ok(SampleRate::Rate48kHz),
        other => Err(Error::Audio(format!("unsupported VAD rate {other}"))),
    }
}

/// Blocking: open the microphone, calibrate, capture one phrase, close.
/// Ok(None) means the listen timeout passed in silence.
fn capture_phrase(config: &ListenConfig) -> Result<Option<(Vec<f32>, u32)>> {
    let rb = HeapRb::<f32>::new(RING_CAPACITY);
    let (producer, mut consumer) = rb.split();

    let capture = AudioCapture::open(producer)?;
    let rate = capture.sample_rate;

    let mut vad = Vad::new_with_rate_and_mode(vad_rate(rate)?, VadMode::Aggressive);
    let params = SegmenterParams::from_config(config, rate);
    let mut segmenter = PhraseSegmenter::new(params);

    let frame_size = params.frame_size();
    let mut frame_f32 = vec![0.0_f32; frame_size];
    let mut frame_i16 = vec![0_i16; frame_size];

    let budget = config.calibration()
        + config.timeout()
        + Duration::from_secs_f32(config.phrase_limit_secs.max(0.0))
        + STALL_GRACE;
    let started = Instant::now();

    loop {
        if started.elapsed() > budget {
            return Err(Error::Audio("microphone stopped delivering samples".to_string()));
        }

        if consumer.occupied_len() < frame_size {
            std::thread::sleep(Duration::from_millis(10));
            continue;
        }
        let _ = consumer.pop_slice(&mut frame_f32);

        for (dst, &sample) in frame_i16.iter_mut().zip(frame_f32.iter()) {
            *dst = (sample * f32::from(i16::MAX)) as i16;
        }

        let voiced = vad.is_voice_segment(&frame_i16).unwrap_or_else(|()| {
            warn!(frame_size, "VAD rejected frame");
            false
        });

        match segmenter.push_frame(&frame_f32, voiced) {
            SegmentStep::Phrase(samples) => return Ok(Some((samples, rate))),
            SegmentStep::Timeout | SegmentStep::Finished => return Ok(None),
            SegmentStep::Calibrating | SegmentStep::Waiting | SegmentStep::Capturing => {}
        }
    }
}
