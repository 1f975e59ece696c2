use crate::config::ListenConfig;

/// Analysis frame length. The VAD accepts 10, 20 or 30 ms.
pub const FRAME_MS: usize = 30;

/// Floor for the calibrated energy threshold (RMS of f32 samples).
const MIN_ENERGY_THRESHOLD: f32 = 0.01;
/// Threshold = ambient RMS * this ratio.
const DYNAMIC_ENERGY_RATIO: f32 = 1.5;
/// Consecutive voiced frames needed to start a phrase (~90ms).
const MIN_SPEECH_FRAMES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmenterParams {
    pub sample_rate: u32,
    pub calibration_frames: usize,
    pub timeout_frames: usize,
    pub pause_frames: usize,
    pub phrase_limit_frames: usize,
}

impl SegmenterParams {
    pub fn from_config(config: &ListenConfig, sample_rate: u32) -> Self {
        let frames = |secs: f32| ((secs.max(0.0) * 1000.0) as usize).div_ceil(FRAME_MS);
        Self {
            sample_rate,
            calibration_frames: frames(config.calibration_secs),
            timeout_frames: frames(config.timeout_secs).max(1),
            pause_frames: frames(config.pause_threshold_secs).max(1),
            phrase_limit_frames: frames(config.phrase_limit_secs).max(1),
        }
    }

    pub fn frame_size(&self) -> usize {
        (self.sample_rate as usize * FRAME_MS) / 1000
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Calibrating,
    Waiting,
    Capturing,
    Done,
}

/// Result of feeding one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentStep {
    Calibrating,
    Waiting,
    Capturing,
    /// Complete phrase, pre-roll included.
    Phrase(Vec<f32>),
    /// No speech started before the timeout.
    Timeout,
    /// Already returned Phrase or Timeout.
    Finished,
}

/// Splits a frame stream into one phrase.
///
/// Calibrates an energy threshold on ambient noise first, then waits for
/// speech (VAD voiced AND above threshold), then captures until a run of
/// quiet frames as long as the pause threshold, or the phrase limit.
#[derive(Debug)]
pub struct PhraseSegmenter {
    params: SegmenterParams,
    phase: Phase,
    calibration_sum: f32,
    calibration_count: usize,
    energy_threshold: f32,
    frames_waited: usize,
    frames_captured: usize,
    consecutive_speech: usize,
    consecutive_silence: usize,
    pre_roll: Vec<Vec<f32>>,
    buffer: Vec<f32>,
}

impl PhraseSegmenter {
    pub fn new(params: SegmenterParams) -> Self {
        let phase = if params.calibration_frames == 0 {
            Phase::Waiting
        } else {
            Phase::Calibrating
        };
        Self {
            params,
            phase,
            calibration_sum: 0.0,
            calibration_count: 0,
            energy_threshold: MIN_ENERGY_THRESHOLD,
            frames_waited: 0,
            frames_captured: 0,
            consecutive_speech: 0,
            consecutive_silence: 0,
            pre_roll: Vec::with_capacity(MIN_SPEECH_FRAMES),
            buffer: Vec::new(),
        }
    }

    pub fn energy_threshold(&self) -> f32 {
        self.energy_threshold
    }

    pub fn push_frame(&mut self, frame: &[f32], vad_voiced: bool) -> SegmentStep {
        let energy = rms(frame);

        match self.phase {
            Phase::Done => SegmentStep::Finished,

            Phase::Calibrating => {
                self.calibration_sum += energy;
                self.calibration_count += 1;
                if self.calibration_count >= self.params.calibration_frames {
                    let ambient = self.calibration_sum / self.calibration_count as f32;
                    self.energy_threshold = (ambient * DYNAMIC_ENERGY_RATIO).max(MIN_ENERGY_THRESHOLD);
                    tracing::debug!(ambient, threshold = self.energy_threshold, "ambient noise calibrated");
                    self.phase = Phase::Waiting;
                }
                SegmentStep::Calibrating
            }

            Phase::Waiting => {
                let voiced = vad_voiced && energy > self.energy_threshold;
                if self.pre_roll.len() == MIN_SPEECH_FRAMES {
                    self.pre_roll.remove(0);
                }
                self.pre_roll.push(frame.to_vec());

                if voiced {
                    self.consecutive_speech += 1;
                } else {
                    self.consecutive_speech = 0;
                }

                if self.consecutive_speech >= MIN_SPEECH_FRAMES {
                    tracing::debug!("speech start");
                    self.phase = Phase::Capturing;
                    self.frames_captured = self.pre_roll.len();
                    self.buffer = self.pre_roll.drain(..).flatten().collect();
                    return SegmentStep::Capturing;
                }

                self.frames_waited += 1;
                if self.frames_waited >= self.params.timeout_frames {
                    self.phase = Phase::Done;
                    return SegmentStep::Timeout;
                }
                SegmentStep::Waiting
            }

            Phase::Capturing => {
                self.buffer.extend_from_slice(frame);
                self.frames_captured += 1;

                if vad_voiced && energy > self.energy_threshold {
                    self.consecutive_silence = 0;
                } else {
                    self.consecutive_silence += 1;
                }

                if self.consecutive_silence >= self.params.pause_frames
                    || self.frames_captured >= self.params.phrase_limit_frames
                {
                    tracing::debug!(frames = self.frames_captured, "speech end");
                    self.phase = Phase::Done;
                    return SegmentStep::Phrase(std::mem::take(&mut self.buffer));
                }
                SegmentStep::Capturing
            }
        }
    }
}

/// Root mean square of a frame.
pub fn rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    (frame.iter().map(|s| s * s).sum::<f32>() / frame.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SegmenterParams {
        SegmenterParams {
            sample_rate: 16000,
            calibration_frames: 5,
            timeout_frames: 20,
            pause_frames: 4,
            phrase_limit_frames: 100,
        }
    }

    fn frame(level: f32) -> Vec<f32> {
        vec![level; params().frame_size()]
    }

    #[test]
    fn frame_size_at_16k() {
        assert_eq!(params().frame_size(), 480);
    }

    #[test]
    fn calibration_raises_threshold_above_ambient() {
        let mut seg = PhraseSegmenter::new(params());
        for _ in 0..5 {
            assert_eq!(seg.push_frame(&frame(0.04), false), SegmentStep::Calibrating);
        }
        assert!((seg.energy_threshold() - 0.06).abs() < 1e-4);
    }

    #[test]
    fn silence_times_out() {
        let mut seg = PhraseSegmenter::new(params());
        let mut last = SegmentStep::Waiting;
        for _ in 0..25 {
            last = seg.push_frame(&frame(0.001), false);
            if last == SegmentStep::Timeout {
                break;
            }
        }
        assert_eq!(last, SegmentStep::Timeout);
        assert_eq!(seg.push_frame(&frame(0.5), true), SegmentStep::Finished);
    }

    #[test]
    fn speech_then_pause_yields_phrase() {
        let mut seg = PhraseSegmenter::new(params());
        for _ in 0..5 {
            seg.push_frame(&frame(0.001), false);
        }
        for _ in 0..2 {
            assert_eq!(seg.push_frame(&frame(0.3), true), SegmentStep::Waiting);
        }
        assert_eq!(seg.push_frame(&frame(0.3), true), SegmentStep::Capturing);
        for _ in 0..6 {
            seg.push_frame(&frame(0.3), true);
        }
        for _ in 0..3 {
            assert_eq!(seg.push_frame(&frame(0.001), false), SegmentStep::Capturing);
        }
        match seg.push_frame(&frame(0.001), false) {
            // 3 pre-roll + 6 speech + 4 pause frames
            SegmentStep::Phrase(samples) => assert_eq!(samples.len(), 13 * 480),
            other => panic!("expected phrase, got {other:?}"),
        }
    }

    #[test]
    fn loud_noise_without_voice_is_not_speech() {
        let mut seg = PhraseSegmenter::new(params());
        for _ in 0..5 {
            seg.push_frame(&frame(0.001), false);
        }
        for _ in 0..10 {
            assert_eq!(seg.push_frame(&frame(0.5), false), SegmentStep::Waiting);
        }
    }
}
