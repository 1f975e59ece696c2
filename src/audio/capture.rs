use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::traits::Producer;
use tracing::{error, info};

use crate::{Error, Result};

/// Rates the voice activity detector accepts, most preferred first.
pub const VAD_RATES: [u32; 4] = [16000, 32000, 48000, 8000];

/// Live microphone stream feeding mono f32 samples into a ring buffer.
/// Capture stops when this is dropped.
pub struct AudioCapture {
    _stream: cpal::Stream,
    pub sample_rate: u32,
}

impl AudioCapture {
    /// Name of the default input device. Used at startup to fail fast.
    pub fn probe() -> Result<String> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| Error::Audio("no input device available".to_string()))?;
        Ok(device.name().unwrap_or_else(|_| "unknown".to_string()))
    }

    pub fn open<P>(mut producer: P) -> Result<Self>
    where
        P: Producer<Item = f32> + Send + 'static,
    {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| Error::Audio("no input device available".to_string()))?;

        let mut selected = None;
        for &rate in &VAD_RATES {
            let configs = device.supported_input_configs().map_err(audio_err)?;
            let found = configs
                .filter(|range| range.min_sample_rate().0 <= rate && range.max_sample_rate().0 >= rate)
                .min_by_key(|range| range.channels());
            if let Some(range) = found {
                selected = Some(range.with_sample_rate(cpal::SampleRate(rate)));
                break;
            }
        }

        let config = match selected {
            Some(config) => config,
            None => {
                let default = device.default_input_config().map_err(audio_err)?;
                if !VAD_RATES.contains(&default.sample_rate().0) {
                    return Err(Error::Audio(format!(
                        "unsupported sample rate {}; need 8k, 16k, 32k or 48k",
                        default.sample_rate().0
                    )));
                }
                default
            }
        };

        let sample_rate = config.sample_rate().0;
        let channels = usize::from(config.channels().max(1));
        info!(
            device = device.name().unwrap_or_default(),
            sample_rate,
            channels,
            "audio capture opened"
        );

        let err_fn = |err| error!(error = %err, "audio stream error");

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device.build_input_stream(
                &config.into(),
                move |data: &[f32], _: &_| write_input_data(data, channels, &mut producer),
                err_fn,
                None,
            ),
            cpal::SampleFormat::I16 => device.build_input_stream(
                &config.into(),
                move |data: &[i16], _: &_| write_input_data_i16(data, channels, &mut producer),
                err_fn,
                None,
            ),
            other => return Err(Error::Audio(format!("unsupported sample format {other:?}"))),
        }
        .map_err(audio_err)?;

        stream.play().map_err(audio_err)?;

        Ok(Self {
            _stream: stream,
            sample_rate,
        })
    }
}

fn audio_err(e: impl std::fmt::Display) -> Error {
    Error::Audio(e.to_string())
}

// Full buffer drops input (lossy)
fn write_input_data<P>(input: &[f32], channels: usize, producer: &mut P)
where
    P: Producer<Item = f32>,
{
    if channels == 1 {
        producer.push_slice(input);
        return;
    }
    for frame in input.chunks(channels) {
        let mono = frame.iter().sum::<f32>() / frame.len() as f32;
        let _ = producer.try_push(mono);
    }
}

fn write_input_data_i16<P>(input: &[i16], channels: usize, producer: &mut P)
where
    P: Producer<Item = f32>,
{
    for frame in input.chunks(channels) {
        let mono = frame.iter().map(|&s| f32::from(s) / f32::from(i16::MAX)).sum::<f32>() / frame.len() as f32;
        let _ = producer.try_push(mono);
    }
}

/// Encode mono f32 samples as 16-bit PCM WAV for the STT upload
pub fn samples_to_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).map_err(audio_err)?;
        for &sample in samples {
            #[allow(clippy::cast_possible_truncation)]
            let sample_i16 = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
            writer.write_sample(sample_i16).map_err(audio_err)?;
        }
        writer.finalize().map_err(audio_err)?;
    }

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header_matches_samples() {
        let samples = vec![0.0_f32; 1600];
        let wav = samples_to_wav(&samples, 16000).unwrap();
        let reader = hound::WavReader::new(std::io::Cursor::new(wav)).unwrap();
        assert_eq!(reader.spec().sample_rate, 16000);
        assert_eq!(reader.len(), 1600);
    }
}
