//! Audio output using cpal.
//!
//! Samples are converted to f32 and handed to the device callback through a
//! lock-free ring buffer.

use std::sync::Arc;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use parking_lot::Mutex;
use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::{HeapProd, HeapRb};

use crate::error::{AudioError, AudioResult};

use super::{DeviceConfig, DeviceSampleFormat, PlaybackDevice, PERIOD_FRAMES};

// Eight periods of headroom between writer and callback
const RING_BUFFER_PERIODS: usize = 8;

struct ActiveStream {
    _stream: Stream,
    producer: HeapProd<f32>,
    format: DeviceSampleFormat,
    sample_rate: u32,
}

/// The system's default output device.
pub struct CpalDevice {
    device: cpal::Device,
    active: Option<ActiveStream>,
    last_error: Arc<Mutex<Option<String>>>,
}

impl CpalDevice {
    /// Opens the default output device of the default host.
    pub fn open_default() -> AudioResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::missing_backend("no output device available"))?;

        Ok(Self {
            device,
            active: None,
            last_error: Arc::new(Mutex::new(None)),
        })
    }

    fn check_stream_error(&self) -> AudioResult<()> {
        match self.last_error.lock().take() {
            Some(message) => Err(AudioError::playback(message)),
            None => Ok(()),
        }
    }
}

impl PlaybackDevice for CpalDevice {
    fn configure(&mut self, config: &DeviceConfig) -> AudioResult<()> {
        let stream_config = StreamConfig {
            channels: config.channels,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let capacity = PERIOD_FRAMES * config.channels as usize * RING_BUFFER_PERIODS;
        let (producer, mut consumer) = HeapRb::<f32>::new(capacity).split();

        let last_error = Arc::clone(&self.last_error);
        let stream = self
            .device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for sample in data.iter_mut() {
                        *sample = consumer.try_pop().unwrap_or(0.0);
                    }
                },
                move |err| {
                    *last_error.lock() = Some(err.to_string());
                },
                None,
            )
            .map_err(|e| AudioError::playback(format!("failed to build output stream: {e}")))?;

        stream
            .play()
            .map_err(|e| AudioError::playback(format!("failed to start stream: {e}")))?;

        self.active = Some(ActiveStream {
            _stream: stream,
            producer,
            format: config.format,
            sample_rate: config.sample_rate,
        });
        Ok(())
    }

    fn write_period(&mut self, frames: &[u8]) -> AudioResult<()> {
        self.check_stream_error()?;
        let active = self
            .active
            .as_mut()
            .ok_or_else(|| AudioError::playback("device written before configure"))?;

        let width = active.format.width();
        for bytes in frames.chunks_exact(width) {
            let value = active.format.decode(bytes);
            // Block until the callback frees space
            while active.producer.try_push(value).is_err() {
                std::thread::sleep(Duration::from_millis(1));
            }
        }
        Ok(())
    }

    fn drain(&mut self) -> AudioResult<()> {
        if let Some(active) = self.active.as_ref() {
            while active.producer.occupied_len() > 0 {
                std::thread::sleep(Duration::from_millis(1));
            }
            // The last callback's buffer may still be playing
            let period = PERIOD_FRAMES as f64 / active.sample_rate as f64;
            std::thread::sleep(Duration::from_secs_f64(period * 2.0));
        }
        self.check_stream_error()
    }
}
