//! Live playback.
//!
//! Audio is pushed to a [`PlaybackDevice`] in fixed periods of
//! [`PERIOD_FRAMES`] frames. The real device backend is compiled in with the
//! `playback` feature; without it [`open_default_device`] reports
//! [`AudioError::MissingAudioBackend`] and callers fall back to file output.

#[cfg(feature = "playback")]
mod cpal_device;

#[cfg(feature = "playback")]
pub use cpal_device::CpalDevice;

use crate::error::{AudioError, AudioResult};
use crate::sink::ToneSink;
use crate::tone::ToneSpec;
use crate::wav::{parse_wav, samples_to_pcm16};

/// Frames handed to the device per write.
pub const PERIOD_FRAMES: usize = 320;

/// Sample encodings a device can be configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceSampleFormat {
    /// Unsigned 8-bit.
    U8,
    /// Signed 16-bit little-endian.
    S16Le,
    /// Signed 24-bit little-endian, packed in 3 bytes.
    S24Le,
    /// Signed 32-bit little-endian.
    S32Le,
}

impl DeviceSampleFormat {
    /// Picks the device format for a WAV sample width in bytes.
    ///
    /// 8-bit WAV data is unsigned; wider data is signed little-endian.
    pub fn from_sample_width(width: u16) -> AudioResult<Self> {
        match width {
            1 => Ok(Self::U8),
            2 => Ok(Self::S16Le),
            3 => Ok(Self::S24Le),
            4 => Ok(Self::S32Le),
            _ => Err(AudioError::UnsupportedSampleFormat { width }),
        }
    }

    /// Bytes per sample.
    pub fn width(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::S16Le => 2,
            Self::S24Le => 3,
            Self::S32Le => 4,
        }
    }

    /// Decodes one sample to the range [-1.0, 1.0].
    ///
    /// `bytes` must be exactly [`width`](Self::width) long.
    pub fn decode(self, bytes: &[u8]) -> f32 {
        match self {
            Self::U8 => (bytes[0] as f32 - 128.0) / 128.0,
            Self::S16Le => i16::from_le_bytes([bytes[0], bytes[1]]) as f32 / 32768.0,
            Self::S24Le => {
                // Sign-extend through the top byte of an i32
                let v = i32::from_le_bytes([0, bytes[0], bytes[1], bytes[2]]) >> 8;
                v as f32 / 8_388_608.0
            }
            Self::S32Le => {
                i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f32
                    / 2_147_483_648.0
            }
        }
    }
}

/// Stream parameters for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Interleaved channel count.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Sample encoding of the bytes passed to `write_period`.
    pub format: DeviceSampleFormat,
}

impl DeviceConfig {
    /// Bytes per frame.
    pub fn frame_bytes(&self) -> usize {
        self.channels as usize * self.format.width()
    }
}

/// An output device accepting raw PCM periods.
pub trait PlaybackDevice {
    /// Prepares the device for a stream. Called once before any writes.
    fn configure(&mut self, config: &DeviceConfig) -> AudioResult<()>;

    /// Plays one period of interleaved frames. Blocks until accepted.
    fn write_period(&mut self, frames: &[u8]) -> AudioResult<()>;

    /// Blocks until everything written has been played.
    fn drain(&mut self) -> AudioResult<()> {
        Ok(())
    }
}

impl<D: PlaybackDevice + ?Sized> PlaybackDevice for Box<D> {
    fn configure(&mut self, config: &DeviceConfig) -> AudioResult<()> {
        (**self).configure(config)
    }

    fn write_period(&mut self, frames: &[u8]) -> AudioResult<()> {
        (**self).write_period(frames)
    }

    fn drain(&mut self) -> AudioResult<()> {
        (**self).drain()
    }
}

/// Writes `pcm` to `device` in periods of [`PERIOD_FRAMES`] frames.
///
/// Returns the number of periods written. A trailing partial frame is
/// dropped.
pub fn play_pcm<D: PlaybackDevice + ?Sized>(
    device: &mut D,
    config: &DeviceConfig,
    pcm: &[u8],
) -> AudioResult<usize> {
    let frame_bytes = config.frame_bytes();
    if frame_bytes == 0 {
        return Err(AudioError::invalid_param("channels", "must be at least 1"));
    }
    device.configure(config)?;

    let whole = pcm.len() - pcm.len() % frame_bytes;
    let mut periods = 0;
    for period in pcm[..whole].chunks(PERIOD_FRAMES * frame_bytes) {
        device.write_period(period)?;
        periods += 1;
    }

    device.drain()?;
    Ok(periods)
}

/// Plays a complete WAV file.
///
/// The device format is chosen from the file's sample width; widths other
/// than 1 to 4 bytes fail with [`AudioError::UnsupportedSampleFormat`]
/// before the device is touched.
pub fn play_wav<D: PlaybackDevice + ?Sized>(device: &mut D, wav: &[u8]) -> AudioResult<usize> {
    let data = parse_wav(wav)?;
    let config = DeviceConfig {
        channels: data.format.channels,
        sample_rate: data.format.sample_rate,
        format: DeviceSampleFormat::from_sample_width(data.format.sample_width())?,
    };
    play_pcm(device, &config, data.pcm)
}

/// A [`ToneSink`] that plays tones as they are synthesized.
///
/// Rendered samples are buffered until a full period is available.
/// Call [`DeviceSink::finish`] to flush the tail and drain the device.
pub struct DeviceSink<'a, D: PlaybackDevice + ?Sized> {
    device: &'a mut D,
    pending: Vec<i16>,
    configured: bool,
}

impl<'a, D: PlaybackDevice + ?Sized> DeviceSink<'a, D> {
    /// Wraps `device`. It is configured for mono S16LE on the first tone.
    pub fn new(device: &'a mut D) -> Self {
        Self {
            device,
            pending: Vec::with_capacity(PERIOD_FRAMES * 2),
            configured: false,
        }
    }

    fn ensure_configured(&mut self, sample_rate: u32) -> AudioResult<()> {
        if !self.configured {
            self.device.configure(&DeviceConfig {
                channels: 1,
                sample_rate,
                format: DeviceSampleFormat::S16Le,
            })?;
            self.configured = true;
        }
        Ok(())
    }

    /// Flushes buffered samples and waits for playback to finish.
    pub fn finish(mut self) -> AudioResult<()> {
        if !self.configured {
            return Ok(());
        }
        if !self.pending.is_empty() {
            let pcm = samples_to_pcm16(&self.pending);
            self.device.write_period(&pcm)?;
            self.pending.clear();
        }
        self.device.drain()
    }
}

impl<D: PlaybackDevice + ?Sized> ToneSink for DeviceSink<'_, D> {
    fn write_tone(&mut self, tone: &ToneSpec) -> AudioResult<()> {
        self.ensure_configured(tone.sample_rate)?;
        tone.render_into(&mut self.pending);

        let whole = self.pending.len() - self.pending.len() % PERIOD_FRAMES;
        for period in self.pending[..whole].chunks(PERIOD_FRAMES) {
            self.device.write_period(&samples_to_pcm16(period))?;
        }
        self.pending.drain(..whole);
        Ok(())
    }
}

/// Returns true if this build can open an audio device at all.
pub fn backend_compiled() -> bool {
    cfg!(feature = "playback")
}

/// Opens the system's default output device.
#[cfg(feature = "playback")]
pub fn open_default_device() -> AudioResult<Box<dyn PlaybackDevice>> {
    Ok(Box::new(CpalDevice::open_default()?))
}

/// Opens the system's default output device.
#[cfg(not(feature = "playback"))]
pub fn open_default_device() -> AudioResult<Box<dyn PlaybackDevice>> {
    Err(AudioError::missing_backend(
        "built without the `playback` feature",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::ToneSynthesizer;
    use crate::wav::{write_wav_to_vec, WavFormat, WavResult};

    #[derive(Default)]
    struct RecordingDevice {
        config: Option<DeviceConfig>,
        periods: Vec<Vec<u8>>,
        drained: bool,
    }

    impl PlaybackDevice for RecordingDevice {
        fn configure(&mut self, config: &DeviceConfig) -> AudioResult<()> {
            self.config = Some(*config);
            Ok(())
        }

        fn write_period(&mut self, frames: &[u8]) -> AudioResult<()> {
            self.periods.push(frames.to_vec());
            Ok(())
        }

        fn drain(&mut self) -> AudioResult<()> {
            self.drained = true;
            Ok(())
        }
    }

    #[test]
    fn test_format_from_width() {
        assert_eq!(
            DeviceSampleFormat::from_sample_width(1).unwrap(),
            DeviceSampleFormat::U8
        );
        assert_eq!(
            DeviceSampleFormat::from_sample_width(2).unwrap(),
            DeviceSampleFormat::S16Le
        );
        assert_eq!(
            DeviceSampleFormat::from_sample_width(3).unwrap(),
            DeviceSampleFormat::S24Le
        );
        assert_eq!(
            DeviceSampleFormat::from_sample_width(4).unwrap(),
            DeviceSampleFormat::S32Le
        );
        assert!(matches!(
            DeviceSampleFormat::from_sample_width(5),
            Err(AudioError::UnsupportedSampleFormat { width: 5 })
        ));
        assert!(DeviceSampleFormat::from_sample_width(0).is_err());
    }

    #[test]
    fn test_decode_samples() {
        assert_eq!(DeviceSampleFormat::U8.decode(&[128]), 0.0);
        assert_eq!(DeviceSampleFormat::U8.decode(&[0]), -1.0);
        assert_eq!(DeviceSampleFormat::S16Le.decode(&[0x00, 0x80]), -1.0);
        assert_eq!(DeviceSampleFormat::S24Le.decode(&[0x00, 0x00, 0x80]), -1.0);
        assert_eq!(DeviceSampleFormat::S24Le.decode(&[0x00, 0x00, 0x40]), 0.5);
        assert_eq!(
            DeviceSampleFormat::S32Le.decode(&[0x00, 0x00, 0x00, 0xC0]),
            -0.5
        );
    }

    #[test]
    fn test_play_wav_periods() {
        let samples: Vec<i16> = (0..1000).map(|i| i as i16).collect();
        let wav = WavResult::from_mono(&samples, 44100).wav_data;

        let mut device = RecordingDevice::default();
        let periods = play_wav(&mut device, &wav).unwrap();

        assert_eq!(periods, 4);
        let config = device.config.unwrap();
        assert_eq!(config.channels, 1);
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.format, DeviceSampleFormat::S16Le);
        assert_eq!(device.periods[0].len(), PERIOD_FRAMES * 2);
        assert_eq!(device.periods[3].len(), (1000 - 3 * PERIOD_FRAMES) * 2);
        assert_eq!(device.periods.concat(), samples_to_pcm16(&samples));
        assert!(device.drained);
    }

    #[test]
    fn test_play_wav_unsupported_width() {
        let format = WavFormat {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 64,
        };
        let wav = write_wav_to_vec(&format, &[0u8; 16]);

        let mut device = RecordingDevice::default();
        let err = play_wav(&mut device, &wav).unwrap_err();
        assert!(matches!(
            err,
            AudioError::UnsupportedSampleFormat { width: 8 }
        ));
        assert!(device.config.is_none());
    }

    #[test]
    fn test_play_wav_8_bit() {
        let format = WavFormat {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 8,
        };
        let wav = write_wav_to_vec(&format, &[128u8; 10]);
        let mut device = RecordingDevice::default();
        assert_eq!(play_wav(&mut device, &wav).unwrap(), 1);
        assert_eq!(device.config.unwrap().format, DeviceSampleFormat::U8);
    }

    #[test]
    fn test_device_sink_matches_synthesized_samples() {
        let synth = ToneSynthesizer::default();
        let expected = synth.synthesize(".-").unwrap();

        let mut device = RecordingDevice::default();
        let mut sink = DeviceSink::new(&mut device);
        synth.stream(".-", &mut sink).unwrap();
        sink.finish().unwrap();

        assert_eq!(device.periods.concat(), expected.pcm_bytes());
        assert!(device.periods[..device.periods.len() - 1]
            .iter()
            .all(|p| p.len() == PERIOD_FRAMES * 2));
        assert!(device.drained);
    }

    #[test]
    fn test_device_sink_without_tones_leaves_device_alone() {
        let mut device = RecordingDevice::default();
        let sink = DeviceSink::new(&mut device);
        sink.finish().unwrap();
        assert!(device.config.is_none());
        assert!(!device.drained);
    }

    #[cfg(not(feature = "playback"))]
    #[test]
    fn test_missing_backend_without_feature() {
        assert!(!backend_compiled());
        let err = open_default_device().err().unwrap();
        assert!(err.is_missing_backend());
    }
}
