//! Destinations for synthesized tones.
//!
//! The synthesizer hands each [`ToneSpec`] to a [`ToneSink`]. Sinks decide
//! whether to buffer, write to disk or feed a device; all of them render
//! samples through [`ToneSpec::render_into`], so every destination sees the
//! same bytes.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{AudioError, AudioResult};
use crate::tone::ToneSpec;
use crate::wav::{samples_to_pcm16, write_header, WavFormat};

/// Receives tones in playback order.
pub trait ToneSink {
    /// Accepts the next tone.
    fn write_tone(&mut self, tone: &ToneSpec) -> AudioResult<()>;
}

impl<F> ToneSink for F
where
    F: FnMut(&ToneSpec) -> AudioResult<()>,
{
    fn write_tone(&mut self, tone: &ToneSpec) -> AudioResult<()> {
        self(tone)
    }
}

/// Collects rendered samples in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    samples: Vec<i16>,
}

impl BufferSink {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples rendered so far.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Consumes the sink, returning its samples.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}

impl ToneSink for BufferSink {
    fn write_tone(&mut self, tone: &ToneSpec) -> AudioResult<()> {
        tone.render_into(&mut self.samples);
        Ok(())
    }
}

/// Streams tones straight into a WAV file.
///
/// The header is written up front with a zero data size and patched by
/// [`WavSink::finish`].
#[derive(Debug)]
pub struct WavSink<W: Write + Seek> {
    writer: W,
    format: WavFormat,
    data_bytes: u64,
    scratch: Vec<i16>,
}

impl WavSink<BufWriter<File>> {
    /// Creates (or truncates) a WAV file at `path`.
    pub fn create(path: impl AsRef<Path>, format: WavFormat) -> AudioResult<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), format)
    }
}

impl<W: Write + Seek> WavSink<W> {
    /// Wraps `writer`, writing a placeholder header.
    pub fn new(mut writer: W, format: WavFormat) -> AudioResult<Self> {
        if format.bits_per_sample != 16 {
            return Err(AudioError::UnsupportedSampleFormat {
                width: format.sample_width(),
            });
        }
        write_header(&mut writer, &format, 0)?;
        Ok(Self {
            writer,
            format,
            data_bytes: 0,
            scratch: Vec::new(),
        })
    }

    /// Number of PCM bytes written so far.
    pub fn data_bytes(&self) -> u64 {
        self.data_bytes
    }

    /// Patches the header sizes and returns the writer.
    pub fn finish(mut self) -> AudioResult<W> {
        let data_size = u32::try_from(self.data_bytes)
            .map_err(|_| AudioError::invalid_param("samples", "WAV data exceeds 4 GiB"))?;
        self.writer.seek(SeekFrom::Start(0))?;
        write_header(&mut self.writer, &self.format, data_size)?;
        self.writer.seek(SeekFrom::End(0))?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write + Seek> ToneSink for WavSink<W> {
    fn write_tone(&mut self, tone: &ToneSpec) -> AudioResult<()> {
        self.scratch.clear();
        tone.render_into(&mut self.scratch);
        let pcm = samples_to_pcm16(&self.scratch);
        self.writer.write_all(&pcm)?;
        self.data_bytes += pcm.len() as u64;
        Ok(())
    }
}
