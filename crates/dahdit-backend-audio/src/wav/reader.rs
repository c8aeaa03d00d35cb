//! Minimal WAV header parsing for playback.

use crate::error::{AudioError, AudioResult};

use super::format::WavFormat;

/// A parsed WAV file borrowing its PCM payload.
#[derive(Debug, Clone, Copy)]
pub struct WavData<'a> {
    /// Format from the `fmt ` chunk.
    pub format: WavFormat,
    /// Raw interleaved PCM bytes from the `data` chunk.
    pub pcm: &'a [u8],
}

impl WavData<'_> {
    /// Number of sample frames.
    pub fn num_frames(&self) -> usize {
        match self.format.block_align() {
            0 => 0,
            align => self.pcm.len() / align as usize,
        }
    }
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Parses an uncompressed PCM WAV file.
///
/// Only PCM (`format tag 1`) is accepted. Sample width is not checked here;
/// that is up to the device the data is played on.
pub fn parse_wav(bytes: &[u8]) -> AudioResult<WavData<'_>> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(AudioError::invalid_wav("missing RIFF/WAVE header"));
    }

    let mut format = None;
    let mut pos = 12;
    while pos + 8 <= bytes.len() {
        let chunk_id = &bytes[pos..pos + 4];
        let chunk_size = read_u32(bytes, pos + 4) as usize;
        let body = pos + 8;
        let end = body
            .checked_add(chunk_size)
            .filter(|&end| end <= bytes.len())
            .ok_or_else(|| AudioError::invalid_wav("chunk extends past end of file"))?;

        match chunk_id {
            b"fmt " => {
                if chunk_size < 16 {
                    return Err(AudioError::invalid_wav("fmt chunk too short"));
                }
                let tag = read_u16(bytes, body);
                if tag != 1 {
                    return Err(AudioError::invalid_wav(format!(
                        "unsupported format tag {tag} (only PCM is supported)"
                    )));
                }
                format = Some(WavFormat {
                    channels: read_u16(bytes, body + 2),
                    sample_rate: read_u32(bytes, body + 4),
                    bits_per_sample: read_u16(bytes, body + 14),
                });
            }
            b"data" => {
                let format =
                    format.ok_or_else(|| AudioError::invalid_wav("data chunk before fmt chunk"))?;
                if format.channels == 0 {
                    return Err(AudioError::invalid_wav("zero channels"));
                }
                if format.sample_rate == 0 {
                    return Err(AudioError::InvalidSampleRate { rate: 0 });
                }
                return Ok(WavData {
                    format,
                    pcm: &bytes[body..end],
                });
            }
            _ => {}
        }

        pos = end + (chunk_size % 2);
    }

    Err(AudioError::invalid_wav("no data chunk"))
}
