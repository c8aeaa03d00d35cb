//! Deterministic WAV file I/O.
//!
//! Writes canonical 44-byte-header 16-bit PCM WAV files with no timestamps or
//! variable metadata, so identical samples always produce identical bytes.
//! The reader only understands what playback needs: the `fmt ` and `data`
//! chunks of an uncompressed PCM file.

mod format;
mod pcm;
mod reader;
mod result;
mod writer;


// Re-export public API
pub use format::WavFormat;
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use reader::{parse_wav, WavData};
pub use result::WavResult;
pub use writer::{samples_to_pcm16, write_header, write_wav, write_wav_to_vec, HEADER_LEN};
