//! dahdit Audio Backend
//!
//! Renders Morse strings as timed sine-tone bursts and delivers them as PCM
//! audio, either as a complete buffer for a WAV writer or as a stream of tone
//! specifications to a sink such as a file or an audio device.
//!
//! # Determinism
//!
//! Synthesis is a pure function of the Morse string and [`SynthConfig`].
//! The same input always yields byte-identical PCM, which the BLAKE3
//! `pcm_hash` of a [`WavResult`] makes easy to check.
//!
//! # Example
//!
//! ```
//! use dahdit_backend_audio::ToneSynthesizer;
//!
//! let synth = ToneSynthesizer::default();
//! let result = synth.synthesize("... --- ...").unwrap();
//!
//! let wav = result.to_wav();
//! assert_eq!(&wav.wav_data[0..4], b"RIFF");
//! assert_eq!(wav.sample_rate, 44100);
//! ```
//!
//! # Crate Structure
//!
//! - [`synth`] - Token-by-token tone synthesis
//! - [`timing`] - Duration table and sample-count policies
//! - [`tone`] - Tone specifications and sample rendering
//! - [`token`] - Morse token classification
//! - [`sink`] - Buffer and WAV file sinks
//! - [`playback`] - Period-based device playback
//! - [`wav`] - Deterministic WAV writer and minimal reader

pub mod error;
pub mod playback;
pub mod sink;
pub mod synth;
pub mod timing;
pub mod token;
pub mod tone;
pub mod wav;

// Re-export main types at crate root
pub use error::{AudioError, AudioResult};
pub use playback::{
    backend_compiled, open_default_device, play_pcm, play_wav, DeviceConfig, DeviceSampleFormat,
    DeviceSink, PlaybackDevice, PERIOD_FRAMES,
};
pub use sink::{BufferSink, ToneSink, WavSink};
pub use synth::{
    SynthConfig, SynthesisResult, ToneSynthesizer, DEFAULT_FREQUENCY, DEFAULT_SAMPLE_RATE,
    DEFAULT_WORD_SEPARATOR,
};
pub use timing::{SampleCount, TimingTable};
pub use token::Token;
pub use tone::{ToneSpec, PEAK_AMPLITUDE};
pub use wav::{WavFormat, WavResult};
