//! Sound command implementation
//!
//! Renders input as Morse audio. With an output file the WAV is written and
//! nothing is played; otherwise the audio goes to a temporary WAV which is
//! played on the default device.

use anyhow::{Context, Result};
use colored::Colorize;
use dahdit_backend_audio::{
    open_default_device, play_wav, SampleCount, SynthConfig, ToneSynthesizer, WavSink,
};
use dahdit_codec::{Codec, Dictionary, Direction};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::input::{coded, join_args, load_dictionary};
use crate::signal::CleanupGuard;

/// What happened when playback was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Audio was played.
    Played {
        /// Periods written to the device.
        periods: usize,
    },
    /// No device or backend; nothing was played.
    NoBackend {
        /// Why the backend is missing.
        reason: String,
    },
}

/// Builds the synthesizer for the given separator and timing policy.
pub fn create_synth(separator: char, legacy_timing: bool) -> Result<ToneSynthesizer> {
    let sample_count = if legacy_timing {
        SampleCount::Legacy
    } else {
        SampleCount::Nominal
    };
    let config = SynthConfig::default()
        .with_separator(separator)
        .with_sample_count(sample_count);
    ToneSynthesizer::new(config).map_err(coded)
}

/// Turns raw input into a Morse string.
///
/// Text is encoded. Input that already looks like Morse is decoded once to
/// check every symbol is known, then used as-is.
pub fn to_morse(dictionary: &Dictionary, input: &str, separator: char) -> Result<String> {
    let codec = Codec::new(dictionary.alphabet());
    let separator = separator.to_string();
    match Direction::detect(input) {
        Direction::Encode => codec.encode(input, &separator).map_err(coded),
        Direction::Decode => {
            codec.decode(input, &separator).map_err(coded)?;
            Ok(input.trim().to_string())
        }
    }
}

/// Streams `morse` into a WAV file at `path`.
pub fn render_wav_file(synth: &ToneSynthesizer, morse: &str, path: &Path) -> Result<()> {
    let mut sink = WavSink::create(path, synth.config().format())
        .map_err(coded)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;
    synth.stream(morse, &mut sink).map_err(coded)?;
    sink.finish()
        .map_err(coded)
        .with_context(|| format!("Failed to finish WAV file: {}", path.display()))?;
    Ok(())
}

/// Plays WAV bytes on the default device.
///
/// A missing backend is not an error: it is reported as
/// [`PlayOutcome::NoBackend`] so callers can degrade to file output.
pub fn play_wav_bytes(wav: &[u8]) -> Result<PlayOutcome> {
    match open_default_device() {
        Ok(mut device) => {
            let periods = play_wav(&mut device, wav).map_err(coded)?;
            Ok(PlayOutcome::Played { periods })
        }
        Err(e) if e.is_missing_backend() => Ok(PlayOutcome::NoBackend {
            reason: e.to_string(),
        }),
        Err(e) => Err(coded(e)),
    }
}

/// Prints the one-line advisory for a missing backend.
pub fn print_backend_advisory(reason: &str, kept: Option<&Path>) {
    match kept {
        Some(path) => eprintln!(
            "{} {}; audio kept at {}",
            "!!".yellow(),
            reason,
            path.display()
        ),
        None => eprintln!("{} {}", "!!".yellow(), reason),
    }
}

/// Run the sound command
///
/// # Arguments
/// * `args` - Text (or Morse) to render; joined with single spaces
/// * `file` - Output WAV path; when absent the audio is played instead
/// * `separator` - Morse word separator
/// * `legacy_timing` - Use the squared-duration sample count
/// * `dictionary` - Optional JSON dictionary path
///
/// # Returns
/// Exit code 0 on success, including when playback was requested but no
/// audio backend exists (the rendered file is kept and reported).
pub fn run(
    args: &[String],
    file: Option<&str>,
    separator: char,
    legacy_timing: bool,
    dictionary: Option<&str>,
) -> Result<ExitCode> {
    let dict = load_dictionary(dictionary)?;
    let morse = to_morse(&dict, &join_args(args), separator)?;
    let synth = create_synth(separator, legacy_timing)?;

    if let Some(path) = file {
        let path = PathBuf::from(path);
        render_wav_file(&synth, &morse, &path)?;
        let seconds =
            synth.sample_len(&morse).map_err(coded)? as f64 / synth.config().sample_rate as f64;
        println!(
            "{} wrote {} ({:.1}s)",
            "ok".green(),
            path.display(),
            seconds
        );
        return Ok(ExitCode::SUCCESS);
    }

    let mut tmp = tempfile::Builder::new()
        .prefix("dahdit-")
        .suffix(".wav")
        .tempfile()
        .context("Failed to create temporary WAV file")?;
    let cleanup = CleanupGuard::new(tmp.path());
    {
        let mut sink = WavSink::new(BufWriter::new(tmp.as_file_mut()), synth.config().format())
            .map_err(coded)?;
        synth.stream(&morse, &mut sink).map_err(coded)?;
        sink.finish().map_err(coded)?;
    }

    let wav = fs::read(tmp.path()).context("Failed to read back temporary WAV file")?;
    match play_wav_bytes(&wav)? {
        PlayOutcome::Played { .. } => {}
        PlayOutcome::NoBackend { reason } => {
            drop(cleanup);
            let (_, path) = tmp.keep().context("Failed to keep temporary WAV file")?;
            print_backend_advisory(&reason, Some(&path));
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dahdit_backend_audio::wav::parse_wav;

    #[test]
    fn test_to_morse_encodes_text() {
        let dict = Dictionary::standard();
        assert_eq!(to_morse(&dict, "SOS", ';').unwrap(), "... --- ...");
    }

    #[test]
    fn test_to_morse_passes_morse_through() {
        let dict = Dictionary::standard();
        assert_eq!(to_morse(&dict, " ... ---;. ", ';').unwrap(), "... ---;.");
    }

    #[test]
    fn test_to_morse_rejects_unknown_symbols() {
        let dict = Dictionary::standard();
        let err = to_morse(&dict, "........", ';').unwrap_err();
        assert!(err.to_string().contains("CODEC_002"));
    }

    #[test]
    fn test_create_synth_rejects_token_separator() {
        assert!(create_synth('-', false).is_err());
        assert!(create_synth('/', true).is_ok());
    }

    #[test]
    fn test_run_with_file_writes_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.wav");
        let args = vec!["Hello".to_string(), "World".to_string()];
        let code = run(&args, path.to_str(), ';', false, None).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let bytes = fs::read(&path).unwrap();
        let parsed = parse_wav(&bytes).unwrap();
        assert_eq!(parsed.format.channels, 1);
        assert_eq!(parsed.format.sample_rate, 44100);

        let synth = create_synth(';', false).unwrap();
        let morse = to_morse(&Dictionary::standard(), "Hello World", ';').unwrap();
        assert_eq!(parsed.num_frames(), synth.sample_len(&morse).unwrap());
    }

    #[test]
    fn test_run_rejects_unknown_character_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.wav");
        let args = vec!["Hello!".to_string()];
        assert!(run(&args, path.to_str(), ';', false, None).is_err());
        assert!(!path.exists());
    }

    #[cfg(not(feature = "playback"))]
    #[test]
    fn test_play_without_backend_degrades() {
        let outcome = play_wav_bytes(b"unused").unwrap();
        assert!(matches!(outcome, PlayOutcome::NoBackend { .. }));
    }
}
