//! Doctor command implementation
//!
//! Reports versions, the dictionary in use and whether audio can be played.

use anyhow::Result;
use colored::Colorize;
use dahdit_backend_audio::{backend_compiled, open_default_device, DEFAULT_WORD_SEPARATOR};
use dahdit_codec::{Codec, SymbolTable, DEFAULT_SEPARATOR};
use serde::Serialize;
use std::process::ExitCode;

use super::sound::create_synth;
use crate::input::{coded, load_dictionary};

/// Audio backend state.
#[derive(Debug, Clone, Serialize)]
pub struct AudioStatus {
    /// Built with the `playback` feature.
    pub compiled: bool,
    /// A default output device could be opened.
    pub available: bool,
    pub detail: String,
}

/// Result of rendering a fixed phrase with the ITU table.
#[derive(Debug, Clone, Serialize)]
pub struct SelfTest {
    pub morse: String,
    pub num_samples: usize,
    pub pcm_hash: String,
}

/// Everything `doctor` reports.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    pub version: String,
    pub dictionary: String,
    pub alphabet_size: usize,
    pub practice_words: usize,
    pub audio: AudioStatus,
    pub self_test: SelfTest,
}

const SELF_TEST_PHRASE: &str = "SOS";

fn check_audio() -> (AudioStatus, bool) {
    let compiled = backend_compiled();
    match open_default_device() {
        Ok(_) => (
            AudioStatus {
                compiled,
                available: true,
                detail: "default output device opened".to_string(),
            },
            true,
        ),
        Err(e) if e.is_missing_backend() => (
            AudioStatus {
                compiled,
                available: false,
                detail: e.to_string(),
            },
            true,
        ),
        Err(e) => (
            AudioStatus {
                compiled,
                available: false,
                detail: e.to_string(),
            },
            false,
        ),
    }
}

fn self_test() -> Result<SelfTest> {
    let table = SymbolTable::itu();
    let morse = Codec::new(&table)
        .encode(SELF_TEST_PHRASE, DEFAULT_SEPARATOR)
        .map_err(coded)?;
    let synth = create_synth(DEFAULT_WORD_SEPARATOR, false)?;
    let wav = synth.synthesize(&morse).map_err(coded)?.to_wav();
    Ok(SelfTest {
        morse,
        num_samples: wav.num_samples,
        pcm_hash: wav.pcm_hash,
    })
}

/// Builds the report. The flag is false when a check failed outright.
pub fn collect(dictionary: Option<&str>) -> Result<(DoctorReport, bool)> {
    let dict = load_dictionary(dictionary)?;
    let (audio, audio_ok) = check_audio();
    let self_test = self_test()?;

    let report = DoctorReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        dictionary: dictionary.unwrap_or("built-in").to_string(),
        alphabet_size: dict.alphabet().len(),
        practice_words: dict.words().len(),
        audio,
        self_test,
    };
    Ok((report, audio_ok))
}

/// Run the doctor command
///
/// A missing audio backend is reported but is not a failure: `text` and
/// `sound -f` still work without one.
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run(json: bool, dictionary: Option<&str>) -> Result<ExitCode> {
    let (report, all_ok) = collect(dictionary)?;
    let code = if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(code);
    }

    println!("{}", "dahdit Doctor".cyan().bold());
    println!("{}", "=============".cyan());
    println!();

    println!("{}", "Versions:".bold());
    println!("  {} dahdit v{}", "->".green(), report.version);
    println!();

    println!("{}", "Dictionary:".bold());
    println!(
        "  {} {} ({} symbols, {} practice words)",
        "ok".green(),
        report.dictionary,
        report.alphabet_size,
        report.practice_words
    );
    println!();

    println!("{}", "Audio:".bold());
    if report.audio.available {
        println!("  {} {}", "ok".green(), report.audio.detail);
    } else if all_ok {
        println!("  {} {}", "!!".yellow(), report.audio.detail);
        println!(
            "     {}",
            "Sound is written to WAV files instead of being played.".dimmed()
        );
    } else {
        println!("  {} {}", "!!".red(), report.audio.detail);
    }
    println!();

    println!("{}", "Self-test:".bold());
    println!(
        "  {} {} -> {} ({} samples, pcm {})",
        "ok".green(),
        SELF_TEST_PHRASE,
        report.self_test.morse,
        report.self_test.num_samples,
        &report.self_test.pcm_hash[..16]
    );
    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
    }
    Ok(code)
}
