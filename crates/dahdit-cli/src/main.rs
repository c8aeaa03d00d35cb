//! dahdit CLI - Morse code translation, audio rendering and practice
//!
//! This binary translates text to and from Morse, renders Morse as WAV audio
//! or plays it, and runs listening quizzes.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::time::Duration;

use dahdit_cli::commands;
use dahdit_cli::commands::quiz::QuizOptions;
use dahdit_cli::quiz::QuizSet;
use dahdit_cli::signal;

/// dahdit - Morse code translator, tone generator and trainer
#[derive(Parser)]
#[command(name = "dahdit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate text to Morse, or Morse back to text
    Text {
        /// Word separator [default: ";" to encode, "/" or ";" to decode]
        #[arg(long)]
        separator: Option<String>,

        /// Write the translation to this file instead of stdout
        #[arg(short, long)]
        file: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// JSON dictionary to use instead of the built-in ITU table
        #[arg(long)]
        dictionary: Option<String>,

        /// Text or Morse to translate
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },

    /// Render text (or Morse) as audio
    Sound {
        /// Write a WAV file instead of playing the audio
        #[arg(short, long)]
        file: Option<String>,

        /// Use the legacy sample count (duration squared times rate)
        #[arg(long)]
        legacy_timing: bool,

        /// Word separator in Morse input
        #[arg(long, default_value_t = ';')]
        separator: char,

        /// JSON dictionary to use instead of the built-in ITU table
        #[arg(long)]
        dictionary: Option<String>,

        /// Text or Morse to render
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },

    /// Practice copying random characters or words
    Quiz {
        /// What to draw challenges from
        #[arg(long, value_enum, default_value_t = QuizSet::Alphanum)]
        set: QuizSet,

        /// Number of challenges
        #[arg(short, long, default_value_t = 1)]
        count: u32,

        /// Seed for reproducible challenges
        #[arg(long)]
        seed: Option<u64>,

        /// Show the Morse string instead of playing it
        #[arg(long)]
        text: bool,

        /// Pause before each challenge is played, in milliseconds
        #[arg(long, default_value_t = 2000)]
        delay_ms: u64,

        /// Use the legacy sample count (duration squared times rate)
        #[arg(long)]
        legacy_timing: bool,

        /// Write each challenge to this WAV file instead of playing it
        #[arg(short, long)]
        file: Option<String>,

        /// JSON dictionary to use instead of the built-in one
        #[arg(long)]
        dictionary: Option<String>,
    },

    /// Check the audio backend and report configuration
    Doctor {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// JSON dictionary to report on
        #[arg(long)]
        dictionary: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = signal::install_interrupt_handler() {
        eprintln!("{}: {}", colored::Colorize::yellow("warning"), e);
    }

    let result = match cli.command {
        Commands::Text {
            separator,
            file,
            json,
            dictionary,
            args,
        } => commands::text::run(
            &args,
            separator.as_deref(),
            file.as_deref(),
            json,
            dictionary.as_deref(),
        ),
        Commands::Sound {
            file,
            legacy_timing,
            separator,
            dictionary,
            args,
        } => commands::sound::run(
            &args,
            file.as_deref(),
            separator,
            legacy_timing,
            dictionary.as_deref(),
        ),
        Commands::Quiz {
            set,
            count,
            seed,
            text,
            delay_ms,
            legacy_timing,
            file,
            dictionary,
        } => {
            let options = QuizOptions {
                set,
                count,
                seed,
                text,
                delay: Duration::from_millis(delay_ms),
                legacy_timing,
                file,
            };
            commands::quiz::run(&options, dictionary.as_deref())
        }
        Commands::Doctor { json, dictionary } => {
            commands::doctor::run(json, dictionary.as_deref())
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_text() {
        let cli = Cli::try_parse_from(["dahdit", "text", "Hello", "World"]).unwrap();
        match cli.command {
            Commands::Text {
                separator,
                file,
                json,
                dictionary,
                args,
            } => {
                assert!(separator.is_none());
                assert!(file.is_none());
                assert!(!json);
                assert!(dictionary.is_none());
                assert_eq!(args, vec!["Hello", "World"]);
            }
            _ => panic!("expected text command"),
        }
    }

    #[test]
    fn test_cli_parses_morse_args_starting_with_dash() {
        let cli = Cli::try_parse_from([
            "dahdit",
            "text",
            "--separator",
            "/",
            "-f",
            "out.txt",
            "--",
            "-.-.",
            "/",
            "...",
        ])
        .unwrap();
        match cli.command {
            Commands::Text {
                separator,
                file,
                args,
                ..
            } => {
                assert_eq!(separator.as_deref(), Some("/"));
                assert_eq!(file.as_deref(), Some("out.txt"));
                assert_eq!(args, vec!["-.-.", "/", "..."]);
            }
            _ => panic!("expected text command"),
        }
    }

    #[test]
    fn test_cli_decodes_slash_separated_morse() {
        let cli =
            Cli::try_parse_from(["dahdit", "text", ".- / -. . .-- / -.-. --- -.. ."]).unwrap();
        let Commands::Text {
            separator, args, ..
        } = cli.command
        else {
            panic!("expected text command");
        };
        assert!(separator.is_none());

        let input = dahdit_cli::input::join_args(&args);
        let dict = dahdit_codec::Dictionary::standard();
        let translation =
            commands::text::translate(&dict, &input, separator.as_deref()).unwrap();
        assert_eq!(translation.output, "a new code");
    }

    #[test]
    fn test_cli_requires_args_for_text() {
        assert!(Cli::try_parse_from(["dahdit", "text"]).is_err());
    }

    #[test]
    fn test_cli_parses_sound() {
        let cli = Cli::try_parse_from([
            "dahdit",
            "sound",
            "-f",
            "sos.wav",
            "--legacy-timing",
            "SOS",
        ])
        .unwrap();
        match cli.command {
            Commands::Sound {
                file,
                legacy_timing,
                separator,
                args,
                ..
            } => {
                assert_eq!(file.as_deref(), Some("sos.wav"));
                assert!(legacy_timing);
                assert_eq!(separator, ';');
                assert_eq!(args, vec!["SOS"]);
            }
            _ => panic!("expected sound command"),
        }
    }

    #[test]
    fn test_cli_parses_quiz_defaults() {
        let cli = Cli::try_parse_from(["dahdit", "quiz"]).unwrap();
        match cli.command {
            Commands::Quiz {
                set,
                count,
                seed,
                text,
                delay_ms,
                legacy_timing,
                file,
                dictionary,
            } => {
                assert_eq!(set, QuizSet::Alphanum);
                assert_eq!(count, 1);
                assert!(seed.is_none());
                assert!(!text);
                assert_eq!(delay_ms, 2000);
                assert!(!legacy_timing);
                assert!(file.is_none());
                assert!(dictionary.is_none());
            }
            _ => panic!("expected quiz command"),
        }
    }

    #[test]
    fn test_cli_parses_quiz_word_set() {
        let cli = Cli::try_parse_from([
            "dahdit", "quiz", "--set", "word", "-c", "10", "--seed", "42", "--text",
        ])
        .unwrap();
        match cli.command {
            Commands::Quiz {
                set,
                count,
                seed,
                text,
                ..
            } => {
                assert_eq!(set, QuizSet::Word);
                assert_eq!(count, 10);
                assert_eq!(seed, Some(42));
                assert!(text);
            }
            _ => panic!("expected quiz command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_quiz_set() {
        assert!(Cli::try_parse_from(["dahdit", "quiz", "--set", "symbols"]).is_err());
    }

    #[test]
    fn test_cli_parses_doctor() {
        let cli = Cli::try_parse_from(["dahdit", "doctor", "--json"]).unwrap();
        match cli.command {
            Commands::Doctor { json, dictionary } => {
                assert!(json);
                assert!(dictionary.is_none());
            }
            _ => panic!("expected doctor command"),
        }
    }
}
