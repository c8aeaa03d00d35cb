//! Text command implementation
//!
//! Translates free-form input, deciding from its content whether it is text
//! to encode or Morse to decode.

use anyhow::{Context, Result};
use colored::Colorize;
use dahdit_codec::{
    infer_separator, Codec, Dictionary, Direction, Translation, DEFAULT_SEPARATOR,
};
use serde::Serialize;
use std::fs;
use std::process::ExitCode;

use crate::input::{coded, join_args, load_dictionary};

#[derive(Debug, Serialize)]
struct TextOutput<'a> {
    input: &'a str,
    #[serde(flatten)]
    translation: &'a Translation,
}

/// Translates `input` with `dictionary`.
///
/// Without an explicit `separator`, text is encoded with `;` and Morse is
/// decoded on `/` when it uses slashes between words.
pub fn translate(
    dictionary: &Dictionary,
    input: &str,
    separator: Option<&str>,
) -> Result<Translation> {
    let separator = separator.unwrap_or_else(|| match Direction::detect(input) {
        Direction::Encode => DEFAULT_SEPARATOR,
        Direction::Decode => infer_separator(input),
    });
    Codec::new(dictionary.alphabet())
        .translate(input, separator)
        .map_err(coded)
}

/// Run the text command
///
/// # Arguments
/// * `args` - Words to translate; joined with single spaces
/// * `separator` - Word separator; inferred from the input when absent
/// * `file` - Optional file to write the translation to
/// * `json` - Emit a JSON object instead of plain text
/// * `dictionary` - Optional JSON dictionary path
pub fn run(
    args: &[String],
    separator: Option<&str>,
    file: Option<&str>,
    json: bool,
    dictionary: Option<&str>,
) -> Result<ExitCode> {
    let dict = load_dictionary(dictionary)?;
    let input = join_args(args);
    let translation = translate(&dict, &input, separator)?;

    let rendered = if json {
        serde_json::to_string_pretty(&TextOutput {
            input: &input,
            translation: &translation,
        })?
    } else {
        translation.output.clone()
    };

    match file {
        Some(path) => {
            fs::write(path, format!("{}\n", rendered))
                .with_context(|| format!("Failed to write output file: {}", path))?;
            if !json {
                println!("{} wrote {}", "ok".green(), path);
            }
        }
        None => println!("{}", rendered),
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_encodes_text() {
        let dict = Dictionary::standard();
        let t = translate(&dict, "hello", None).unwrap();
        assert_eq!(t.direction, Direction::Encode);
        assert_eq!(t.output, ".... . .-.. .-.. ---");
    }

    #[test]
    fn test_translate_decodes_morse() {
        let dict = Dictionary::standard();
        let t = translate(&dict, ".- / -. . .-- / -.-. --- -.. .", Some("/")).unwrap();
        assert_eq!(t.direction, Direction::Decode);
        assert_eq!(t.output, "a new code");
    }

    #[test]
    fn test_translate_decodes_slashes_without_separator() {
        let dict = Dictionary::standard();
        let t = translate(&dict, ".- / -. . .-- / -.-. --- -.. .", None).unwrap();
        assert_eq!(t.direction, Direction::Decode);
        assert_eq!(t.output, "a new code");
    }

    #[test]
    fn test_translate_decodes_default_separator_without_separator() {
        let dict = Dictionary::standard();
        let t = translate(&dict, ".- ;-. . .--", None).unwrap();
        assert_eq!(t.output, "a new");
    }

    #[test]
    fn test_translate_explicit_separator_wins() {
        let dict = Dictionary::standard();
        let t = translate(&dict, "a new", Some(" / ")).unwrap();
        assert_eq!(t.output, ".- / -. . .--");
    }

    #[test]
    fn test_translate_rejects_glyph_separator() {
        let dict = Dictionary::standard();
        let err = translate(&dict, "e t", Some(".")).unwrap_err();
        assert!(err.to_string().contains("CODEC_010"));
    }

    #[test]
    fn test_translate_reports_unknown_character() {
        let dict = Dictionary::standard();
        let err = translate(&dict, "Hello!", None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("CODEC_001"));
        assert!(msg.contains("'!'"));
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let args = vec!["SOS".to_string()];
        run(&args, None, path.to_str(), false, None).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "... --- ...\n");
    }

    #[test]
    fn test_run_decodes_slash_separated_args() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let args = vec![".- / -. . .-- / -.-. --- -.. .".to_string()];
        run(&args, None, path.to_str(), false, None).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a new code\n");
    }

    #[test]
    fn test_run_writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let args = vec!["...".to_string(), "---".to_string(), "...".to_string()];
        run(&args, None, path.to_str(), true, None).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["input"], "... --- ...");
        assert_eq!(value["direction"], "decode");
        assert_eq!(value["output"], "sos");
    }
}
