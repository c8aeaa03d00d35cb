//! Text to Morse translation and back.
//!
//! Translation is all-or-nothing: the first unknown character or symbol
//! aborts the call and no partial output is returned.


use serde::Serialize;

use crate::alphabet::{SymbolTable, DASH, DOT};
use crate::error::{CodecError, CodecResult};

/// Default separator placed between encoded words.
pub const DEFAULT_SEPARATOR: &str = ";";

/// Word separator of slash-delimited Morse such as `.- / -. . .--`.
pub const SLASH_SEPARATOR: &str = "/";

/// Picks the word separator for Morse that arrived without one.
///
/// Input carrying `/` but not the default separator is split on `/`;
/// everything else on [`DEFAULT_SEPARATOR`].
pub fn infer_separator(morse: &str) -> &'static str {
    if morse.contains(SLASH_SEPARATOR) && !morse.contains(DEFAULT_SEPARATOR) {
        SLASH_SEPARATOR
    } else {
        DEFAULT_SEPARATOR
    }
}

/// Which way a translation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Plain text to Morse.
    Encode,
    /// Morse to plain text.
    Decode,
}

impl Direction {
    /// Guesses the direction of raw input.
    ///
    /// Any ASCII letter or digit means the input is text to encode; anything
    /// else is treated as Morse. Text made only of dots, dashes, spaces and
    /// separators is therefore always decoded.
    pub fn detect(input: &str) -> Self {
        if input.chars().any(|c| c.is_ascii_alphanumeric()) {
            Direction::Encode
        } else {
            Direction::Decode
        }
    }
}

/// Output of [`Codec::translate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// Direction that was applied.
    pub direction: Direction,
    /// Translated text.
    pub output: String,
}

/// Translator bound to a symbol table.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    table: &'a SymbolTable,
}

impl<'a> Codec<'a> {
    /// Creates a codec over `table`.
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    /// The table this codec translates with.
    pub fn table(&self) -> &'a SymbolTable {
        self.table
    }

    /// Encodes whitespace-delimited text as Morse.
    ///
    /// Symbols within a word are joined with a single space, words with
    /// `separator`.
    pub fn encode(&self, text: &str, separator: &str) -> CodecResult<String> {
        check_separator(separator)?;

        let mut words = Vec::new();
        for (word_index, word) in text.split_whitespace().enumerate() {
            let mut symbols = Vec::with_capacity(word.len());
            for (position, character) in word.chars().enumerate() {
                let symbol =
                    self.table
                        .symbol(character)
                        .ok_or(CodecError::UnknownCharacter {
                            character,
                            word: word_index,
                            position,
                        })?;
                symbols.push(symbol);
            }
            words.push(symbols.join(" "));
        }

        Ok(words.join(separator))
    }

    /// Decodes Morse into lowercase text.
    ///
    /// Input is split on `separator` into words and each word on whitespace
    /// into symbols. Decoded words are joined with a single space.
    pub fn decode(&self, morse: &str, separator: &str) -> CodecResult<String> {
        check_separator(separator)?;

        let mut words = Vec::new();
        for (word_index, word) in morse.split(separator).enumerate() {
            let mut decoded = String::new();
            for (position, symbol) in word.split_whitespace().enumerate() {
                let character =
                    self.table
                        .character(symbol)
                        .ok_or_else(|| CodecError::UnknownSymbol {
                            symbol: symbol.to_string(),
                            word: word_index,
                            position,
                        })?;
                decoded.push(character);
            }
            words.push(decoded);
        }

        Ok(words.join(" "))
    }

    /// Detects the direction of `input` and translates it.
    pub fn translate(&self, input: &str, separator: &str) -> CodecResult<Translation> {
        let direction = Direction::detect(input);
        let output = match direction {
            Direction::Encode => self.encode(input, separator)?,
            Direction::Decode => self.decode(input, separator)?,
        };
        Ok(Translation { direction, output })
    }
}

/// Rejects separators that would collide with symbols or symbol gaps.
///
/// Whitespace is allowed only as padding around a core such as `" / "`.
fn check_separator(separator: &str) -> CodecResult<()> {
    if separator.is_empty() {
        return Err(CodecError::EmptySeparator);
    }

    let core = separator.trim();
    let clashes = |c: char| c == DOT || c == DASH || c.is_whitespace();
    if core.is_empty() || core.chars().any(clashes) {
        return Err(CodecError::InvalidSeparator {
            separator: separator.to_string(),
        });
    }
    Ok(())
}
