//! Morse token stream.

use dahdit_codec::{DASH, DOT};

use crate::error::{AudioError, AudioResult};

/// One element of a Morse string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `.`
    Dot,
    /// `-`
    Dash,
    /// A space between symbols.
    SymbolGap,
    /// The inter-word separator.
    WordGap,
}

impl Token {
    /// Classifies a character given the word separator in use.
    pub fn from_char(c: char, separator: char) -> Option<Self> {
        match c {
            _ if c == separator => Some(Token::WordGap),
            DOT => Some(Token::Dot),
            DASH => Some(Token::Dash),
            ' ' => Some(Token::SymbolGap),
            _ => None,
        }
    }

    /// Returns true for dots and dashes.
    pub fn is_tone(self) -> bool {
        matches!(self, Token::Dot | Token::Dash)
    }
}

/// Splits a Morse string into tokens.
///
/// Fails on the first character that is not a dot, dash, space or
/// `separator`, so callers never see a partial stream.
pub fn tokenize(morse: &str, separator: char) -> AudioResult<Vec<Token>> {
    morse
        .chars()
        .enumerate()
        .map(|(position, token)| {
            Token::from_char(token, separator).ok_or(AudioError::UnknownToken { token, position })
        })
        .collect()
}
