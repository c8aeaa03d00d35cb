//! Error types for the Morse codec.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while building dictionaries or translating.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A text character has no Morse symbol in the table.
    #[error("unknown character '{character}' (word {word}, position {position})")]
    UnknownCharacter {
        /// The offending character.
        character: char,
        /// 0-indexed word the character appeared in.
        word: usize,
        /// 0-indexed character offset within the word.
        position: usize,
    },

    /// A Morse symbol has no character in the reverse table.
    #[error("unknown Morse symbol '{symbol}' (word {word}, position {position})")]
    UnknownSymbol {
        /// The offending symbol.
        symbol: String,
        /// 0-indexed word the symbol appeared in.
        word: usize,
        /// 0-indexed symbol offset within the word.
        position: usize,
    },

    /// Two characters map to the same Morse symbol.
    #[error("Morse symbol '{symbol}' is assigned to both '{first}' and '{second}'")]
    AmbiguousSymbol {
        /// The shared symbol.
        symbol: String,
        /// Character that claimed the symbol first.
        first: char,
        /// Character that tried to claim it again.
        second: char,
    },

    /// A character appears twice in the table (after case folding).
    #[error("character '{character}' is defined more than once")]
    DuplicateCharacter {
        /// The duplicated character.
        character: char,
    },

    /// A symbol is empty or contains glyphs other than '.' and '-'.
    #[error("invalid Morse symbol '{symbol}' for '{character}': only '.' and '-' are allowed")]
    InvalidSymbol {
        /// Character the symbol belongs to.
        character: char,
        /// The malformed symbol.
        symbol: String,
    },

    /// Word separators must be non-empty.
    #[error("word separator must not be empty")]
    EmptySeparator,

    /// Word separators must not contain '.', '-' or inner whitespace.
    #[error("invalid word separator '{separator}': '.', '-' and inner whitespace are not allowed")]
    InvalidSeparator {
        /// The rejected separator.
        separator: String,
    },

    /// Dictionary data is structurally invalid.
    #[error("invalid dictionary: {message}")]
    InvalidDictionary {
        /// Error message.
        message: String,
    },

    /// Dictionary JSON could not be parsed.
    #[error("dictionary JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading dictionary data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Creates an invalid dictionary error.
    pub fn invalid_dictionary(message: impl Into<String>) -> Self {
        Self::InvalidDictionary {
            message: message.into(),
        }
    }
}

/// Trait implemented by every error type in the dahdit crates.
///
/// Provides a stable error code and a category so the CLI can report
/// failures uniformly regardless of which crate raised them.
///
/// ```
/// use dahdit_codec::{BackendError, CodecError};
///
/// let err = CodecError::EmptySeparator;
/// assert_eq!(err.code(), "CODEC_006");
/// assert_eq!(err.category(), "codec");
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "CODEC_001" or "AUDIO_002". Codes are
    /// stable and can be matched on programmatically.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

impl BackendError for CodecError {
    fn code(&self) -> &'static str {
        match self {
            CodecError::UnknownCharacter { .. } => "CODEC_001",
            CodecError::UnknownSymbol { .. } => "CODEC_002",
            CodecError::AmbiguousSymbol { .. } => "CODEC_003",
            CodecError::DuplicateCharacter { .. } => "CODEC_004",
            CodecError::InvalidSymbol { .. } => "CODEC_005",
            CodecError::EmptySeparator => "CODEC_006",
            CodecError::InvalidDictionary { .. } => "CODEC_007",
            CodecError::Json(_) => "CODEC_008",
            CodecError::Io(_) => "CODEC_009",
            CodecError::InvalidSeparator { .. } => "CODEC_010",
        }
    }

    fn category(&self) -> &'static str {
        "codec"
    }
}
