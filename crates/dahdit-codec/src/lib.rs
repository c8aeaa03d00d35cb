//! dahdit Morse codec
//!
//! Bidirectional translation between plain text and Morse code.
//!
//! # Overview
//!
//! - [`SymbolTable`] is an immutable character/symbol bijection. Collisions
//!   are rejected at construction so reverse lookup is never ambiguous.
//! - [`Dictionary`] pairs a table with a practice word list and can be
//!   loaded from JSON to swap in alternate alphabets.
//! - [`Codec`] encodes and decodes against a table, and [`Direction`]
//!   guesses which way raw input should go.
//!
//! # Example
//!
//! ```
//! use dahdit_codec::{Codec, SymbolTable, DEFAULT_SEPARATOR};
//!
//! let table = SymbolTable::itu();
//! let codec = Codec::new(&table);
//!
//! let morse = codec.encode("Hello World", DEFAULT_SEPARATOR).unwrap();
//! assert_eq!(morse, ".... . .-.. .-.. ---;.-- --- .-. .-.. -..");
//! assert_eq!(codec.decode(&morse, DEFAULT_SEPARATOR).unwrap(), "hello world");
//! ```

pub mod alphabet;
pub mod codec;
pub mod dictionary;
pub mod error;

// Re-export main types at crate root
pub use alphabet::{fold_case, SymbolTable, DASH, DOT, ITU_ALPHABET};
pub use codec::{
    infer_separator, Codec, Direction, Translation, DEFAULT_SEPARATOR, SLASH_SEPARATOR,
};
pub use dictionary::{Dictionary, DictionaryFile, PRACTICE_WORDS};
pub use error::{BackendError, CodecError, CodecResult};
