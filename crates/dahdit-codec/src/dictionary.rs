//! Dictionaries: a symbol table plus a practice word list.
//!
//! The standard dictionary pairs the ITU alphabet with a list of common
//! English words. Alternates can be loaded from JSON:
//!
//! ```json
//! {
//!   "alphabet": { "a": ".-", "b": "-..." },
//!   "words": ["ab", "ba"]
//! }
//! ```

mod common_words;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alphabet::SymbolTable;
use crate::error::{CodecError, CodecResult};

pub use common_words::PRACTICE_WORDS;

/// On-disk dictionary representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DictionaryFile {
    /// Character to Morse symbol mapping. Keys must be single characters.
    pub alphabet: BTreeMap<String, String>,
    /// Practice words. Optional; defaults to empty.
    #[serde(default)]
    pub words: Vec<String>,
}

/// A validated symbol table and word list.
#[derive(Debug, Clone)]
pub struct Dictionary {
    alphabet: SymbolTable,
    words: Vec<String>,
}

impl Dictionary {
    /// Creates a dictionary, checking every word is encodable.
    ///
    /// Words are stored lowercased; blank entries are rejected.
    pub fn new(alphabet: SymbolTable, words: Vec<String>) -> CodecResult<Self> {
        if alphabet.is_empty() {
            return Err(CodecError::invalid_dictionary("alphabet is empty"));
        }

        let mut normalized = Vec::with_capacity(words.len());
        for word in words {
            let word = word.trim().to_lowercase();
            if word.is_empty() || word.contains(char::is_whitespace) {
                return Err(CodecError::invalid_dictionary(format!(
                    "practice word '{word}' must be a single non-empty word"
                )));
            }
            if let Some(c) = word.chars().find(|c| !alphabet.contains(*c)) {
                return Err(CodecError::invalid_dictionary(format!(
                    "practice word '{word}' uses '{c}', which is not in the alphabet"
                )));
            }
            normalized.push(word);
        }

        Ok(Self {
            alphabet,
            words: normalized,
        })
    }

    /// The ITU alphabet with the built-in practice word list.
    pub fn standard() -> Self {
        Self {
            alphabet: SymbolTable::itu(),
            words: PRACTICE_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Parses a dictionary from JSON text.
    pub fn from_json(json: &str) -> CodecResult<Self> {
        let file: DictionaryFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Reads and parses a JSON dictionary from disk.
    pub fn from_path(path: impl AsRef<Path>) -> CodecResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Validates a deserialized dictionary file.
    pub fn from_file(file: DictionaryFile) -> CodecResult<Self> {
        let mut pairs = Vec::with_capacity(file.alphabet.len());
        for (key, symbol) in file.alphabet {
            let mut chars = key.chars();
            let character = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(CodecError::invalid_dictionary(format!(
                        "alphabet key '{key}' must be exactly one character"
                    )))
                }
            };
            pairs.push((character, symbol));
        }

        let alphabet = SymbolTable::from_pairs(pairs)?;
        Self::new(alphabet, file.words)
    }

    /// Converts back to the serializable form.
    pub fn to_file(&self) -> DictionaryFile {
        DictionaryFile {
            alphabet: self
                .alphabet
                .iter()
                .map(|(c, s)| (c.to_string(), s.to_string()))
                .collect(),
            words: self.words.clone(),
        }
    }

    /// The symbol table.
    pub fn alphabet(&self) -> &SymbolTable {
        &self.alphabet
    }

    /// The practice word list.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_dictionary() {
        let dict = Dictionary::standard();
        assert_eq!(dict.alphabet().len(), 49);
        assert!(!dict.words().is_empty());
    }

    #[test]
    fn test_practice_words_are_distinct_lowercase() {
        let mut seen = std::collections::HashSet::new();
        for word in PRACTICE_WORDS {
            assert_eq!(*word, word.to_lowercase());
            assert!(seen.insert(*word), "duplicate practice word '{word}'");
        }
        assert_eq!(Dictionary::standard().words().len(), PRACTICE_WORDS.len());
    }

    #[test]
    fn test_standard_words_are_encodable() {
        let dict = Dictionary::standard();
        let rebuilt = Dictionary::new(dict.alphabet().clone(), dict.words().to_vec());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_from_json() {
        let dict = Dictionary::from_json(
            r#"{ "alphabet": { "A": ".-", "b": "-..." }, "words": ["Ab", "ba"] }"#,
        )
        .unwrap();
        assert_eq!(dict.alphabet().symbol('a'), Some(".-"));
        assert_eq!(dict.words(), &["ab".to_string(), "ba".to_string()]);
    }

    #[test]
    fn test_from_json_words_optional() {
        let dict = Dictionary::from_json(r#"{ "alphabet": { "e": "." } }"#).unwrap();
        assert!(dict.words().is_empty());
    }

    #[test]
    fn test_from_json_rejects_multichar_key() {
        let err = Dictionary::from_json(r#"{ "alphabet": { "ch": "----" } }"#).unwrap_err();
        assert!(matches!(err, CodecError::InvalidDictionary { .. }));
    }

    #[test]
    fn test_from_json_rejects_ambiguous_alphabet() {
        let err =
            Dictionary::from_json(r#"{ "alphabet": { "a": ".-", "n": ".-" } }"#).unwrap_err();
        assert!(matches!(err, CodecError::AmbiguousSymbol { .. }));
    }

    #[test]
    fn test_from_json_rejects_unencodable_word() {
        let err = Dictionary::from_json(r#"{ "alphabet": { "a": ".-" }, "words": ["ab"] }"#)
            .unwrap_err();
        assert!(err.to_string().contains("'b'"));
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let err = Dictionary::from_json(r#"{ "alphabet": { "a": ".-" }, "extra": 1 }"#)
            .unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        let err = Dictionary::from_json(r#"{ "alphabet": {} }"#).unwrap_err();
        assert!(matches!(err, CodecError::InvalidDictionary { .. }));
    }

    #[test]
    fn test_file_roundtrip() {
        let dict = Dictionary::standard();
        let json = serde_json::to_string(&dict.to_file()).unwrap();
        let parsed = Dictionary::from_json(&json).unwrap();
        assert_eq!(parsed.alphabet(), dict.alphabet());
        assert_eq!(parsed.words(), dict.words());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.json");
        std::fs::write(&path, r#"{ "alphabet": { "t": "-" }, "words": ["t"] }"#).unwrap();
        let dict = Dictionary::from_path(&path).unwrap();
        assert_eq!(dict.alphabet().character("-"), Some('t'));
    }
}
