//! Morse symbol tables.
//!
//! A [`SymbolTable`] is an immutable bijection between single characters and
//! Morse symbols made of `.` and `-`. The reverse table is built by inverting
//! the forward one, and construction fails on any collision so reverse lookup
//! is never ambiguous.

use std::collections::{BTreeMap, HashMap};

use crate::error::{CodecError, CodecResult};

/// The dot glyph.
pub const DOT: char = '.';

/// The dash glyph.
pub const DASH: char = '-';

/// International (ITU) Morse alphabet: letters, digits and the ITU
/// punctuation set. There is no `!`, `;` or `_` in the ITU alphabet.
pub const ITU_ALPHABET: &[(char, &str)] = &[
    ('a', ".-"),
    ('b', "-..."),
    ('c', "-.-."),
    ('d', "-.."),
    ('e', "."),
    ('f', "..-."),
    ('g', "--."),
    ('h', "...."),
    ('i', ".."),
    ('j', ".---"),
    ('k', "-.-"),
    ('l', ".-.."),
    ('m', "--"),
    ('n', "-."),
    ('o', "---"),
    ('p', ".--."),
    ('q', "--.-"),
    ('r', ".-."),
    ('s', "..."),
    ('t', "-"),
    ('u', "..-"),
    ('v', "...-"),
    ('w', ".--"),
    ('x', "-..-"),
    ('y', "-.--"),
    ('z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('\'', ".----."),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    (':', "---..."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('"', ".-..-."),
    ('@', ".--.-."),
];

/// Folds a character to the case stored in symbol tables.
///
/// Morse has no case, so tables store lowercase keys. Characters whose
/// lowercase form is more than one character are left untouched.
pub fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

/// Returns true if `symbol` is a non-empty run of dots and dashes.
pub fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty() && symbol.chars().all(|c| c == DOT || c == DASH)
}

/// Immutable bidirectional character/symbol mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    forward: BTreeMap<char, String>,
    reverse: HashMap<String, char>,
}

impl SymbolTable {
    /// Builds the standard ITU table.
    pub fn itu() -> Self {
        Self::from_pairs(ITU_ALPHABET.iter().copied())
            .expect("ITU alphabet should be a valid bijection")
    }

    /// Builds a table from `(character, symbol)` pairs.
    ///
    /// Keys are case-folded. Fails fast if two characters fold to the same
    /// key, if two characters share a symbol, or if a symbol is malformed.
    pub fn from_pairs<I, S>(pairs: I) -> CodecResult<Self>
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        let mut forward = BTreeMap::new();
        let mut reverse = HashMap::new();

        for (character, symbol) in pairs {
            let character = fold_case(character);
            let symbol = symbol.into();

            if character.is_whitespace() {
                return Err(CodecError::invalid_dictionary(
                    "whitespace cannot be assigned a Morse symbol",
                ));
            }
            if !is_valid_symbol(&symbol) {
                return Err(CodecError::InvalidSymbol { character, symbol });
            }
            if forward.contains_key(&character) {
                return Err(CodecError::DuplicateCharacter { character });
            }
            if let Some(&first) = reverse.get(&symbol) {
                return Err(CodecError::AmbiguousSymbol {
                    symbol,
                    first,
                    second: character,
                });
            }

            reverse.insert(symbol.clone(), character);
            forward.insert(character, symbol);
        }

        Ok(Self { forward, reverse })
    }

    /// Looks up the Morse symbol for a character (case-insensitive).
    pub fn symbol(&self, character: char) -> Option<&str> {
        self.forward.get(&fold_case(character)).map(String::as_str)
    }

    /// Looks up the character for a Morse symbol.
    pub fn character(&self, symbol: &str) -> Option<char> {
        self.reverse.get(symbol).copied()
    }

    /// Returns true if the character (case-insensitive) has a symbol.
    pub fn contains(&self, character: char) -> bool {
        self.forward.contains_key(&fold_case(character))
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterates entries in character order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.forward.iter().map(|(c, s)| (*c, s.as_str()))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::itu()
    }
}
