//! Embedded dictionaries and clue lists
//!
//! Compiled into the binary at build time.

include!(concat!(env!("OUT_DIR"), "/dictionary5.rs"));
include!(concat!(env!("OUT_DIR"), "/dictionary6.rs"));
include!(concat!(env!("OUT_DIR"), "/dictionary7.rs"));
include!(concat!(env!("OUT_DIR"), "/clues5.rs"));
include!(concat!(env!("OUT_DIR"), "/clues6.rs"));
include!(concat!(env!("OUT_DIR"), "/clues7.rs"));

/// Embedded dictionary for a word length
#[must_use]
pub fn dictionary_words(length: usize) -> Option<&'static [&'static str]> {
    match length {
        5 => Some(DICTIONARY5),
        6 => Some(DICTIONARY6),
        7 => Some(DICTIONARY7),
        _ => None,
    }
}

/// Embedded `(word, clue)` pairs for a word length
#[must_use]
pub fn clue_entries(length: usize) -> Option<&'static [(&'static str, &'static str)]> {
    match length {
        5 => Some(CLUES5),
        6 => Some(CLUES6),
        7 => Some(CLUES7),
        _ => None,
    }
}
