//! Romaji-to-hiragana conversion.
//!
//! A fixed table maps consonant prefixes to their five vowel forms, and a
//! character-at-a-time state machine handles sokuon (っ), hatsuon (ん), the
//! long vowel mark (ー) and passthrough of everything else.

mod config;
mod table;
mod transliterate;


pub use config::{parse_romaji_toml, RomajiConfigError};
pub use table::{
    default_toml, vowel_slot, ConsonantTable, CHOONPU, HATSUON, SLOTS, SOKUON, VOWELS,
};
pub use transliterate::{
    convert, convert_token, convert_words, ConversionMode, Step, Transliterator,
};
