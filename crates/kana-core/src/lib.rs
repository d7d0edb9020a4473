//! Romaji-to-hiragana transliteration.
//!
//! The only entry point most callers need is [`romaji::convert`].

pub mod romaji;

pub use romaji::{convert, convert_token, convert_words, ConversionMode};
