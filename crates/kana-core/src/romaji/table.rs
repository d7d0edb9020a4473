use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::config::{parse_romaji_toml, RomajiConfigError};

pub(crate) const DEFAULT_TOML: &str = include_str!("default_romaji.toml");

/// Number of vowel slots per prefix.
pub const SLOTS: usize = 5;

/// Vowels in slot order.
pub const VOWELS: [char; SLOTS] = ['a', 'i', 'u', 'e', 'o'];

/// Moraic nasal.
pub const HATSUON: char = 'ん';
/// Small glide stop emitted for a doubled consonant.
pub const SOKUON: char = 'っ';
/// Long vowel mark.
pub const CHOONPU: char = 'ー';

/// Slot index of `c` if it is one of `a i u e o`.
pub fn vowel_slot(c: char) -> Option<usize> {
    VOWELS.iter().position(|&v| v == c)
}

/// Returns the embedded default table as TOML text.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

/// Immutable romaji prefix → kana mapping.
///
/// Lookups are exact string matches on the prefix; the empty prefix holds
/// the bare vowels.
#[derive(Debug, Clone)]
pub struct ConsonantTable {
    rows: BTreeMap<String, [String; SLOTS]>,
}

impl ConsonantTable {
    pub fn from_toml(toml_str: &str) -> Result<Self, RomajiConfigError> {
        Ok(Self {
            rows: parse_romaji_toml(toml_str)?,
        })
    }

    /// Get or initialize the global table built from the embedded default.
    pub fn global() -> &'static ConsonantTable {
        static INSTANCE: OnceLock<ConsonantTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            ConsonantTable::from_toml(DEFAULT_TOML).expect("default romaji TOML must be valid")
        })
    }

    pub fn get(&self, prefix: &str) -> Option<&[String; SLOTS]> {
        self.rows.get(prefix)
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.rows.contains_key(prefix)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String; SLOTS])> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v))
    }
}
