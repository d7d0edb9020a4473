use std::collections::BTreeMap;

use serde::Deserialize;

use super::table::SLOTS;

/// Longest accepted romaji prefix.
const MAX_PREFIX_LEN: usize = 2;

#[derive(Deserialize)]
struct RomajiConfig {
    mappings: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("invalid prefix {0:?}: expected at most 2 lowercase ASCII letters")]
    InvalidPrefix(String),
    #[error("prefix {key:?} has {len} kana, expected 5")]
    WrongArity { key: String, len: usize },
    #[error("empty kana for prefix {0:?}")]
    EmptyValue(String),
}

/// Parse TOML text into a sorted `BTreeMap<prefix, [kana; 5]>`.
pub fn parse_romaji_toml(
    toml_str: &str,
) -> Result<BTreeMap<String, [String; SLOTS]>, RomajiConfigError> {
    let config: RomajiConfig =
        toml::from_str(toml_str).map_err(|e| RomajiConfigError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(RomajiConfigError::Empty);
    }

    let mut map = BTreeMap::new();
    for (key, values) in config.mappings {
        if key.len() > MAX_PREFIX_LEN || !key.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(RomajiConfigError::InvalidPrefix(key));
        }
        if values.iter().any(|v| v.is_empty()) {
            return Err(RomajiConfigError::EmptyValue(key));
        }
        let row: [String; SLOTS] = match values.try_into() {
            Ok(row) => row,
            Err(values) => {
                return Err(RomajiConfigError::WrongArity {
                    key,
                    len: values.len(),
                })
            }
        };
        map.insert(key, row);
    }

    Ok(map)
}
