//! Remote kana → kanji lookup.

use tracing::debug;

use crate::settings::LookupSettings;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// A best-effort kana → kanji converter.
///
/// Failures mean "lookup unavailable"; callers fall back to the kana.
pub trait KanjiLookup: Send + Sync {
    fn to_kanji(&self, kana: &str) -> Result<String, LookupError>;
}

impl<F> KanjiLookup for F
where
    F: Fn(&str) -> Result<String, LookupError> + Send + Sync,
{
    fn to_kanji(&self, kana: &str) -> Result<String, LookupError> {
        self(kana)
    }
}

/// Google Input Tools transliteration endpoint.
///
/// `GET <endpoint>?langpair=ja-Hira|ja&text=<kana>`
pub struct GoogleTransliterate {
    agent: ureq::Agent,
    endpoint: String,
    langpair: String,
}

impl GoogleTransliterate {
    pub fn new(settings: &LookupSettings) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(settings.timeout()))
            .build()
            .into();
        Self {
            agent,
            endpoint: settings.endpoint.clone(),
            langpair: settings.langpair.clone(),
        }
    }
}

impl KanjiLookup for GoogleTransliterate {
    fn to_kanji(&self, kana: &str) -> Result<String, LookupError> {
        if kana.is_empty() {
            return Ok(String::new());
        }
        debug!(endpoint = %self.endpoint, kana_len = kana.len(), "kanji lookup");
        let body = self
            .agent
            .get(&self.endpoint)
            .query("langpair", &self.langpair)
            .query("text", kana)
            .call()
            .map_err(|e| LookupError::Http(format!("{}: {e}", self.endpoint)))?
            .into_body()
            .read_to_string()
            .map_err(|e| LookupError::Http(format!("{}: {e}", self.endpoint)))?;
        parse_transliterate_response(&body)
    }
}

/// Parse a transliteration response and join the top candidate of every
/// segment.
///
/// Shape: `[["reading", ["candidate", ...]], ...]`
pub fn parse_transliterate_response(json: &str) -> Result<String, LookupError> {
    let segments: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| LookupError::Parse(format!("response JSON: {e}")))?;

    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let Some(best) = segment[1][0].as_str() else {
            return Err(LookupError::Parse(format!(
                "segment {i} has no candidates: {segment}"
            )));
        };
        out.push_str(best);
    }
    Ok(out)
}
