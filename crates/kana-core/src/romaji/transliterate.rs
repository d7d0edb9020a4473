use tracing::debug_span;

use super::table::{vowel_slot, ConsonantTable, CHOONPU, HATSUON, SOKUON};

/// The rule applied to a single input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `n` after a pending `n`: emitted ん.
    Nasal,
    /// Pending prefix repeated by the same letter: emitted っ and re-seeded.
    Geminate,
    /// Vowel completed a known prefix into kana.
    Resolved,
    /// Vowel after an unknown prefix: prefix flushed verbatim, vowel discarded.
    VowelDropped,
    /// Pending `n` followed by something other than a vowel or `y`: emitted ん.
    NasalBreak,
    /// `-`: pending flushed, emitted ー.
    LongVowel,
    /// Lowercase letter appended to the pending prefix.
    Buffered,
    /// Any other character: pending flushed, character copied through.
    PassThrough,
}

/// Single-pass romaji → hiragana state machine.
///
/// State is the unresolved lowercase prefix (`pending`) and the text
/// emitted so far (`out`). Each [`feed`](Self::feed) applies exactly one
/// transition; [`finish`](Self::finish) flushes whatever is still pending.
#[derive(Debug, Clone)]
pub struct Transliterator<'t> {
    table: &'t ConsonantTable,
    pending: String,
    out: String,
}

impl Transliterator<'static> {
    pub fn new() -> Self {
        Self::with_table(ConsonantTable::global())
    }
}

impl Default for Transliterator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> Transliterator<'t> {
    pub fn with_table(table: &'t ConsonantTable) -> Self {
        Self {
            table,
            pending: String::new(),
            out: String::new(),
        }
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    /// Advance the machine by one character. Rules are tried in order and
    /// the first match wins.
    pub fn feed(&mut self, c: char) -> Step {
        if c == 'n' && self.pending == "n" {
            self.out.push(HATSUON);
            self.pending.clear();
            return Step::Nasal;
        }

        if self.table.contains(&self.pending) && is_single(&self.pending, c) {
            self.out.push(SOKUON);
            self.pending.clear();
            self.pending.push(c);
            return Step::Geminate;
        }

        if let Some(slot) = vowel_slot(c) {
            return match self.table.get(&self.pending) {
                Some(row) => {
                    self.out.push_str(&row[slot]);
                    self.pending.clear();
                    Step::Resolved
                }
                None => {
                    self.flush();
                    Step::VowelDropped
                }
            };
        }

        // c is not a vowel here; "ny" still has to reach the y-row.
        if c != 'y' && self.pending == "n" {
            self.out.push(HATSUON);
            self.pending.clear();
            if c.is_ascii_lowercase() {
                self.pending.push(c);
            } else {
                self.out.push(c);
            }
            return Step::NasalBreak;
        }

        if c == '-' {
            self.flush();
            self.out.push(CHOONPU);
            return Step::LongVowel;
        }

        if c.is_ascii_lowercase() {
            self.pending.push(c);
            Step::Buffered
        } else {
            self.flush();
            self.out.push(c);
            Step::PassThrough
        }
    }

    /// Flush unresolved letters verbatim and return the converted text.
    pub fn finish(mut self) -> String {
        self.flush();
        self.out
    }

    fn flush(&mut self) {
        self.out.push_str(&self.pending);
        self.pending.clear();
    }
}

fn is_single(s: &str, c: char) -> bool {
    let mut chars = s.chars();
    chars.next() == Some(c) && chars.next().is_none()
}

/// Convert romaji to hiragana in one pass over `input`.
///
/// Total: characters that cannot be converted are copied through, and
/// trailing unresolved consonants are emitted as typed.
pub fn convert(input: &str) -> String {
    let _span = debug_span!("convert", len = input.len()).entered();
    let mut t = Transliterator::new();
    for c in input.chars() {
        t.feed(c);
    }
    t.finish()
}

/// Convert a single whitespace-delimited word.
///
/// Control characters and ASCII spaces are trimmed first; other Unicode
/// whitespace such as the ideographic space is kept. Words starting with an
/// uppercase letter are returned as-is, and a trailing `n` left in the
/// result becomes ん.
pub fn convert_token(token: &str) -> String {
    let token = token.trim_matches(|c: char| c <= ' ');
    match token.chars().next() {
        None => return String::new(),
        Some(first) if first.is_uppercase() => return token.to_string(),
        Some(_) => {}
    }

    let mut converted = convert(token);
    if converted.ends_with('n') {
        converted.pop();
        converted.push(HATSUON);
    }
    converted
}

/// Convert each space-separated word with [`convert_token`].
pub fn convert_words(text: &str) -> String {
    text.split(' ')
        .map(convert_token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// How a whole message is fed to the transliterator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// One scan over the entire text.
    #[default]
    Whole,
    /// Word by word; capitalized words are left alone.
    Words,
}

impl ConversionMode {
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Whole => convert(text),
            Self::Words => convert_words(text),
        }
    }
}
