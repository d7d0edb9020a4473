//! Chat-side glue around the transliterator.
//!
//! [`ChatInterceptor`] rewrites outgoing chat messages into
//! `"<converted> (<original>)"`, optionally upgrading the kana through a
//! [`KanjiLookup`]. Lookup failures are logged and never block a message.

pub mod interceptor;
pub mod lookup;
pub mod settings;

#[cfg(test)]
mod testutil;

pub use interceptor::{ChatEvent, ChatInterceptor, Outcome};
pub use lookup::{GoogleTransliterate, KanjiLookup, LookupError};
pub use settings::{ChatSettings, SettingsError};
