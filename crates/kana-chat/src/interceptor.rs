use tracing::{debug_span, warn};

use crate::lookup::{GoogleTransliterate, KanjiLookup, LookupError};
use crate::settings::ChatSettings;

/// An outgoing chat message that may be rewritten in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub message: String,
}

impl ChatEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// What [`ChatInterceptor::on_chat`] did to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Rewritten with the converted text (kanji if a lookup is configured).
    Converted,
    /// Lookup failed; rewritten with the kana-only conversion.
    KanaFallback,
    /// Left as typed: the lookup failed, or the message was blank.
    Unchanged,
}

/// Rewrites outgoing chat messages as `"<converted> (<original>)"`.
///
/// Constructed once by the host and handed to its event dispatch; shareable
/// across threads behind an `Arc`.
pub struct ChatInterceptor {
    settings: ChatSettings,
    lookup: Option<Box<dyn KanjiLookup>>,
}

impl ChatInterceptor {
    pub fn new(settings: ChatSettings, lookup: Option<Box<dyn KanjiLookup>>) -> Self {
        Self { settings, lookup }
    }

    /// Build with a [`GoogleTransliterate`] lookup if `lookup.enabled`.
    pub fn from_settings(settings: ChatSettings) -> Self {
        let lookup: Option<Box<dyn KanjiLookup>> = if settings.lookup.enabled {
            Some(Box::new(GoogleTransliterate::new(&settings.lookup)))
        } else {
            None
        };
        Self::new(settings, lookup)
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Kana conversion of `original` using the configured mode.
    pub fn kana(&self, original: &str) -> String {
        self.settings.conversion.mode.apply(original)
    }

    /// Convert and render `original`, propagating lookup failures.
    pub fn annotate(&self, original: &str) -> Result<String, LookupError> {
        let converted = self.upgrade(self.kana(original))?;
        Ok(self.render(&converted, original))
    }

    /// Rewrite `event.message`. Lookup failures are logged and never
    /// propagate; blank messages are left alone.
    pub fn on_chat(&self, event: &mut ChatEvent) -> Outcome {
        let _span = debug_span!("on_chat", len = event.message.len()).entered();
        if event.message.trim().is_empty() {
            return Outcome::Unchanged;
        }

        let kana = self.kana(&event.message);
        match self.upgrade(kana.clone()) {
            Ok(converted) => {
                event.message = self.render(&converted, &event.message);
                Outcome::Converted
            }
            Err(e) => {
                warn!(error = %e, "failed to convert message to kanji");
                if self.settings.message.kana_on_failure {
                    event.message = self.render(&kana, &event.message);
                    Outcome::KanaFallback
                } else {
                    Outcome::Unchanged
                }
            }
        }
    }

    fn upgrade(&self, kana: String) -> Result<String, LookupError> {
        match &self.lookup {
            Some(lookup) => lookup.to_kanji(&kana),
            None => Ok(kana),
        }
    }

    fn render(&self, converted: &str, original: &str) -> String {
        render_template(&self.settings.message.template, converted, original)
    }
}

/// Substitute `{converted}` and `{original}` in one pass, so placeholder
/// text inside either value is not expanded again.
fn render_template(template: &str, converted: &str, original: &str) -> String {
    let mut out = String::with_capacity(template.len() + converted.len() + original.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{converted}") {
            out.push_str(converted);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{original}") {
            out.push_str(original);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use kana_core::ConversionMode;

    use super::*;
    use crate::testutil::{closed_port, lookup_settings, serve_once};

    fn offline() -> ChatSettings {
        let mut s = ChatSettings::default();
        s.lookup.enabled = false;
        s
    }

    fn failing(_: &str) -> Result<String, LookupError> {
        Err(LookupError::Http("connection refused".into()))
    }

    #[test]
    fn kana_only_without_lookup() {
        let chat = ChatInterceptor::new(offline(), None);
        let mut event = ChatEvent::new("konnnichiha");
        assert_eq!(chat.on_chat(&mut event), Outcome::Converted);
        assert_eq!(event.message, "こんにちは (konnnichiha)");
    }

    #[test]
    fn lookup_result_is_used() {
        let lookup = |kana: &str| {
            assert_eq!(kana, "にほんご");
            Ok::<_, LookupError>("日本語".to_string())
        };
        let chat = ChatInterceptor::new(offline(), Some(Box::new(lookup)));
        let mut event = ChatEvent::new("nihongo");
        assert_eq!(chat.on_chat(&mut event), Outcome::Converted);
        assert_eq!(event.message, "日本語 (nihongo)");
    }

    #[test]
    fn lookup_failure_leaves_message() {
        let chat = ChatInterceptor::new(offline(), Some(Box::new(failing)));
        let mut event = ChatEvent::new("nihongo");
        assert_eq!(chat.on_chat(&mut event), Outcome::Unchanged);
        assert_eq!(event.message, "nihongo");
    }

    #[test]
    fn lookup_failure_falls_back_to_kana() {
        let mut settings = offline();
        settings.message.kana_on_failure = true;
        let chat = ChatInterceptor::new(settings, Some(Box::new(failing)));
        let mut event = ChatEvent::new("nihongo");
        assert_eq!(chat.on_chat(&mut event), Outcome::KanaFallback);
        assert_eq!(event.message, "にほんご (nihongo)");
    }

    #[test]
    fn annotate_propagates_failure() {
        let chat = ChatInterceptor::new(offline(), Some(Box::new(failing)));
        assert!(matches!(chat.annotate("ka"), Err(LookupError::Http(_))));
    }

    #[test]
    fn remote_lookup_success() {
        let (addr, server) = serve_once(r#"[["にほんご",["日本語"]]]"#);
        let mut settings = ChatSettings::default();
        settings.lookup = lookup_settings(addr, 2000);
        let chat = ChatInterceptor::from_settings(settings);
        let mut event = ChatEvent::new("nihongo");
        assert_eq!(chat.on_chat(&mut event), Outcome::Converted);
        assert_eq!(event.message, "日本語 (nihongo)");
        server.join().unwrap();
    }

    #[test]
    fn refused_endpoint_leaves_message() {
        let mut settings = ChatSettings::default();
        settings.lookup = lookup_settings(closed_port(), 500);
        let chat = ChatInterceptor::from_settings(settings);
        let mut event = ChatEvent::new("nihongo");
        assert_eq!(chat.on_chat(&mut event), Outcome::Unchanged);
        assert_eq!(event.message, "nihongo");
    }

    #[test]
    fn silent_endpoint_times_out() {
        // Bound but never accepted: the request is sent and no reply comes.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut settings = ChatSettings::default();
        settings.lookup = lookup_settings(listener.local_addr().unwrap(), 200);
        settings.message.kana_on_failure = true;
        let chat = ChatInterceptor::from_settings(settings);

        let started = Instant::now();
        let mut event = ChatEvent::new("nihongo");
        assert_eq!(chat.on_chat(&mut event), Outcome::KanaFallback);
        assert_eq!(event.message, "にほんご (nihongo)");
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }

    #[test]
    fn blank_message_untouched() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lookup = move |kana: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, LookupError>(kana.to_string())
        };
        let chat = ChatInterceptor::new(offline(), Some(Box::new(lookup)));
        let mut event = ChatEvent::new("   ");
        assert_eq!(chat.on_chat(&mut event), Outcome::Unchanged);
        assert_eq!(event.message, "   ");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn words_mode_keeps_capitalized_words() {
        let mut settings = offline();
        settings.conversion.mode = ConversionMode::Words;
        let chat = ChatInterceptor::new(settings, None);
        let mut event = ChatEvent::new("Tokyo ni sunden");
        chat.on_chat(&mut event);
        assert_eq!(event.message, "Tokyo に すんでん (Tokyo ni sunden)");
    }

    #[test]
    fn custom_template() {
        let mut settings = offline();
        settings.message.template = "{original} -> {converted}".into();
        let chat = ChatInterceptor::new(settings, None);
        assert_eq!(chat.annotate("ka").unwrap(), "ka -> か");
    }

    #[test]
    fn from_settings_respects_enabled() {
        let chat = ChatInterceptor::from_settings(offline());
        assert!(chat.lookup.is_none());
        let chat = ChatInterceptor::from_settings(ChatSettings::default());
        assert!(chat.lookup.is_some());
    }

    #[test]
    fn shared_across_threads() {
        let chat = Arc::new(ChatInterceptor::new(offline(), None));
        let handles: Vec<_> = ["ka", "kka", "nka"]
            .into_iter()
            .map(|msg| {
                let chat = Arc::clone(&chat);
                std::thread::spawn(move || {
                    let mut event = ChatEvent::new(msg);
                    chat.on_chat(&mut event);
                    event.message
                })
            })
            .collect();
        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, ["か (ka)", "っか (kka)", "んか (nka)"]);
    }

    #[test]
    fn render_does_not_expand_inside_values() {
        assert_eq!(
            render_template("{converted} ({original})", "{original}", "x"),
            "{original} (x)"
        );
        assert_eq!(render_template("{a} {converted}", "か", "ka"), "{a} か");
    }
}
