use std::path::Path;

use kana_chat::{ChatEvent, ChatInterceptor, ChatSettings, Outcome};

/// Run one message through the interceptor and print the result.
pub fn chat_cmd(message: &str, settings_file: Option<&str>, offline: bool) {
    let mut settings = match settings_file {
        Some(path) => die!(
            ChatSettings::load(Path::new(path)),
            "Error loading settings: {}"
        ),
        None => ChatSettings::default(),
    };
    if offline {
        settings.lookup.enabled = false;
    }

    let chat = ChatInterceptor::from_settings(settings);
    let mut event = ChatEvent::new(message);
    let outcome = chat.on_chat(&mut event);
    println!("{}", event.message);
    if outcome != Outcome::Converted {
        eprintln!("({outcome:?})");
    }
}
