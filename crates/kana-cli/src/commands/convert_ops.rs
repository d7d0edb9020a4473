use std::io::{self, BufRead, Write};

use kana_core::ConversionMode;

fn mode(words: bool) -> ConversionMode {
    if words {
        ConversionMode::Words
    } else {
        ConversionMode::Whole
    }
}

/// Convert `text`, or every line of stdin when no text is given.
pub fn convert_cmd(text: Option<&str>, words: bool) {
    let mode = mode(words);
    if let Some(text) = text {
        println!("{}", mode.apply(text));
        return;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = die!(line, "Error reading stdin: {}");
        die!(writeln!(out, "{}", mode.apply(&line)), "Error writing output: {}");
    }
}
