use std::fs;

pub fn romaji_export() {
    print!("{}", kana_core::romaji::default_toml());
}

pub fn romaji_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(kana_core::romaji::parse_romaji_toml(&content), "Error: {}");
    println!("OK: {} prefixes", map.len());
}

pub fn settings_export() {
    print!("{}", kana_chat::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        kana_chat::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: conversion.mode={:?}, lookup.enabled={}, lookup.timeout_ms={}",
        s.conversion.mode, s.lookup.enabled, s.lookup.timeout_ms
    );
}
