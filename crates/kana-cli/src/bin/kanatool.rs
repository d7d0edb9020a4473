use std::path::PathBuf;

use clap::{Parser, Subcommand};

use kana_cli::commands::{chat_ops, config_ops, convert_ops};
use kana_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "kanatool", about = "Romaji to hiragana chat converter")]
struct Cli {
    /// Write JSON trace logs to this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert romaji to hiragana (reads stdin lines if TEXT is omitted)
    Convert {
        /// Romaji text
        text: Option<String>,
        /// Convert word by word, leaving capitalized words as typed
        #[arg(long)]
        words: bool,
    },
    /// Rewrite a chat message as "<converted> (<original>)"
    Chat {
        /// Message as typed
        message: String,
        /// Settings TOML file (defaults to the embedded settings)
        #[arg(long)]
        settings: Option<String>,
        /// Skip the kanji lookup and use kana only
        #[arg(long)]
        offline: bool,
    },
    /// Print the embedded romaji table
    RomajiExport,
    /// Validate a romaji table TOML file
    RomajiValidate {
        /// Romaji table TOML file
        file: String,
    },
    /// Print the embedded default settings
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Settings TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_dir.as_deref());

    match cli.command {
        Command::Convert { text, words } => convert_ops::convert_cmd(text.as_deref(), words),
        Command::Chat {
            message,
            settings,
            offline,
        } => chat_ops::chat_cmd(&message, settings.as_deref(), offline),
        Command::RomajiExport => config_ops::romaji_export(),
        Command::RomajiValidate { file } => config_ops::romaji_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
