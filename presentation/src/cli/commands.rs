//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for murmur
#[derive(Parser, Debug)]
#[command(name = "murmur")]
#[command(author, version, about = "Terminal chat client for a streaming answer service")]
#[command(long_about = r#"
Murmur opens a terminal chat view against a remote answer service and
streams the reply into the conversation as it is generated.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./murmur.toml       Project-level config
3. ~/.config/murmur/config.toml   Global config

Example:
  murmur
  murmur --endpoint https://bot.example.com/chat
  murmur --session-id support-42 -vv
"#)]
pub struct Cli {
    /// Answer service URL (overrides the config file)
    #[arg(short, long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Path to a config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignore all config files and use built-in defaults
    #[arg(long)]
    pub no_config: bool,

    /// Session identifier correlating this conversation with server-side
    /// context; generated per conversation when absent
    #[arg(short, long, value_name = "ID")]
    pub session_id: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
