//! # Telegram transport
//!
//! Long-poll front end for the pipeline: parses `/start` and `/ask`
//! commands, acknowledges with a thinking message, and delivers answers,
//! splitting anything over Telegram's single-message limit. The pipeline
//! itself knows nothing about Telegram.

mod commands;
mod runner;
mod split;

pub use commands::{parse_command, Command, ASK_USAGE, NON_COMMAND_HINT, WELCOME_MESSAGE};
pub use runner::run_repl;
pub use split::{split_message, TELEGRAM_MESSAGE_LIMIT};
