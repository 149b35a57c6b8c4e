use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "philobot", about = "Investment Philosopher Telegram bot", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the knowledge pipeline and start polling Telegram.
    Run {
        /// Telegram bot token; overrides TELEGRAM_BOT_TOKEN from the environment.
        #[arg(long)]
        token: Option<String>,
    },
}
