//! Command syntax of the bot: `/start`, `/ask <question>`, everything else.

/// Welcome text for `/start`.
pub const WELCOME_MESSAGE: &str = "Welcome! I am the Investment Philosopher Bot.\n\n\
I have studied the works of Warren Buffett and Ray Dalio. \
Ask me an investment question, and I will provide you with a synthesized \
analysis from both of their perspectives.\n\n\
Example: /ask What is your opinion on diversification?";

/// Usage hint when `/ask` arrives without a question.
pub const ASK_USAGE: &str = "Please provide a question after the /ask command.\n\n\
Example: /ask What is market timing?";

/// Hint for any non-command text.
pub const NON_COMMAND_HINT: &str = "I only respond to the /ask command.\n\n\
Please format your question as: /ask [your question here]";

/// Parsed incoming text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    /// `/ask` with a non-empty question.
    Ask(String),
    /// `/ask` with nothing after it.
    AskEmpty,
    /// Anything that is not one of our commands.
    Other,
}

/// Parses one message text. Commands may carry the bot's username suffix
/// (`/ask@philobot ...`), which Telegram adds in group chats.
pub fn parse_command(text: &str) -> Command {
    let trimmed = text.trim();
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };
    let head = head.split('@').next().unwrap_or(head);

    match head {
        "/start" => Command::Start,
        "/ask" if rest.is_empty() => Command::AskEmpty,
        "/ask" => Command::Ask(rest.to_string()),
        _ => Command::Other,
    }
}
