//! Long-poll runner: parses each incoming message and drives the pipeline.
//! Answering is spawned per request so the poll loop is never blocked by the
//! seconds-to-tens-of-seconds provider latency of one question.

use crate::commands::{parse_command, Command, ASK_USAGE, NON_COMMAND_HINT, WELCOME_MESSAGE};
use crate::split::{split_message, TELEGRAM_MESSAGE_LIMIT};
use anyhow::Result;
use rag_pipeline::Pipeline;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info, instrument, warn};

/// Starts the teloxide REPL against the shared, already-built pipeline.
/// `thinking_message` is the interim acknowledgment sent before answering.
#[instrument(skip(bot, pipeline, thinking_message))]
pub async fn run_repl(
    bot: teloxide::Bot,
    pipeline: Arc<Pipeline>,
    thinking_message: String,
) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        info!(username = ?me.user.username, "bot identity confirmed before repl");
    }

    info!("Bot is polling for messages...");
    teloxide::repl(bot, move |bot: Bot, msg: teloxide::types::Message| {
        let pipeline = pipeline.clone();
        let thinking = thinking_message.clone();

        async move {
            let Some(text) = msg.text() else {
                return Ok(());
            };
            let session_id = msg
                .from
                .as_ref()
                .map(|u| u.id.0.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let username = msg.from.as_ref().and_then(|u| u.username.clone());
            let chat_id = msg.chat.id;

            match parse_command(text) {
                Command::Start => {
                    info!(session_id = %session_id, username = ?username, "user started chat");
                    send_or_log(&bot, chat_id, WELCOME_MESSAGE).await;
                }
                Command::AskEmpty => {
                    send_or_log(&bot, chat_id, ASK_USAGE).await;
                }
                Command::Other => {
                    info!(session_id = %session_id, "received non-command message");
                    send_or_log(&bot, chat_id, NON_COMMAND_HINT).await;
                }
                Command::Ask(question) => {
                    info!(
                        session_id = %session_id,
                        username = ?username,
                        question = %question,
                        "received question"
                    );
                    send_or_log(&bot, chat_id, &thinking).await;

                    tokio::spawn(async move {
                        match pipeline.answer(&question, &session_id).await {
                            Ok(answer) => deliver(&bot, chat_id, &answer).await,
                            Err(e) => {
                                error!(error = %e, session_id = %session_id, "answer failed");
                                send_or_log(
                                    &bot,
                                    chat_id,
                                    &format!(
                                        "An error occurred while processing your request: {}",
                                        e
                                    ),
                                )
                                .await;
                            }
                        }
                    });
                }
            }

            Ok(())
        }
    })
    .await;

    Ok(())
}

/// Delivers one answer, splitting it when it exceeds Telegram's limit.
async fn deliver(bot: &Bot, chat_id: ChatId, answer: &str) {
    let pieces = split_message(answer, TELEGRAM_MESSAGE_LIMIT);
    if pieces.len() > 1 {
        warn!(pieces = pieces.len(), "response is too long, splitting into multiple messages");
    }
    for piece in pieces {
        send_or_log(bot, chat_id, &piece).await;
    }
}

async fn send_or_log(bot: &Bot, chat_id: ChatId, text: &str) {
    if let Err(e) = bot.send_message(chat_id, text.to_string()).await {
        error!(error = %e, chat_id = chat_id.0, "failed to send message");
    }
}
