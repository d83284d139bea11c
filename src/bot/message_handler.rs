//! Message Handler module for the long-polling transport

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, error, info};

use crate::responder::Responder;

use super::commands::reply_for_text;
use super::reply_sink::ReplySink;

/// Answer one inbound message from the dispatcher
pub async fn message_handler(bot: Bot, msg: Message, responder: Arc<Responder>) -> Result<()> {
    reply_to_message(&bot, msg.chat.id, msg.text(), &responder).await
}

/// Reply to a message with the given text, if it has any
///
/// Messages without text (photos, stickers, members joining a group) get no
/// reply. Delivery failures are logged and swallowed so a single bad chat never
/// stops the dispatcher.
pub async fn reply_to_message<S>(
    sink: &S,
    chat_id: ChatId,
    text: Option<&str>,
    responder: &Responder,
) -> Result<()>
where
    S: ReplySink + ?Sized,
{
    let Some(text) = text else {
        debug!(user_id = %chat_id, "Ignoring message without text");
        return Ok(());
    };
    debug!(user_id = %chat_id, message_length = text.len(), "Received message from user");

    let reply = reply_for_text(responder, text);

    if let Err(e) = sink.send_reply(chat_id, reply).await {
        error!(user_id = %chat_id, error = %e, "Failed to send reply");
    }

    Ok(())
}

/// Run the long-polling dispatcher until ctrl-c
pub async fn run_polling(bot: Bot, responder: Arc<Responder>) {
    info!("Starting long-polling dispatcher");

    let handler = dptree::entry().branch(Update::filter_message().endpoint({
        let responder = Arc::clone(&responder);
        move |bot: Bot, msg: Message| {
            let responder = Arc::clone(&responder);
            async move { message_handler(bot, msg, responder).await }
        }
    }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
}
