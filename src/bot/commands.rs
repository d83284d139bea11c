//! Command routing shared by the polling and webhook transports

use crate::localization::t;
use crate::responder::Responder;

/// Bot commands understood by MedGuide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    Unknown,
}

/// Parse a leading `/command`, ignoring a `@botname` suffix and any arguments
pub fn parse_command(text: &str) -> Option<BotCommand> {
    let first = text.trim_start().split_whitespace().next()?;
    let command = first.strip_prefix('/')?;
    let command = command.split('@').next().unwrap_or_default();

    Some(match command.to_lowercase().as_str() {
        "start" => BotCommand::Start,
        "help" => BotCommand::Help,
        _ => BotCommand::Unknown,
    })
}

/// Build the reply for one inbound text message
///
/// Commands get their fixed texts; everything else is treated as a medicine name.
pub fn reply_for_text(responder: &Responder, text: &str) -> String {
    match parse_command(text) {
        Some(BotCommand::Start) => t("welcome-message"),
        Some(BotCommand::Help) => t("help-message"),
        Some(BotCommand::Unknown) => t("unknown-command"),
        None => responder.respond(text),
    }
}
