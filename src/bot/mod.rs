//! Bot module for handling Telegram interactions
//!
//! Both transports are thin adapters over [`crate::responder::Responder`]:
//! - `commands`: maps inbound text (commands or medicine names) to a reply
//! - `reply_sink`: delivers a reply to a chat
//! - `message_handler`: long-polling dispatcher
//! - `webhook`: HTTP receiver for Telegram-pushed updates

pub mod commands;
pub mod message_handler;
pub mod reply_sink;
pub mod webhook;

// Re-export main entry points for use in main.rs
pub use commands::reply_for_text;
pub use message_handler::{message_handler, reply_to_message, run_polling};
pub use reply_sink::ReplySink;
