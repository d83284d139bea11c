//! # MedGuide Telegram Bot
//!
//! A Telegram bot that looks up a medicine by name in a static dataset and
//! replies with its class, use, dosage and safety notes. Updates arrive either
//! by long polling or through an HTTP webhook; both paths share one responder.

pub mod bot;
pub mod config;
pub mod dataset;
pub mod dataset_errors;
pub mod localization;
pub mod responder;
