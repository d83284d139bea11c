//! # Localization Tests
//!
//! This module contains unit tests for the localization functionality,
//! testing message retrieval and formatting with various edge cases.

use medguide::localization::LocalizationManager;
use std::collections::HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_localization() -> LocalizationManager {
        LocalizationManager::new()
    }

    #[test]
    fn test_get_message_existing_key() {
        let manager = setup_localization();

        let message = manager.get_message("help-message", None);
        assert!(message.contains("How to use MedGuide"));
    }

    #[test]
    fn test_get_message_nonexistent_key() {
        let manager = setup_localization();

        let message = manager.get_message("nonexistent-key", None);
        assert_eq!(message, "Missing translation: nonexistent-key");
    }

    #[test]
    fn test_all_bot_messages_present() {
        let manager = setup_localization();

        for key in [
            "welcome-message",
            "help-message",
            "empty-query",
            "medicine-not-found",
            "unknown-command",
            "medicine-card",
        ] {
            let message = manager.get_message(key, None);
            assert!(!message.starts_with("Missing"), "{key} is not in the catalogue");
        }
    }

    /// Arguments are inserted verbatim, without bidi isolation marks
    #[test]
    fn test_get_message_with_args() {
        let manager = setup_localization();

        let mut args = HashMap::new();
        for key in ["name", "class", "indication", "dosage", "caution", "advice"] {
            args.insert(key, "value");
        }
        args.insert("name", "Paracetamol");

        let message = manager.get_message("medicine-card", Some(&args));
        assert!(message.starts_with("💊 <b>Paracetamol</b>\n"));
        assert!(!message.contains('\u{2068}'));
        assert!(!message.contains('\u{2069}'));
    }

    #[test]
    fn test_message_from_custom_source() {
        let manager = LocalizationManager::from_source("greeting = Hello { $who }!\n");

        let message = manager.get_message_with_args("greeting", &[("who", "pharmacist")]);
        assert_eq!(message, "Hello pharmacist!");
    }

    #[test]
    fn test_convenience_functions() {
        let message = medguide::localization::t("empty-query");
        assert_eq!(message, "Please send a medicine name (text).");

        let args = vec![("name", "X"), ("class", "Y")];
        let card = medguide::localization::t_args("medicine-card", &args);
        assert!(card.contains("<b>Class:</b> Y"));
    }
}
