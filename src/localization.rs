use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use log::{error, warn};
use std::collections::HashMap;
use std::sync::LazyLock;
use unic_langid::LanguageIdentifier;

/// Locale of the bundled message catalogue
pub const DEFAULT_LOCALE: &str = "en";

// The catalogue is compiled into the binary so the bot never starts without its texts
const MAIN_RESOURCE: &str = include_str!("../locales/en/main.ftl");

/// Localization manager for the MedGuide bot
pub struct LocalizationManager {
    bundle: FluentBundle<FluentResource>,
}

impl LocalizationManager {
    /// Create a new localization manager from the bundled catalogue
    pub fn new() -> Self {
        Self::from_source(MAIN_RESOURCE)
    }

    /// Create a localization manager from Fluent source text
    pub fn from_source(source: &str) -> Self {
        let locale: LanguageIdentifier = DEFAULT_LOCALE.parse().unwrap_or_default();
        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        // Telegram renders the bidi isolation marks literally
        bundle.set_use_isolating(false);

        let resource = match FluentResource::try_new(source.to_string()) {
            Ok(resource) => resource,
            Err((resource, errors)) => {
                warn!("Message catalogue parsed with {} errors", errors.len());
                resource
            }
        };
        if let Err(errors) = bundle.add_resource(resource) {
            error!("Failed to add message catalogue: {errors:?}");
        }

        Self { bundle }
    }

    /// Get a localized message
    pub fn get_message(&self, key: &str, args: Option<&HashMap<&str, &str>>) -> String {
        let msg = match self.bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut value = String::new();
        let mut errors = vec![];

        if let Some(args) = args {
            let fluent_args = FluentArgs::from_iter(
                args.iter().map(|(k, v)| (*k, FluentValue::from(*v))),
            );

            let _ = self
                .bundle
                .write_pattern(&mut value, pattern, Some(&fluent_args), &mut errors);
        } else {
            let _ = self
                .bundle
                .write_pattern(&mut value, pattern, None, &mut errors);
        }

        if !errors.is_empty() {
            warn!("Formatting message '{key}' reported errors: {errors:?}");
        }

        value
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message(key, Some(&args_map))
    }
}

impl Default for LocalizationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Global localization instance
static LOCALIZATION_MANAGER: LazyLock<LocalizationManager> =
    LazyLock::new(LocalizationManager::new);

/// Get the global localization manager
pub fn get_localization_manager() -> &'static LocalizationManager {
    &LOCALIZATION_MANAGER
}

/// Convenience function to get a localized message
pub fn t(key: &str) -> String {
    get_localization_manager().get_message(key, None)
}

/// Convenience function to get a localized message with arguments
pub fn t_args(key: &str, args: &[(&str, &str)]) -> String {
    get_localization_manager().get_message_with_args(key, args)
}
