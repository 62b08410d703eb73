//! Welcome command for smellbook.
//!
//! Shows the onboarding notice, or records that it was dismissed.

use serde::{Deserialize, Serialize};

use crate::storage::{dismiss_welcome, welcome_dismissed, KeyValueStore};

/// Onboarding notice printed by `browse` until dismissed.
pub const WELCOME_TEXT: &str = "\
Welcome to smellbook, a field guide to code smells.

Browse the general catalog, the AWS Lambda anti-patterns, or the Session 1
workshop subset. Search narrows the list by name; pick a smell to see how to
spot it, a before/after example and the steps to fix it. Mark smells as
learned to track your progress.

Type 'help' in the browser for commands. Run 'smellbook welcome --dismiss'
to hide this notice.";

/// Options for the welcome command.
#[derive(Debug, Clone, Default)]
pub struct WelcomeOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Record the notice as dismissed.
    pub dismiss: bool,
}

/// Output format for the welcome command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeOutput {
    /// Whether the command succeeded.
    pub success: bool,
    /// Whether the notice is dismissed after this command.
    pub dismissed: bool,
    /// The notice text, when shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The welcome command implementation.
pub struct WelcomeCommand<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> WelcomeCommand<S> {
    /// Create a new welcome command.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the welcome command.
    pub fn run(&self, options: &WelcomeOptions) -> WelcomeOutput {
        if options.dismiss {
            dismiss_welcome(&self.store);
            return WelcomeOutput {
                success: true,
                dismissed: welcome_dismissed(&self.store),
                message: None,
                error: None,
            };
        }

        WelcomeOutput {
            success: true,
            dismissed: welcome_dismissed(&self.store),
            message: Some(WELCOME_TEXT.to_string()),
            error: None,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &WelcomeOutput, options: &WelcomeOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        match &output.message {
            Some(message) => format!("{}\n", message),
            None if output.dismissed => "Welcome notice dismissed.\n".to_string(),
            None => "Could not record the dismissal; the notice will show again.\n".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::tests::UnavailableStore;
    use crate::storage::{MemoryKeyValueStore, WELCOME_SEEN_KEY};
    use std::sync::Arc;

    #[test]
    fn test_welcome_shows_notice() {
        let cmd = WelcomeCommand::new(MemoryKeyValueStore::new());
        let output = cmd.run(&WelcomeOptions::default());

        assert!(output.success);
        assert!(!output.dismissed);
        assert!(cmd
            .format_output(&output, &WelcomeOptions::default())
            .starts_with("Welcome to smellbook"));
    }

    #[test]
    fn test_welcome_dismiss() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let cmd = WelcomeCommand::new(Arc::clone(&store));
        let options = WelcomeOptions {
            dismiss: true,
            ..Default::default()
        };

        let output = cmd.run(&options);

        assert!(output.dismissed);
        assert_eq!(store.get(WELCOME_SEEN_KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(
            cmd.format_output(&output, &options),
            "Welcome notice dismissed.\n"
        );

        let shown = cmd.run(&WelcomeOptions::default());
        assert!(shown.dismissed);
    }

    #[test]
    fn test_welcome_dismiss_with_broken_store() {
        let cmd = WelcomeCommand::new(UnavailableStore);
        let options = WelcomeOptions {
            dismiss: true,
            ..Default::default()
        };

        let output = cmd.run(&options);

        assert!(output.success);
        assert!(!output.dismissed);
        assert!(cmd
            .format_output(&output, &options)
            .starts_with("Could not record"));
    }
}
