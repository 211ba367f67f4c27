//! Terminal implementations of the controller's side channels.

use std::sync::atomic::{AtomicUsize, Ordering};

use owo_colors::OwoColorize;
use tracing::warn;

use crate::controller::{Confirm, Notification, Notifier};

/// Prints successes to stdout and errors to stderr, counting the errors.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    errors: AtomicUsize,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of error notifications printed so far.
    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification {
            Notification::Success(message) => println!("{} {message}", "✓".green().bold()),
            Notification::Error(message) => {
                self.errors.fetch_add(1, Ordering::SeqCst);
                eprintln!("{} {}", "✗".red().bold(), message.red());
            }
        }
    }
}

/// Interactive yes/no prompt, defaulting to no.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or_else(|error| {
                warn!(%error, "Confirmation prompt failed, treating as no");
                false
            })
    }
}
