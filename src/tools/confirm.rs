//! Human confirmation port for destructive tools.

use std::io::{BufRead, Write};

/// Supplies a yes/no answer for a destructive operation.
///
/// Injected into the registry so the interactive prompt can be replaced by
/// a fixed policy in tests and non-interactive surfaces.
pub trait ConfirmationPolicy: Send + Sync {
    /// Ask for confirmation. Blocks until an answer is available.
    fn confirm(&self, target: &str) -> bool;
}

/// Interactive confirmation over the process's stdin/stdout.
///
/// Accepts case-insensitive `yes` or `y`; anything else, including empty
/// input or a closed stdin, is a refusal.
pub struct StdinConfirmation;

impl ConfirmationPolicy for StdinConfirmation {
    fn confirm(&self, target: &str) -> bool {
        println!("\nWARNING: You are about to delete: {}", target);
        print!("Are you sure you want to delete this file? (yes/no): ");
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_affirmative(&answer)
    }
}

/// Fixed policy that affirms every request. Used by the stdio tool surface,
/// where confirmation is the calling client's responsibility.
pub struct AlwaysConfirm;

impl ConfirmationPolicy for AlwaysConfirm {
    fn confirm(&self, _target: &str) -> bool {
        true
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}
