//! ui::prompts
//!
//! Interactive prompts.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! anything that would need user input must come from the environment or
//! fail with a clear error message.

use std::io;

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Prompt for masked input (passwords, API tokens).
///
/// The prompt is written to the controlling terminal, never to stdout. The
/// input is not echoed. An empty answer counts as a cancelled prompt.
pub fn password(message: &str, interactive: bool) -> Result<String, PromptError> {
    password_with(message, interactive, |prompt| rpassword::prompt_password(prompt))
}

fn password_with<F>(message: &str, interactive: bool, read: F) -> Result<String, PromptError>
where
    F: FnOnce(&str) -> io::Result<String>,
{
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    let answer = read(&format!("{}: ", message)).map_err(|e| PromptError::IoError(e.to_string()))?;
    if answer.is_empty() {
        return Err(PromptError::Cancelled);
    }
    Ok(answer)
}
