//! Clipboard copy with user feedback.

use super::notify::{Severity, notify};
use crate::config::UiConfig;
use crate::env::UiEnv;
use crate::error::UiError;

pub const MSG_COPIED: &str = "Copied to clipboard!";
pub const MSG_COPY_FAILED: &str = "Failed to copy to clipboard";

/// Write `text` to the system clipboard and show a banner with the outcome.
///
/// A rejected write is logged, shown as an error banner, and returned.
/// There is no retry.
pub async fn copy_to_clipboard<E: UiEnv>(env: &E, config: &UiConfig, text: &str) -> Result<(), UiError> {
    match env.write_clipboard(text).await {
        Ok(()) => {
            notify(env, config, MSG_COPIED, Severity::Success);
            Ok(())
        }
        Err(err) => {
            log::error!("pagekit: failed to copy: {err}");
            notify(env, config, MSG_COPY_FAILED, Severity::Error);
            Err(err)
        }
    }
}

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod tests;
