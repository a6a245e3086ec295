//! Transient, dismissible alert banners.
//!
//! A banner is inserted as the first child of its container and removed by a
//! timer after [`UiConfig::message_timeout_ms`]. The user may dismiss it
//! first through its close button; the timer then finds it detached and
//! does nothing.

use std::fmt;

use crate::config::UiConfig;
use crate::env::UiEnv;
use crate::error::UiError;

/// Banner severity, rendered as the `alert-<name>` class.
///
/// `Error` renders `alert-error`, which the stock stylesheet does not
/// define; `Danger` renders the styled `alert-danger`. Both are kept because
/// existing callers use both names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class list applied to a banner of `severity`.
pub fn banner_class(severity: Severity) -> String {
    format!("alert alert-{severity} alert-dismissible fade show")
}

/// Escape text for insertion into `innerHTML`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn banner_html(message: &str) -> String {
    format!(
        r#"{}<button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>"#,
        escape_html(message)
    )
}

/// Show `message` as a dismissible banner at the top of `container`, or of
/// the configured default container when `container` is `None`.
///
/// Returns the banner element. It is removed after the configured timeout
/// unless it has already been detached.
pub fn show_transient_message<E: UiEnv>(
    env: &E,
    config: &UiConfig,
    message: &str,
    severity: Severity,
    container: Option<&E::Element>,
) -> Result<E::Element, UiError> {
    let target = match container {
        Some(el) => el.clone(),
        None => env.query(&config.default_container_selector).ok_or_else(|| UiError::MissingContainer {
            selector: config.default_container_selector.clone(),
        })?,
    };

    let banner = env.create_element("div")?;
    env.set_class_name(&banner, &banner_class(severity));
    env.set_attribute(&banner, "role", "alert")?;
    env.set_inner_html(&banner, &banner_html(message));
    env.prepend_child(&target, &banner)?;

    let timer_env = env.clone();
    let timed = banner.clone();
    env.schedule_detached(
        config.message_timeout_ms,
        Box::new(move || {
            if timer_env.is_attached(&timed) {
                timer_env.remove(&timed);
            }
        }),
    );
    log::debug!("pagekit: {severity} banner shown for {}ms", config.message_timeout_ms);
    Ok(banner)
}

/// [`show_transient_message`] into the default container, logging instead of
/// failing when there is nowhere to put the banner.
pub(crate) fn notify<E: UiEnv>(env: &E, config: &UiConfig, message: &str, severity: Severity) {
    if let Err(err) = show_transient_message(env, config, message, severity, None) {
        log::warn!("pagekit: {severity} banner {message:?} not shown: {err}");
    }
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;
