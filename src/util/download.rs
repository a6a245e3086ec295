//! Client-side file download from in-memory content.

use crate::config::UiConfig;
use crate::env::UiEnv;
use crate::error::UiError;

/// Offer `content` to the user as a file named `filename`.
///
/// The content is wrapped in a blob of type `mime`, a temporary anchor with
/// `href` and `download` set is clicked and detached, and the object URL is
/// revoked [`UiConfig::revoke_delay_ms`] later so the browser has started
/// the download by then. On failure the URL is revoked immediately.
pub fn trigger_file_download<E: UiEnv>(
    env: &E,
    config: &UiConfig,
    content: impl AsRef<[u8]>,
    filename: &str,
    mime: &str,
) -> Result<(), UiError> {
    let url = env.create_object_url(content.as_ref(), mime)?;
    if let Err(err) = click_anchor(env, &url, filename) {
        env.revoke_object_url(&url);
        return Err(err);
    }

    let timer_env = env.clone();
    env.schedule_detached(config.revoke_delay_ms, Box::new(move || timer_env.revoke_object_url(&url)));
    log::debug!("pagekit: download of {filename:?} ({mime}) started");
    Ok(())
}

fn click_anchor<E: UiEnv>(env: &E, url: &str, filename: &str) -> Result<(), UiError> {
    let anchor = env.create_element("a")?;
    env.set_attribute(&anchor, "href", url)?;
    env.set_attribute(&anchor, "download", filename)?;
    env.set_style(&anchor, "display", "none")?;
    let body = env.body()?;
    env.append_child(&body, &anchor)?;
    env.click(&anchor);
    env.remove(&anchor);
    Ok(())
}

#[cfg(test)]
#[path = "download_test.rs"]
mod tests;
