//! Button loading state.
//!
//! A button entering the loading state is disabled and shows a spinner. On
//! leaving it is re-enabled and its content is restored from the attribute
//! written by [`store_original_text`], which must run first.

use crate::config::UiConfig;
use crate::env::UiEnv;
use crate::error::UiError;

const SPINNER_HTML: &str = r#"<span class="spinner-border spinner-border-sm me-2" role="status" aria-hidden="true"></span>"#;

/// The element to toggle, given directly or by selector.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a, T> {
    Element(&'a T),
    Selector(&'a str),
}

impl<T: Clone> Target<'_, T> {
    fn resolve<E: UiEnv<Element = T>>(self, env: &E) -> Result<T, UiError> {
        match self {
            Self::Element(el) => Ok(el.clone()),
            Self::Selector(selector) => {
                env.query(selector).ok_or_else(|| UiError::ElementNotFound { selector: selector.to_owned() })
            }
        }
    }
}

/// Enter or leave the loading state.
///
/// Leaving restores the stored content, or the configured fallback label if
/// nothing was stored.
pub fn set_loading<E: UiEnv>(
    env: &E,
    config: &UiConfig,
    target: Target<'_, E::Element>,
    loading: bool,
) -> Result<(), UiError> {
    let el = target.resolve(env)?;
    if loading {
        env.set_attribute(&el, "disabled", "")?;
        env.set_inner_html(&el, &format!("{SPINNER_HTML}{}", config.loading_label));
    } else {
        env.remove_attribute(&el, "disabled");
        let original = env
            .attribute(&el, &config.original_text_attr)
            .unwrap_or_else(|| config.loading_fallback_label.clone());
        env.set_inner_html(&el, &original);
    }
    Ok(())
}

/// Record each element's current content for later restoration.
pub fn store_original_text<'a, E: UiEnv>(
    env: &E,
    config: &UiConfig,
    elements: impl IntoIterator<Item = &'a E::Element>,
) -> Result<(), UiError> {
    for el in elements {
        let html = env.inner_html(el);
        env.set_attribute(el, &config.original_text_attr, &html)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "loading_test.rs"]
mod tests;
