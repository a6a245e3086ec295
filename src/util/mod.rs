//! Page helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each module wraps one browser capability. Helpers that touch the page
//! take a [`UiEnv`](crate::env::UiEnv); pure helpers (`format`, `validate`)
//! take plain values.

pub mod clipboard;
pub mod download;
pub mod format;
pub mod loading;
pub mod notify;
pub mod timing;
pub mod validate;
pub mod viewport;
pub mod widgets;
