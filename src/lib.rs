//! # pagekit
//!
//! Browser helpers for the scraper dashboard's pages: transient alert
//! banners, size and date formatting, URL checks, clipboard copy, client-side
//! downloads, debounce/throttle wrappers, viewport checks and button loading
//! state.
//!
//! Helpers take a [`UiEnv`](env::UiEnv) instead of touching page globals.
//! The `hydrate` feature provides [`env::browser::BrowserEnv`] and a
//! `wasm_bindgen(start)` entry point that installs console logging and
//! initializes tooltips, popovers and progress bars on page-ready. Native
//! builds run the same helpers against [`env::memory::MemoryEnv`].

pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod util;

pub use config::UiConfig;
pub use env::{Rect, UiEnv, WidgetKind};
pub use error::UiError;
pub use util::clipboard::copy_to_clipboard;
pub use util::download::trigger_file_download;
pub use util::format::{format_byte_count, format_date, format_date_time};
pub use util::loading::{Target, set_loading, store_original_text};
pub use util::notify::{Severity, show_transient_message};
pub use util::timing::{Debouncer, Throttler};
pub use util::validate::{check_scrape_request, validate_url};
pub use util::viewport::{is_in_viewport, smooth_scroll};
pub use util::widgets::{initialize_widgets, install};

/// Page entry point: logging, then widget setup on page-ready.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    let env = match env::browser::BrowserEnv::new() {
        Ok(env) => env,
        Err(err) => {
            logging::init(log::LevelFilter::Info);
            log::error!("pagekit: not started: {err}");
            return;
        }
    };
    let (config, config_err) = match env::browser::page_config(&env) {
        Ok(config) => (config, None),
        Err(err) => (UiConfig::default(), Some(err)),
    };
    logging::init(config.level_filter());
    if let Some(err) = config_err {
        log::warn!("pagekit: using default config: {err}");
    }
    install(&env, config);
}
