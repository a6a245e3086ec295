//! Page-ready widget setup: tooltips, popovers and progress bars.

use crate::config::UiConfig;
use crate::env::{UiEnv, WidgetKind};

/// What [`initialize_widgets`] touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetSummary {
    pub tooltips: usize,
    pub popovers: usize,
    pub progress_bars: usize,
}

/// Activate tooltips and popovers on flagged elements and size progress bars.
///
/// Activation reuses an element's existing instance, so running this again
/// is harmless. A progress bar is sized to `<data-width>%` only when the
/// attribute holds a finite number; others are left alone.
pub fn initialize_widgets<E: UiEnv>(env: &E, config: &UiConfig) -> WidgetSummary {
    let tooltips = activate_all(env, &config.tooltip_selector, WidgetKind::Tooltip);
    let popovers = activate_all(env, &config.popover_selector, WidgetKind::Popover);

    let mut progress_bars = 0;
    for bar in env.query_all(&config.progress_selector) {
        let Some(raw) = env.attribute(&bar, &config.progress_width_attr) else {
            continue;
        };
        let Some(width) = raw.trim().parse::<f64>().ok().filter(|w| w.is_finite()) else {
            log::warn!("pagekit: ignoring non-numeric {}={raw:?}", config.progress_width_attr);
            continue;
        };
        match env.set_style(&bar, "width", &format!("{width}%")) {
            Ok(()) => progress_bars += 1,
            Err(err) => log::warn!("pagekit: progress bar not sized: {err}"),
        }
    }

    let summary = WidgetSummary { tooltips, popovers, progress_bars };
    log::debug!("pagekit: widgets initialized: {summary:?}");
    summary
}

fn activate_all<E: UiEnv>(env: &E, selector: &str, kind: WidgetKind) -> usize {
    let mut activated = 0;
    for el in env.query_all(selector) {
        match env.activate_widget(&el, kind) {
            Ok(()) => activated += 1,
            Err(err) => log::warn!("pagekit: {kind:?} activation failed: {err}"),
        }
    }
    activated
}

/// Run [`initialize_widgets`] once the document is ready.
pub fn install<E: UiEnv>(env: &E, config: UiConfig) {
    let ready_env = env.clone();
    env.on_ready(Box::new(move || {
        initialize_widgets(&ready_env, &config);
    }));
}

#[cfg(test)]
#[path = "widgets_test.rs"]
mod tests;
