//! Element visibility and scrolling.

use crate::env::{Rect, UiEnv};

/// Whether `rect` lies fully inside a `width` x `height` viewport.
pub fn rect_in_viewport(rect: Rect, (width, height): (f64, f64)) -> bool {
    rect.top >= 0.0 && rect.left >= 0.0 && rect.bottom <= height && rect.right <= width
}

/// Whether `el`'s bounding box is fully within the visible window.
pub fn is_in_viewport<E: UiEnv>(env: &E, el: &E::Element) -> bool {
    rect_in_viewport(env.bounding_rect(el), env.viewport_size())
}

/// Smoothly scroll `el` to the top of the viewport.
pub fn smooth_scroll<E: UiEnv>(env: &E, el: &E::Element) {
    env.scroll_into_view_smooth(el);
}

#[cfg(test)]
#[path = "viewport_test.rs"]
mod tests;
