//! The page environment the helpers run against.
//!
//! SYSTEM CONTEXT
//! ==============
//! Helpers never reach for `window`/`document` globals. They take a
//! [`UiEnv`], which the page satisfies with [`browser::BrowserEnv`]
//! (`hydrate` builds) and headless callers satisfy with
//! [`memory::MemoryEnv`].
//!
//! TIMERS
//! ======
//! [`UiEnv::schedule`] returns a handle; dropping it cancels the callback if
//! it has not fired. [`UiEnv::schedule_detached`] is fire-and-forget.

#[cfg(feature = "hydrate")]
pub mod browser;
pub mod memory;

use futures::future::LocalBoxFuture;

use crate::error::UiError;

/// Viewport-relative bounding box of an element, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self { top, left, bottom, right }
    }
}

/// Third-party widget behaviors activated on page-ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Tooltip,
    Popover,
}

/// Capabilities of a page document and its window.
///
/// Element handles are cheap clones referring to the same node.
pub trait UiEnv: Clone + 'static {
    type Element: Clone + 'static;
    /// Pending timer; dropping it cancels the callback.
    type Timer: 'static;

    /// First attached element matching `selector`, in document order.
    fn query(&self, selector: &str) -> Option<Self::Element>;
    /// All attached elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn body(&self) -> Result<Self::Element, UiError>;
    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Result<Self::Element, UiError>;

    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, el: &Self::Element, name: &str, value: &str) -> Result<(), UiError>;
    fn remove_attribute(&self, el: &Self::Element, name: &str);
    fn set_class_name(&self, el: &Self::Element, class_name: &str);
    fn inner_html(&self, el: &Self::Element) -> String;
    fn set_inner_html(&self, el: &Self::Element, html: &str);
    fn set_style(&self, el: &Self::Element, property: &str, value: &str) -> Result<(), UiError>;

    /// Insert `child` before the first child of `parent`.
    fn prepend_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), UiError>;
    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), UiError>;
    /// Detach `el` from its parent. No-op when already detached.
    fn remove(&self, el: &Self::Element);
    /// Whether `el` currently has a parent node.
    fn is_attached(&self, el: &Self::Element) -> bool;
    fn click(&self, el: &Self::Element);

    /// Attach a tooltip/popover instance, reusing an existing one.
    fn activate_widget(&self, el: &Self::Element, kind: WidgetKind) -> Result<(), UiError>;

    fn bounding_rect(&self, el: &Self::Element) -> Rect;
    /// Visible window `(width, height)`.
    fn viewport_size(&self) -> (f64, f64);
    fn scroll_into_view_smooth(&self, el: &Self::Element);

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Timer;
    fn schedule_detached(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
    /// Run `callback` once the document has finished parsing.
    fn on_ready(&self, callback: Box<dyn FnOnce()>);

    fn write_clipboard(&self, text: &str) -> LocalBoxFuture<'static, Result<(), UiError>>;

    /// Wrap `bytes` in a blob of type `mime` and return an object URL for it.
    fn create_object_url(&self, bytes: &[u8], mime: &str) -> Result<String, UiError>;
    fn revoke_object_url(&self, url: &str);

    /// Render a date string for display, `"Invalid Date"` when unparsable.
    fn format_date(&self, raw: &str) -> String {
        crate::util::format::format_date_time(raw)
    }
}
