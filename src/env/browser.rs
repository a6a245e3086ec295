//! `web-sys` implementation of [`UiEnv`] for the live page.
//!
//! Tooltips and popovers are delegated to the page's Bootstrap bundle through
//! `bootstrap.Tooltip.getOrCreateInstance` / `bootstrap.Popover.getOrCreateInstance`,
//! which reuse an existing instance when the element already has one.

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::{Rect, UiEnv, WidgetKind};
use crate::error::UiError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["bootstrap", "Tooltip"], js_name = getOrCreateInstance)]
    fn tooltip_instance(el: &web_sys::Element) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["bootstrap", "Popover"], js_name = getOrCreateInstance)]
    fn popover_instance(el: &web_sys::Element) -> Result<JsValue, JsValue>;
}

fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{value:?}"))
}

fn dom_error(value: JsValue) -> UiError {
    UiError::Dom(js_error(&value))
}

#[derive(Clone)]
pub struct BrowserEnv {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl BrowserEnv {
    pub fn new() -> Result<Self, UiError> {
        let window = web_sys::window().ok_or_else(|| UiError::Dom("no global window".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| UiError::Dom("window has no document".to_owned()))?;
        Ok(Self { window, document })
    }

    fn html_element(el: &web_sys::Element) -> Option<&web_sys::HtmlElement> {
        el.dyn_ref::<web_sys::HtmlElement>()
    }
}

impl UiEnv for BrowserEnv {
    type Element = web_sys::Element;
    type Timer = Timeout;

    fn query(&self, selector: &str) -> Option<web_sys::Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<web_sys::Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .collect()
    }

    fn body(&self) -> Result<web_sys::Element, UiError> {
        self.document
            .body()
            .map(Into::into)
            .ok_or_else(|| UiError::ElementNotFound { selector: "body".to_owned() })
    }

    fn create_element(&self, tag: &str) -> Result<web_sys::Element, UiError> {
        self.document.create_element(tag).map_err(dom_error)
    }

    fn attribute(&self, el: &web_sys::Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn set_attribute(&self, el: &web_sys::Element, name: &str, value: &str) -> Result<(), UiError> {
        el.set_attribute(name, value).map_err(dom_error)
    }

    fn remove_attribute(&self, el: &web_sys::Element, name: &str) {
        let _ = el.remove_attribute(name);
    }

    fn set_class_name(&self, el: &web_sys::Element, class_name: &str) {
        el.set_class_name(class_name);
    }

    fn inner_html(&self, el: &web_sys::Element) -> String {
        el.inner_html()
    }

    fn set_inner_html(&self, el: &web_sys::Element, html: &str) {
        el.set_inner_html(html);
    }

    fn set_style(&self, el: &web_sys::Element, property: &str, value: &str) -> Result<(), UiError> {
        let Some(html) = Self::html_element(el) else {
            return Err(UiError::Dom(format!("<{}> has no inline style", el.tag_name())));
        };
        html.style().set_property(property, value).map_err(dom_error)
    }

    fn prepend_child(&self, parent: &web_sys::Element, child: &web_sys::Element) -> Result<(), UiError> {
        let first = parent.first_child();
        parent.insert_before(child, first.as_ref()).map(|_| ()).map_err(dom_error)
    }

    fn append_child(&self, parent: &web_sys::Element, child: &web_sys::Element) -> Result<(), UiError> {
        parent.append_child(child).map(|_| ()).map_err(dom_error)
    }

    fn remove(&self, el: &web_sys::Element) {
        el.remove();
    }

    fn is_attached(&self, el: &web_sys::Element) -> bool {
        el.parent_node().is_some()
    }

    fn click(&self, el: &web_sys::Element) {
        if let Some(html) = Self::html_element(el) {
            html.click();
        }
    }

    fn activate_widget(&self, el: &web_sys::Element, kind: WidgetKind) -> Result<(), UiError> {
        let result = match kind {
            WidgetKind::Tooltip => tooltip_instance(el),
            WidgetKind::Popover => popover_instance(el),
        };
        result.map(|_| ()).map_err(dom_error)
    }

    fn bounding_rect(&self, el: &web_sys::Element) -> Rect {
        let rect = el.get_bounding_client_rect();
        Rect::new(rect.top(), rect.left(), rect.bottom(), rect.right())
    }

    fn viewport_size(&self) -> (f64, f64) {
        let client = self
            .document
            .document_element()
            .map_or((0.0, 0.0), |root| (f64::from(root.client_width()), f64::from(root.client_height())));
        // innerWidth/innerHeight of 0 fall back to the root element's client box.
        let inner = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).filter(|v| *v > 0.0);
        (
            inner(self.window.inner_width()).unwrap_or(client.0),
            inner(self.window.inner_height()).unwrap_or(client.1),
        )
    }

    fn scroll_into_view_smooth(&self, el: &web_sys::Element) {
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        options.set_block(web_sys::ScrollLogicalPosition::Start);
        el.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, move || callback())
    }

    fn schedule_detached(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, move || callback()).forget();
    }

    fn on_ready(&self, callback: Box<dyn FnOnce()>) {
        if self.document.ready_state() != web_sys::DocumentReadyState::Loading {
            callback();
            return;
        }
        let listener = Closure::once_into_js(move || callback());
        let options = web_sys::AddEventListenerOptions::new();
        options.set_once(true);
        if let Err(err) = self.document.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            listener.unchecked_ref(),
            &options,
        ) {
            log::error!("pagekit: DOMContentLoaded listener not installed: {}", js_error(&err));
        }
    }

    fn write_clipboard(&self, text: &str) -> LocalBoxFuture<'static, Result<(), UiError>> {
        // Read as a plain property: it is undefined outside secure contexts.
        let clipboard = js_sys::Reflect::get(&JsValue::from(self.window.navigator()), &JsValue::from_str("clipboard"))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null());
        let Some(clipboard) = clipboard else {
            return future::ready(Err(UiError::ClipboardUnavailable)).boxed_local();
        };
        let promise = clipboard.unchecked_into::<web_sys::Clipboard>().write_text(text);
        async move {
            JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|err| UiError::Clipboard(js_error(&err)))
        }
        .boxed_local()
    }

    fn create_object_url(&self, bytes: &[u8], mime: &str) -> Result<String, UiError> {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
        let bag = web_sys::BlobPropertyBag::new();
        bag.set_type(mime);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &bag)
            .map_err(|err| UiError::Blob(js_error(&err)))?;
        web_sys::Url::create_object_url_with_blob(&blob).map_err(|err| UiError::Blob(js_error(&err)))
    }

    fn revoke_object_url(&self, url: &str) {
        let _ = web_sys::Url::revoke_object_url(url);
    }

    fn format_date(&self, raw: &str) -> String {
        let date = js_sys::Date::new(&JsValue::from_str(raw));
        if date.get_time().is_nan() {
            return "Invalid Date".to_owned();
        }
        String::from(date.to_locale_string("default", &JsValue::UNDEFINED))
    }
}

/// Read the page config from `<body data-pagekit-config="...">`.
///
/// A missing attribute yields the defaults.
pub fn page_config(env: &BrowserEnv) -> Result<crate::config::UiConfig, UiError> {
    match env.body()?.get_attribute(crate::config::CONFIG_ATTR) {
        Some(raw) => crate::config::UiConfig::from_json(&raw),
        None => Ok(crate::config::UiConfig::default()),
    }
}
