//! In-memory page environment with a virtual clock.
//!
//! `MemoryEnv` models just enough of a document for the helpers: an element
//! tree rooted at `<body>`, attributes, inline styles, `innerHTML` as an
//! opaque string, geometry set by the caller, a clipboard, object URLs and
//! widget activations. Timers only fire when the clock is moved with
//! [`MemoryEnv::advance`].
//!
//! Selectors are single compound selectors (`div.alert`, `#id`,
//! `[data-bs-toggle="tooltip"]`, `button.btn[disabled]`). Combinators and
//! selector lists match nothing.
//!
//! Nodes are never freed and the click/scroll logs only grow, so one
//! instance is meant for a test or a short headless run, not a long-lived page.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::{Rc, Weak};

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};

use super::{Rect, UiEnv, WidgetKind};
use crate::error::UiError;

const DEFAULT_VIEWPORT: (f64, f64) = (1024.0, 768.0);

/// Handle to an element in a [`MemoryEnv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone)]
pub struct MemoryEnv {
    doc: Rc<RefCell<Document>>,
}

struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    inner_html: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    rect: Rect,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            inner_html: String::new(),
            parent: None,
            children: Vec::new(),
            rect: Rect::default(),
        }
    }
}

struct PendingTimer {
    id: u64,
    due_ms: u64,
    callback: Box<dyn FnOnce()>,
}

struct ObjectUrl {
    bytes: Vec<u8>,
    mime: String,
}

struct Document {
    nodes: Vec<Node>,
    body: NodeId,
    now_ms: u64,
    next_timer_id: u64,
    timers: Vec<PendingTimer>,
    ready: bool,
    ready_queue: Vec<Box<dyn FnOnce()>>,
    clipboard: Option<String>,
    clipboard_failure: Option<String>,
    next_url_id: u64,
    object_urls: BTreeMap<String, ObjectUrl>,
    widgets: HashSet<(NodeId, WidgetKind)>,
    clicks: Vec<NodeId>,
    scrolled: Vec<NodeId>,
    viewport: (f64, f64),
}

impl Document {
    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == candidate {
                return true;
            }
            match self.node(id).parent {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn insert_child(&mut self, parent: NodeId, child: NodeId, at_front: bool) -> Result<(), UiError> {
        if self.is_ancestor_or_self(child, parent) {
            return Err(UiError::Dom("cannot insert a node into itself or its descendant".to_owned()));
        }
        self.detach(child);
        let children = &mut self.node_mut(parent).children;
        if at_front {
            children.insert(0, child);
        } else {
            children.push(child);
        }
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Attached nodes in document order, starting at `<body>`.
    fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.body];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        order
    }

    fn select(&self, selector: &str) -> Vec<NodeId> {
        let Some(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.walk().into_iter().filter(|id| sel.matches(self.node(*id))).collect()
    }
}

impl Default for MemoryEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEnv {
    /// An empty, fully loaded document holding only `<body>`.
    pub fn new() -> Self {
        let doc = Document {
            nodes: vec![Node::new("body")],
            body: NodeId(0),
            now_ms: 0,
            next_timer_id: 0,
            timers: Vec::new(),
            ready: true,
            ready_queue: Vec::new(),
            clipboard: None,
            clipboard_failure: None,
            next_url_id: 0,
            object_urls: BTreeMap::new(),
            widgets: HashSet::new(),
            clicks: Vec::new(),
            scrolled: Vec::new(),
            viewport: DEFAULT_VIEWPORT,
        };
        Self { doc: Rc::new(RefCell::new(doc)) }
    }

    /// Like [`MemoryEnv::new`], but `on_ready` callbacks wait for
    /// [`MemoryEnv::finish_loading`].
    pub fn loading() -> Self {
        let env = Self::new();
        env.doc.borrow_mut().ready = false;
        env
    }

    pub fn body_id(&self) -> NodeId {
        self.doc.borrow().body
    }

    /// Create a `<tag>` element and append it to `parent`.
    pub fn add_child(&self, parent: NodeId, tag: &str) -> NodeId {
        let mut doc = self.doc.borrow_mut();
        let id = NodeId(doc.nodes.len());
        doc.nodes.push(Node::new(tag));
        doc.node_mut(parent).children.push(id);
        doc.node_mut(id).parent = Some(parent);
        id
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.doc.borrow().node(id).children.clone()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.doc.borrow().node(id).parent
    }

    pub fn tag(&self, id: NodeId) -> String {
        self.doc.borrow().node(id).tag.clone()
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        self.doc.borrow().node(id).styles.get(property).cloned()
    }

    pub fn set_rect(&self, id: NodeId, rect: Rect) {
        self.doc.borrow_mut().node_mut(id).rect = rect;
    }

    pub fn set_viewport(&self, width: f64, height: f64) {
        self.doc.borrow_mut().viewport = (width, height);
    }

    /// Flip the document to loaded and run queued `on_ready` callbacks.
    pub fn finish_loading(&self) {
        let queued = {
            let mut doc = self.doc.borrow_mut();
            doc.ready = true;
            std::mem::take(&mut doc.ready_queue)
        };
        for callback in queued {
            callback();
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.doc.borrow().now_ms
    }

    pub fn pending_timers(&self) -> usize {
        self.doc.borrow().timers.len()
    }

    /// Move the clock forward, firing due timers in order of due time.
    ///
    /// Timers scheduled by a callback fire in the same call when they fall
    /// due before the new time.
    pub fn advance(&self, ms: u64) {
        let target = self.doc.borrow().now_ms + ms;
        loop {
            let next = {
                let mut doc = self.doc.borrow_mut();
                let idx = doc
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target)
                    .min_by_key(|(_, t)| (t.due_ms, t.id))
                    .map(|(i, _)| i);
                idx.map(|i| {
                    let timer = doc.timers.remove(i);
                    doc.now_ms = timer.due_ms;
                    timer.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.doc.borrow_mut().now_ms = target;
    }

    pub fn clipboard(&self) -> Option<String> {
        self.doc.borrow().clipboard.clone()
    }

    /// Make every later clipboard write fail with `reason`.
    pub fn fail_clipboard(&self, reason: &str) {
        self.doc.borrow_mut().clipboard_failure = Some(reason.to_owned());
    }

    /// Blob contents and MIME type behind a live object URL.
    pub fn object_url(&self, url: &str) -> Option<(Vec<u8>, String)> {
        self.doc.borrow().object_urls.get(url).map(|o| (o.bytes.clone(), o.mime.clone()))
    }

    pub fn live_object_urls(&self) -> usize {
        self.doc.borrow().object_urls.len()
    }

    pub fn clicks(&self) -> Vec<NodeId> {
        self.doc.borrow().clicks.clone()
    }

    pub fn scrolled(&self) -> Vec<NodeId> {
        self.doc.borrow().scrolled.clone()
    }

    pub fn has_widget(&self, id: NodeId, kind: WidgetKind) -> bool {
        self.doc.borrow().widgets.contains(&(id, kind))
    }

    pub fn widget_count(&self, kind: WidgetKind) -> usize {
        self.doc.borrow().widgets.iter().filter(|(_, k)| *k == kind).count()
    }

    fn push_timer(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> u64 {
        let mut doc = self.doc.borrow_mut();
        let id = doc.next_timer_id;
        doc.next_timer_id += 1;
        let due_ms = doc.now_ms + u64::from(delay_ms);
        doc.timers.push(PendingTimer { id, due_ms, callback });
        id
    }
}

/// Pending [`MemoryEnv`] timer; dropping it cancels the callback.
pub struct MemoryTimer {
    id: u64,
    doc: Weak<RefCell<Document>>,
}

impl Drop for MemoryTimer {
    fn drop(&mut self) {
        let Some(doc) = self.doc.upgrade() else {
            return;
        };
        // The callback may own other timers, so it is dropped after the borrow ends.
        let removed = {
            let Ok(mut doc) = doc.try_borrow_mut() else {
                return;
            };
            let idx = doc.timers.iter().position(|t| t.id == self.id);
            idx.map(|i| doc.timers.remove(i))
        };
        drop(removed);
    }
}

impl UiEnv for MemoryEnv {
    type Element = NodeId;
    type Timer = MemoryTimer;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.doc.borrow().select(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.doc.borrow().select(selector)
    }

    fn body(&self) -> Result<NodeId, UiError> {
        Ok(self.doc.borrow().body)
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, UiError> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(UiError::Dom(format!("invalid tag name {tag:?}")));
        }
        let mut doc = self.doc.borrow_mut();
        let id = NodeId(doc.nodes.len());
        doc.nodes.push(Node::new(tag));
        Ok(id)
    }

    fn attribute(&self, el: &NodeId, name: &str) -> Option<String> {
        self.doc.borrow().node(*el).attributes.get(name).cloned()
    }

    fn set_attribute(&self, el: &NodeId, name: &str, value: &str) -> Result<(), UiError> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(UiError::Dom(format!("invalid attribute name {name:?}")));
        }
        self.doc.borrow_mut().node_mut(*el).attributes.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_attribute(&self, el: &NodeId, name: &str) {
        self.doc.borrow_mut().node_mut(*el).attributes.remove(name);
    }

    fn set_class_name(&self, el: &NodeId, class_name: &str) {
        self.doc
            .borrow_mut()
            .node_mut(*el)
            .attributes
            .insert("class".to_owned(), class_name.to_owned());
    }

    fn inner_html(&self, el: &NodeId) -> String {
        self.doc.borrow().node(*el).inner_html.clone()
    }

    fn set_inner_html(&self, el: &NodeId, html: &str) {
        self.doc.borrow_mut().node_mut(*el).inner_html = html.to_owned();
    }

    fn set_style(&self, el: &NodeId, property: &str, value: &str) -> Result<(), UiError> {
        self.doc
            .borrow_mut()
            .node_mut(*el)
            .styles
            .insert(property.to_owned(), value.to_owned());
        Ok(())
    }

    fn prepend_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), UiError> {
        self.doc.borrow_mut().insert_child(*parent, *child, true)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), UiError> {
        self.doc.borrow_mut().insert_child(*parent, *child, false)
    }

    fn remove(&self, el: &NodeId) {
        self.doc.borrow_mut().detach(*el);
    }

    fn is_attached(&self, el: &NodeId) -> bool {
        self.doc.borrow().node(*el).parent.is_some()
    }

    fn click(&self, el: &NodeId) {
        self.doc.borrow_mut().clicks.push(*el);
    }

    fn activate_widget(&self, el: &NodeId, kind: WidgetKind) -> Result<(), UiError> {
        self.doc.borrow_mut().widgets.insert((*el, kind));
        Ok(())
    }

    fn bounding_rect(&self, el: &NodeId) -> Rect {
        self.doc.borrow().node(*el).rect
    }

    fn viewport_size(&self) -> (f64, f64) {
        self.doc.borrow().viewport
    }

    fn scroll_into_view_smooth(&self, el: &NodeId) {
        self.doc.borrow_mut().scrolled.push(*el);
    }

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> MemoryTimer {
        let id = self.push_timer(delay_ms, callback);
        MemoryTimer { id, doc: Rc::downgrade(&self.doc) }
    }

    fn schedule_detached(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        self.push_timer(delay_ms, callback);
    }

    fn on_ready(&self, callback: Box<dyn FnOnce()>) {
        let mut doc = self.doc.borrow_mut();
        if doc.ready {
            drop(doc);
            callback();
        } else {
            doc.ready_queue.push(callback);
        }
    }

    fn write_clipboard(&self, text: &str) -> LocalBoxFuture<'static, Result<(), UiError>> {
        let mut doc = self.doc.borrow_mut();
        let result = match doc.clipboard_failure.clone() {
            Some(reason) => Err(UiError::Clipboard(reason)),
            None => {
                doc.clipboard = Some(text.to_owned());
                Ok(())
            }
        };
        future::ready(result).boxed_local()
    }

    fn create_object_url(&self, bytes: &[u8], mime: &str) -> Result<String, UiError> {
        let mut doc = self.doc.borrow_mut();
        let url = format!("blob:memory/{}", doc.next_url_id);
        doc.next_url_id += 1;
        doc.object_urls.insert(url.clone(), ObjectUrl { bytes: bytes.to_vec(), mime: mime.to_owned() });
        Ok(url)
    }

    fn revoke_object_url(&self, url: &str) {
        self.doc.borrow_mut().object_urls.remove(url);
    }
}

// =============================================================================
// SELECTORS
// =============================================================================

#[derive(Debug, Default, PartialEq)]
struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let mut ident = String::new();
    while let Some(c) = chars.peek().copied().filter(|c| is_ident_char(*c)) {
        ident.push(c);
        chars.next();
    }
    (!ident.is_empty()).then_some(ident)
}

impl Selector {
    fn parse(raw: &str) -> Option<Self> {
        let mut sel = Self::default();
        let mut chars = raw.trim().chars().peekable();
        if chars.peek() == Some(&'*') {
            chars.next();
        } else if chars.peek().is_some_and(|c| is_ident_char(*c)) {
            sel.tag = take_ident(&mut chars).map(|t| t.to_ascii_lowercase());
        }
        while let Some(c) = chars.next() {
            match c {
                '.' => sel.classes.push(take_ident(&mut chars)?),
                '#' => sel.id = Some(take_ident(&mut chars)?),
                '[' => {
                    let mut body = String::new();
                    loop {
                        match chars.next()? {
                            ']' => break,
                            c => body.push(c),
                        }
                    }
                    sel.attributes.push(parse_attribute(&body)?);
                }
                _ => return None,
            }
        }
        let empty = sel.tag.is_none() && sel.id.is_none() && sel.classes.is_empty() && sel.attributes.is_empty();
        (!empty || raw.trim() == "*").then_some(sel)
    }

    fn matches(&self, node: &Node) -> bool {
        if self.tag.as_ref().is_some_and(|t| *t != node.tag) {
            return false;
        }
        if self.id.as_ref().is_some_and(|id| node.attributes.get("id") != Some(id)) {
            return false;
        }
        let classes: Vec<&str> = node.attributes.get("class").map_or_else(Vec::new, |c| c.split_whitespace().collect());
        if !self.classes.iter().all(|c| classes.contains(&c.as_str())) {
            return false;
        }
        self.attributes.iter().all(|(name, value)| match (node.attributes.get(name), value) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
        })
    }
}

fn parse_attribute(body: &str) -> Option<(String, Option<String>)> {
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (name.trim(), Some(unquoted.to_owned()))
        }
        None => (body.trim(), None),
    };
    (!name.is_empty() && name.chars().all(is_ident_char)).then(|| (name.to_owned(), value))
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
