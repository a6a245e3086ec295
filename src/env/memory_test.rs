use std::cell::Cell;
use std::rc::Rc;

use super::*;

#[test]
fn selector_parse_handles_compound_forms() {
    let sel = Selector::parse(r#"button.btn.primary#save[data-bs-toggle="tooltip"][disabled]"#).unwrap();
    assert_eq!(sel.tag.as_deref(), Some("button"));
    assert_eq!(sel.id.as_deref(), Some("save"));
    assert_eq!(sel.classes, vec!["btn".to_owned(), "primary".to_owned()]);
    assert_eq!(
        sel.attributes,
        vec![("data-bs-toggle".to_owned(), Some("tooltip".to_owned())), ("disabled".to_owned(), None)]
    );
}

#[test]
fn selector_parse_rejects_combinators_and_garbage() {
    assert!(Selector::parse("div > span").is_none());
    assert!(Selector::parse("a, b").is_none());
    assert!(Selector::parse("").is_none());
    assert!(Selector::parse("[unterminated").is_none());
    assert!(Selector::parse(".").is_none());
}

#[test]
fn query_all_returns_document_order() {
    let env = MemoryEnv::new();
    let body = env.body_id();
    let first = env.add_child(body, "div");
    let nested = env.add_child(first, "span");
    let second = env.add_child(body, "span");
    for id in [nested, second] {
        env.set_class_name(&id, "hit");
    }
    assert_eq!(env.query_all(".hit"), vec![nested, second]);
    assert_eq!(env.query("span.hit"), Some(nested));
    assert_eq!(env.query("*").map(|id| env.tag(id)).as_deref(), Some("body"));
}

#[test]
fn query_skips_detached_elements() {
    let env = MemoryEnv::new();
    let orphan = env.create_element("div").unwrap();
    env.set_class_name(&orphan, "container");
    assert!(env.query(".container").is_none());

    env.append_child(&env.body_id(), &orphan).unwrap();
    assert_eq!(env.query(".container"), Some(orphan));
}

#[test]
fn attribute_selector_matches_value_and_presence() {
    let env = MemoryEnv::new();
    let tip = env.add_child(env.body_id(), "a");
    let pop = env.add_child(env.body_id(), "a");
    env.set_attribute(&tip, "data-bs-toggle", "tooltip").unwrap();
    env.set_attribute(&pop, "data-bs-toggle", "popover").unwrap();
    assert_eq!(env.query_all(r#"[data-bs-toggle="tooltip"]"#), vec![tip]);
    assert_eq!(env.query_all("[data-bs-toggle='popover']"), vec![pop]);
    assert_eq!(env.query_all("[data-bs-toggle]"), vec![tip, pop]);
}

#[test]
fn prepend_moves_existing_child_to_front() {
    let env = MemoryEnv::new();
    let body = env.body_id();
    let a = env.add_child(body, "p");
    let b = env.add_child(body, "p");
    env.prepend_child(&body, &b).unwrap();
    assert_eq!(env.children(body), vec![b, a]);
}

#[test]
fn insert_into_own_descendant_is_rejected() {
    let env = MemoryEnv::new();
    let outer = env.add_child(env.body_id(), "div");
    let inner = env.add_child(outer, "div");
    assert!(matches!(env.append_child(&inner, &outer), Err(UiError::Dom(_))));
}

#[test]
fn remove_detaches_and_is_idempotent() {
    let env = MemoryEnv::new();
    let el = env.add_child(env.body_id(), "div");
    env.remove(&el);
    assert!(!env.is_attached(&el));
    env.remove(&el);
    assert!(env.children(env.body_id()).is_empty());
}

#[test]
fn removed_nodes_stay_addressable_and_logs_keep_history() {
    let env = MemoryEnv::new();
    let el = env.add_child(env.body_id(), "p");
    env.click(&el);
    env.click(&el);
    env.remove(&el);
    assert_eq!(env.tag(el), "p");
    assert_eq!(env.parent(el), None);
    assert_eq!(env.clicks(), vec![el, el]);
    let next = env.add_child(env.body_id(), "div");
    assert_ne!(next, el);
}

#[test]
fn advance_fires_due_timers_in_order() {
    let env = MemoryEnv::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    for (delay, tag) in [(30, "c"), (10, "a"), (20, "b")] {
        let log = Rc::clone(&log);
        env.schedule_detached(delay, Box::new(move || log.borrow_mut().push(tag)));
    }
    env.advance(15);
    assert_eq!(*log.borrow(), vec!["a"]);
    env.advance(15);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    assert_eq!(env.now_ms(), 30);
    assert_eq!(env.pending_timers(), 0);
}

#[test]
fn dropping_timer_handle_cancels_callback() {
    let env = MemoryEnv::new();
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    let handle = env.schedule(10, Box::new(move || flag.set(true)));
    drop(handle);
    env.advance(100);
    assert!(!fired.get());
}

#[test]
fn timers_scheduled_from_callbacks_fire_within_same_advance() {
    let env = MemoryEnv::new();
    let fired_at = Rc::new(Cell::new(None));
    let inner_env = env.clone();
    let slot = Rc::clone(&fired_at);
    env.schedule_detached(
        10,
        Box::new(move || {
            let probe = inner_env.clone();
            inner_env.schedule_detached(5, Box::new(move || slot.set(Some(probe.now_ms()))));
        }),
    );
    env.advance(20);
    assert_eq!(fired_at.get(), Some(15));
}

#[test]
fn on_ready_waits_for_finish_loading() {
    let env = MemoryEnv::loading();
    let ran = Rc::new(Cell::new(0));
    let counter = Rc::clone(&ran);
    env.on_ready(Box::new(move || counter.set(counter.get() + 1)));
    assert_eq!(ran.get(), 0);
    env.finish_loading();
    assert_eq!(ran.get(), 1);

    let counter = Rc::clone(&ran);
    env.on_ready(Box::new(move || counter.set(counter.get() + 1)));
    assert_eq!(ran.get(), 2);
}

#[test]
fn object_urls_hold_blob_until_revoked() {
    let env = MemoryEnv::new();
    let url = env.create_object_url(b"a,b\n1,2\n", "text/csv").unwrap();
    assert_eq!(env.object_url(&url), Some((b"a,b\n1,2\n".to_vec(), "text/csv".to_owned())));
    env.revoke_object_url(&url);
    assert_eq!(env.live_object_urls(), 0);
}

#[test]
fn clipboard_write_can_be_forced_to_fail() {
    let env = MemoryEnv::new();
    futures::executor::block_on(env.write_clipboard("one")).unwrap();
    assert_eq!(env.clipboard().as_deref(), Some("one"));

    env.fail_clipboard("denied");
    let err = futures::executor::block_on(env.write_clipboard("two")).unwrap_err();
    assert_eq!(err, UiError::Clipboard("denied".to_owned()));
    assert_eq!(env.clipboard().as_deref(), Some("one"));
}

#[test]
fn create_element_rejects_bad_tag_names() {
    let env = MemoryEnv::new();
    assert!(env.create_element("").is_err());
    assert!(env.create_element("<div>").is_err());
}
