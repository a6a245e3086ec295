use futures::executor::block_on;

use super::*;
use crate::env::memory::MemoryEnv;

fn env_with_container() -> MemoryEnv {
    let env = MemoryEnv::new();
    let container = env.add_child(env.body_id(), "main");
    env.set_class_name(&container, "container");
    env
}

#[test]
fn successful_copy_writes_text_and_shows_success_banner() {
    let env = env_with_container();
    block_on(copy_to_clipboard(&env, &UiConfig::default(), "https://example.com/share/42")).unwrap();

    assert_eq!(env.clipboard().as_deref(), Some("https://example.com/share/42"));
    let banner = env.query(".alert-success").unwrap();
    assert!(env.inner_html(&banner).starts_with(MSG_COPIED));
    assert!(env.query(".alert-error").is_none());
}

#[test]
fn rejected_copy_shows_error_banner_and_returns_error() {
    let env = env_with_container();
    env.fail_clipboard("permission denied");
    let err = block_on(copy_to_clipboard(&env, &UiConfig::default(), "secret")).unwrap_err();

    assert_eq!(err, UiError::Clipboard("permission denied".to_owned()));
    assert!(env.clipboard().is_none());
    let banner = env.query(".alert-error").unwrap();
    assert!(env.inner_html(&banner).starts_with(MSG_COPY_FAILED));
    assert!(env.query(".alert-success").is_none());
}

#[test]
fn copy_without_container_still_copies() {
    let env = MemoryEnv::new();
    block_on(copy_to_clipboard(&env, &UiConfig::default(), "text")).unwrap();
    assert_eq!(env.clipboard().as_deref(), Some("text"));
    assert!(env.query(".alert").is_none());
}

#[test]
fn feedback_banner_expires() {
    let env = env_with_container();
    block_on(copy_to_clipboard(&env, &UiConfig::default(), "x")).unwrap();
    env.advance(5_000);
    assert!(env.query(".alert").is_none());
}
