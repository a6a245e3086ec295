use super::*;
use crate::env::memory::MemoryEnv;

#[test]
fn download_clicks_a_detached_anchor_pointing_at_the_blob() {
    let env = MemoryEnv::new();
    trigger_file_download(&env, &UiConfig::default(), "id,name\n1,Ada\n", "export.csv", "text/csv").unwrap();

    let clicks = env.clicks();
    assert_eq!(clicks.len(), 1);
    let anchor = clicks[0];
    assert_eq!(env.tag(anchor), "a");
    assert_eq!(env.attribute(&anchor, "download").as_deref(), Some("export.csv"));
    assert!(!env.is_attached(&anchor));

    let href = env.attribute(&anchor, "href").unwrap();
    assert_eq!(env.object_url(&href), Some((b"id,name\n1,Ada\n".to_vec(), "text/csv".to_owned())));
}

#[test]
fn object_url_is_revoked_after_delay() {
    let env = MemoryEnv::new();
    trigger_file_download(&env, &UiConfig::default(), br#"{"ok":true}"#, "result.json", "application/json").unwrap();

    env.advance(99);
    assert_eq!(env.live_object_urls(), 1);
    env.advance(1);
    assert_eq!(env.live_object_urls(), 0);
}

#[test]
fn binary_content_is_passed_through_untouched() {
    let env = MemoryEnv::new();
    let bytes: Vec<u8> = (0..=255).collect();
    trigger_file_download(&env, &UiConfig::default(), &bytes, "blob.bin", "application/octet-stream").unwrap();

    let href = env.attribute(&env.clicks()[0], "href").unwrap();
    assert_eq!(env.object_url(&href).unwrap().0, bytes);
}

#[test]
fn body_is_left_as_it_was() {
    let env = MemoryEnv::new();
    let existing = env.add_child(env.body_id(), "div");
    trigger_file_download(&env, &UiConfig::default(), "x", "x.txt", "text/plain").unwrap();
    assert_eq!(env.children(env.body_id()), vec![existing]);
}
