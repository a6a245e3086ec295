use super::*;
use crate::env::memory::MemoryEnv;

const VIEW: (f64, f64) = (800.0, 600.0);

#[test]
fn fully_inside_is_visible() {
    assert!(rect_in_viewport(Rect::new(10.0, 10.0, 100.0, 200.0), VIEW));
}

#[test]
fn touching_edges_counts_as_inside() {
    assert!(rect_in_viewport(Rect::new(0.0, 0.0, 600.0, 800.0), VIEW));
}

#[test]
fn any_overflow_is_not_visible() {
    assert!(!rect_in_viewport(Rect::new(-1.0, 10.0, 100.0, 100.0), VIEW));
    assert!(!rect_in_viewport(Rect::new(10.0, -0.5, 100.0, 100.0), VIEW));
    assert!(!rect_in_viewport(Rect::new(10.0, 10.0, 600.5, 100.0), VIEW));
    assert!(!rect_in_viewport(Rect::new(10.0, 10.0, 100.0, 801.0), VIEW));
}

#[test]
fn is_in_viewport_reads_env_geometry() {
    let env = MemoryEnv::new();
    env.set_viewport(VIEW.0, VIEW.1);
    let card = env.add_child(env.body_id(), "div");

    env.set_rect(card, Rect::new(100.0, 50.0, 300.0, 400.0));
    assert!(is_in_viewport(&env, &card));

    env.set_rect(card, Rect::new(500.0, 50.0, 700.0, 400.0));
    assert!(!is_in_viewport(&env, &card));
}

#[test]
fn smooth_scroll_targets_element() {
    let env = MemoryEnv::new();
    let section = env.add_child(env.body_id(), "section");
    smooth_scroll(&env, &section);
    assert_eq!(env.scrolled(), vec![section]);
}
