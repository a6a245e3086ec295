use super::*;

#[test]
fn defaults_match_stock_markup() {
    let cfg = UiConfig::default();
    assert_eq!(cfg.message_timeout_ms, 5_000);
    assert_eq!(cfg.revoke_delay_ms, 100);
    assert_eq!(cfg.default_container_selector, ".container");
    assert_eq!(cfg.original_text_attr, "data-original-text");
    assert_eq!(cfg.progress_width_attr, "data-width");
}

#[test]
fn from_json_fills_missing_fields_with_defaults() {
    let cfg = UiConfig::from_json(r#"{"message_timeout_ms": 1500, "loading_label": "Working"}"#).unwrap();
    assert_eq!(cfg.message_timeout_ms, 1500);
    assert_eq!(cfg.loading_label, "Working");
    assert_eq!(cfg.revoke_delay_ms, DEFAULT_REVOKE_DELAY_MS);
    assert_eq!(cfg.tooltip_selector, r#"[data-bs-toggle="tooltip"]"#);
}

#[test]
fn from_json_empty_object_is_default() {
    assert_eq!(UiConfig::from_json("{}").unwrap(), UiConfig::default());
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = UiConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, UiError::Config(_)));
}

#[test]
fn from_json_rejects_wrong_field_type() {
    let err = UiConfig::from_json(r#"{"message_timeout_ms": "soon"}"#).unwrap_err();
    assert!(matches!(err, UiError::Config(_)));
}

#[test]
fn level_filter_parses_known_names_and_defaults_unknown() {
    let mut cfg = UiConfig::default();
    cfg.log_level = "debug".to_owned();
    assert_eq!(cfg.level_filter(), log::LevelFilter::Debug);
    cfg.log_level = "chatty".to_owned();
    assert_eq!(cfg.level_filter(), log::LevelFilter::Info);
}
