use chat_relay::infrastructure::observability::{DEFAULT_DIRECTIVES, TracingConfig};

#[test]
fn given_no_level_when_building_filter_then_uses_default_directives() {
    let config = TracingConfig::new("Local", false, None);

    assert_eq!(config.filter_directives(), DEFAULT_DIRECTIVES);
}

#[test]
fn given_explicit_level_when_building_filter_then_applies_it_to_all_targets() {
    let config = TracingConfig::new("Prod", true, Some("warn".to_string()));

    assert!(config.json_format);
    assert_eq!(
        config.filter_directives(),
        "warn,chat_relay=warn,tower_http=warn"
    );
}

#[test]
fn given_blank_level_when_building_filter_then_ignores_it() {
    let config = TracingConfig::new("Test", false, Some("  ".to_string()));

    assert_eq!(config.level, None);
    assert_eq!(config.filter_directives(), DEFAULT_DIRECTIVES);
}
