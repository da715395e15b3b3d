use chat_relay::presentation::Environment;

#[test]
fn given_known_names_when_parsing_then_maps_to_environment() {
    assert_eq!(Environment::try_from("local".to_string()), Ok(Environment::Local));
    assert_eq!(Environment::try_from("TEST".to_string()), Ok(Environment::Test));
    assert_eq!(Environment::try_from("production".to_string()), Ok(Environment::Prod));
    assert_eq!(Environment::try_from("development".to_string()), Ok(Environment::Local));
}

#[test]
fn given_unknown_name_when_parsing_then_fails() {
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_environment_when_displaying_then_matches_settings_file_suffix() {
    assert_eq!(Environment::Prod.to_string(), "Prod");
    assert_eq!(Environment::default(), Environment::Local);
}
