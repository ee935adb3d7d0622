use std::collections::BTreeSet;

use vigil::config::{
    Config, ConfigError, Credentials, RemoteConfig, SinkKind, TelegramConfig, CONFIG_TEMPLATE,
};

fn base_config() -> Config {
    Config {
        interval_seconds: 15,
        sleep_seconds: 10,
        credentials: Credentials {
            username: "user".to_string(),
            password: "pass".to_string(),
        },
        target_handles: vec!["alpha".to_string()],
        output_sinks: BTreeSet::from([SinkKind::Logfile]),
        telegram: None,
        remote: RemoteConfig {
            base_url: "https://api.example.com".to_string(),
        },
    }
}

#[test]
fn test_template_parses_and_validates() {
    let config: Config = serde_json::from_str(CONFIG_TEMPLATE).expect("template must parse");
    config.validate().expect("template must validate");
    assert_eq!(config.interval_seconds, 15);
    assert!(config.output_sinks.contains(&SinkKind::Logfile));
}

#[test]
fn test_valid_config_passes() {
    base_config().validate().expect("base config is valid");
}

#[test]
fn test_empty_targets_is_fatal() {
    let mut config = base_config();
    config.target_handles.clear();

    assert!(matches!(config.validate(), Err(ConfigError::NoTargets)));
}

#[test]
fn test_empty_sinks_is_fatal() {
    let mut config = base_config();
    config.output_sinks.clear();

    assert!(matches!(config.validate(), Err(ConfigError::NoSinks)));
}

#[test]
fn test_telegram_sink_requires_telegram_section() {
    let mut config = base_config();
    config.output_sinks.insert(SinkKind::Telegram);

    assert!(matches!(
        config.validate(),
        Err(ConfigError::TelegramUnconfigured)
    ));

    config.telegram = Some(TelegramConfig {
        token: "t".to_string(),
        chat_id: 7,
    });
    config.validate().expect("configured telegram sink is fine");
}

#[test]
fn test_low_interval_is_a_warning_not_an_error() {
    let mut config = base_config();
    config.interval_seconds = 1;
    config.sleep_seconds = 1;

    // Aggressive polling is the operator's problem, not a startup failure.
    config.validate().expect("low intervals only warn");
}

#[test]
fn test_sink_kinds_deserialize_lowercase() {
    let sinks: BTreeSet<SinkKind> =
        serde_json::from_str(r#"["logfile", "telegram"]"#).expect("must parse");
    assert_eq!(sinks.len(), 2);
}
