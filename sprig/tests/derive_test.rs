//! Tests for `#[derive(Receiver)]`

use sprig::{
    bind, ArgumentSlot, ConfigError, Descriptor, DispatchError, LevelInput, OptionSlot, Receiver,
    Value, ValueKind,
};
use std::time::Duration;

#[derive(Debug, Default, Receiver)]
struct TimeArgs {
    #[sprig(position = 0, help = "Time or timestamp to convert", required)]
    value: Option<String>,

    #[sprig(flag = "-f", help = "Timestamp unit <s|ms>", default = "s")]
    format: Option<String>,
}

#[derive(Debug, Default, Receiver)]
struct Everything {
    #[sprig(position = 0, help = "Name")]
    name: String,

    #[sprig(position = 1, help = "Count")]
    count: u32,

    #[sprig(position = 2, help = "Remaining words")]
    words: Vec<String>,

    #[sprig(flag = "-v", help = "Verbose", default = "false")]
    verbose: bool,

    #[sprig(flag = "-t", help = "Timeout")]
    timeout: Option<Duration>,

    #[sprig(flag = "-r", help = "Ratio", default = "0.5")]
    ratio: f64,

    // Not declared: never bound
    untouched: i64,
}

#[derive(Debug, Default, Receiver)]
struct Nothing;

#[derive(Debug, Default, Receiver)]
struct Clash {
    #[sprig(position = 0, help = "First")]
    first: String,

    #[sprig(position = 0, help = "Second")]
    second: String,
}

fn input(positionals: &[&str], options: &[(&str, &str)]) -> LevelInput {
    LevelInput {
        positionals: positionals.iter().map(|s| s.to_string()).collect(),
        options: options
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

#[test]
fn test_generated_descriptor() {
    let expected = Descriptor::new()
        .argument(
            ArgumentSlot::new(0, "value", "Time or timestamp to convert")
                .required(true)
                .kind(ValueKind::String),
        )
        .option(
            OptionSlot::new("-f", "format", "Timestamp unit <s|ms>")
                .kind(ValueKind::String)
                .default_value("s"),
        );

    assert_eq!(TimeArgs::descriptor(), expected);
}

#[test]
fn test_field_kinds_follow_types() {
    let descriptor = Everything::descriptor();
    let kinds: Vec<ValueKind> = descriptor.arguments().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        [ValueKind::String, ValueKind::Integer, ValueKind::StringArray]
    );

    let options: Vec<(&str, ValueKind)> = descriptor
        .options()
        .iter()
        .map(|s| (s.flag.as_str(), s.kind))
        .collect();
    assert_eq!(
        options,
        [
            ("-v", ValueKind::Boolean),
            ("-t", ValueKind::Duration),
            ("-r", ValueKind::Float)
        ]
    );
    assert!(descriptor.validate().is_ok());
}

#[test]
fn test_bind_derived_receiver() {
    let bound: Everything = bind(
        &Everything::descriptor(),
        &input(&["alice", "3", "a", "b"], &[("-t", "00:00:05")]),
    )
    .unwrap();

    assert_eq!(bound.name, "alice");
    assert_eq!(bound.count, 3);
    assert_eq!(bound.words, ["a", "b"]);
    assert!(!bound.verbose);
    assert_eq!(bound.timeout, Some(Duration::from_secs(5)));
    assert_eq!(bound.ratio, 0.5);
    assert_eq!(bound.untouched, 0);
}

#[test]
fn test_narrow_integer_overflow_reported() {
    let err = bind::<Everything>(&Everything::descriptor(), &input(&["bob", "-1x"], &[]))
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::invalid_format("count", "-1x", ValueKind::Integer)
    );

    let err = bind::<Everything>(
        &Everything::descriptor(),
        &input(&["bob", "99999999999"], &[]),
    )
    .unwrap_err();
    assert!(matches!(err, DispatchError::InvalidFormat { field, .. } if field == "count"));
}

#[test]
fn test_unknown_field_assignment() {
    let mut args = TimeArgs::default();
    let err = args
        .assign("missing", Value::String("x".to_string()))
        .unwrap_err();
    assert_eq!(err, DispatchError::UnknownField("missing".to_string()));
}

#[test]
fn test_unit_receiver() {
    assert!(Nothing::descriptor().is_empty());
}

#[test]
fn test_duplicate_position_surfaces_on_validation() {
    assert!(matches!(
        Clash::descriptor().validate(),
        Err(ConfigError::DuplicatePosition { position: 0, .. })
    ));
}
