//! Binding a level's tokens onto a fresh receiver.

use crate::coerce::{coerce, Value};
use crate::command::Receiver;
use crate::descriptor::Descriptor;
use crate::error::DispatchError;
use crate::tokenizer::LevelInput;
use tracing::trace;

/// Build a default `R` and fill every slot of `descriptor` from `input`.
///
/// Options are bound before arguments, so when both are wrong the option's
/// coercion error is the one reported.
///
/// Options take the supplied value, else the declared default, else stay
/// unset. Arguments take the token at their position (the whole remainder
/// for an array slot); a missing required argument fails the bind.
pub fn bind<R: Receiver>(descriptor: &Descriptor, input: &LevelInput) -> Result<R, DispatchError> {
    let mut receiver = R::default();

    for slot in descriptor.options() {
        let raw = match input.option(&slot.flag) {
            Some(value) => value,
            None => match slot.default.as_deref() {
                Some(default) => default,
                None => continue,
            },
        };
        trace!(field = %slot.field, flag = %slot.flag, raw = %raw, "binding option");
        let value = coerce(&slot.field, raw, slot.kind)?;
        receiver.assign(&slot.field, value)?;
    }

    let positionals = &input.positionals;
    for slot in descriptor.arguments() {
        if positionals.len() > slot.position {
            let value = if slot.is_array() {
                Value::StringArray(positionals[slot.position..].to_vec())
            } else {
                coerce(&slot.field, &positionals[slot.position], slot.kind)?
            };
            trace!(field = %slot.field, position = slot.position, "binding argument");
            receiver.assign(&slot.field, value)?;
        } else if slot.required {
            return Err(DispatchError::MissingRequiredArgument {
                field: slot.field.clone(),
                position: slot.position,
            });
        }
    }

    Ok(receiver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::{convert, ValueKind};
    use crate::descriptor::{ArgumentSlot, OptionSlot};
    use std::time::Duration;

    /// Hand-written receiver, no derive.
    #[derive(Debug, Default)]
    struct Manual {
        value: Option<String>,
        format: Option<String>,
        count: i64,
        wait: Option<Duration>,
        rest: Vec<String>,
    }

    impl Receiver for Manual {
        fn descriptor() -> Descriptor {
            Descriptor::new()
                .argument(ArgumentSlot::new(0, "value", "Value").required(true))
                .argument(ArgumentSlot::new(1, "rest", "Rest").kind(ValueKind::StringArray))
                .option(OptionSlot::new("-f", "format", "Format").default_value("s"))
                .option(OptionSlot::new("-n", "count", "Count").kind(ValueKind::Integer))
                .option(OptionSlot::new("-w", "wait", "Wait").kind(ValueKind::Duration))
        }

        fn assign(&mut self, field: &str, value: Value) -> Result<(), DispatchError> {
            match field {
                "value" => self.value = convert(field, value)?,
                "format" => self.format = convert(field, value)?,
                "count" => self.count = convert(field, value)?,
                "wait" => self.wait = convert(field, value)?,
                "rest" => self.rest = convert(field, value)?,
                other => return Err(DispatchError::UnknownField(other.to_string())),
            }
            Ok(())
        }
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
    fn test_missing_required_argument() {
        let err = bind::<Manual>(&Manual::descriptor(), &input(&[], &[])).unwrap_err();
        assert_eq!(
            err,
            DispatchError::MissingRequiredArgument {
                field: "value".to_string(),
                position: 0,
            }
        );
    }

    #[test]
    fn test_single_token_fills_required_argument() {
        let bound: Manual = bind(&Manual::descriptor(), &input(&["now"], &[])).unwrap();
        assert_eq!(bound.value.as_deref(), Some("now"));
        assert!(bound.rest.is_empty());
    }

    #[test]
    fn test_default_applies_when_flag_absent() {
        let bound: Manual = bind(&Manual::descriptor(), &input(&["x"], &[])).unwrap();
        assert_eq!(bound.format.as_deref(), Some("s"));
        // No default and no flag: untouched
        assert_eq!(bound.count, 0);
        assert!(bound.wait.is_none());
    }

    #[test]
    fn test_supplied_flag_overrides_default() {
        let bound: Manual = bind(&Manual::descriptor(), &input(&["x"], &[("-f", "ms")])).unwrap();
        assert_eq!(bound.format.as_deref(), Some("ms"));
    }

    #[test]
    fn test_typed_options() {
        let bound: Manual = bind(
            &Manual::descriptor(),
            &input(&["x"], &[("-n", "12"), ("-w", "00:00:30")]),
        )
        .unwrap();
        assert_eq!(bound.count, 12);
        assert_eq!(bound.wait, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_invalid_option_value() {
        let err = bind::<Manual>(&Manual::descriptor(), &input(&["x"], &[("-n", "lots")]))
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::invalid_format("count", "lots", ValueKind::Integer)
        );
    }

    #[test]
    fn test_bad_option_reported_before_missing_argument() {
        let err = bind::<Manual>(&Manual::descriptor(), &input(&[], &[("-n", "lots")]))
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::invalid_format("count", "lots", ValueKind::Integer)
        );
    }

    #[test]
    fn test_array_slot_takes_remainder() {
        let bound: Manual = bind(&Manual::descriptor(), &input(&["x", "a", "b", "c"], &[])).unwrap();
        assert_eq!(bound.rest, ["a", "b", "c"]);
    }

    #[test]
    fn test_each_bind_starts_fresh() {
        let descriptor = Manual::descriptor();
        let first: Manual = bind(&descriptor, &input(&["x"], &[("-n", "3")])).unwrap();
        let second: Manual = bind(&descriptor, &input(&["y"], &[])).unwrap();
        assert_eq!(first.count, 3);
        assert_eq!(second.count, 0);
    }
}
