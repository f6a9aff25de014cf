//! Static slot metadata for a receiver type.
//!
//! A [`Descriptor`] lists the positional [`ArgumentSlot`]s and the flag
//! [`OptionSlot`]s a receiver declares. It is built once per command when
//! the command is registered, validated eagerly, and used both for binding
//! and for rendering the command's help block.

use crate::coerce::{coerce, ValueKind};
use crate::error::ConfigError;
use crate::OPTION_PREFIX;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Width labels are padded to in help output.
pub(crate) const HELP_COLUMN: usize = 20;

/// One positional binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentSlot {
    /// Zero-based position among the level's positional tokens
    pub position: usize,
    /// Receiver field the value is assigned to
    pub field: String,
    pub description: String,
    pub required: bool,
    pub kind: ValueKind,
}

impl ArgumentSlot {
    /// Optional string argument at `position`.
    pub fn new(position: usize, field: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            position,
            field: field.into(),
            description: description.into(),
            required: false,
            kind: ValueKind::String,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// Array slots capture every token from `position` to the end.
    pub fn is_array(&self) -> bool {
        self.kind.is_array()
    }
}

/// One flag binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionSlot {
    /// Flag including its prefix, e.g. `-f`
    pub flag: String,
    /// Receiver field the value is assigned to
    pub field: String,
    pub description: String,
    /// Raw value coerced when the flag is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub kind: ValueKind,
}

impl OptionSlot {
    /// String option without a default.
    pub fn new(
        flag: impl Into<String>,
        field: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            flag: flag.into(),
            field: field.into(),
            description: description.into(),
            default: None,
            kind: ValueKind::String,
        }
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Slot metadata for one receiver type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Descriptor {
    arguments: Vec<ArgumentSlot>,
    options: Vec<OptionSlot>,
}

impl Descriptor {
    /// Descriptor with no slots, used by parameterless commands.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn argument(mut self, slot: ArgumentSlot) -> Self {
        self.arguments.push(slot);
        self
    }

    pub fn option(mut self, slot: OptionSlot) -> Self {
        self.options.push(slot);
        self
    }

    /// Argument slots in declaration order.
    pub fn arguments(&self) -> &[ArgumentSlot] {
        &self.arguments
    }

    /// Option slots in declaration order.
    pub fn options(&self) -> &[OptionSlot] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty() && self.options.is_empty()
    }

    pub fn find_option(&self, flag: &str) -> Option<&OptionSlot> {
        self.options.iter().find(|slot| slot.flag == flag)
    }

    /// Reject slot layouts that cannot be bound unambiguously.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut positions: BTreeMap<usize, &str> = BTreeMap::new();
        for slot in &self.arguments {
            if let Some(first) = positions.insert(slot.position, slot.field.as_str()) {
                return Err(ConfigError::DuplicatePosition {
                    position: slot.position,
                    first: first.to_string(),
                    second: slot.field.clone(),
                });
            }
        }

        let mut fields = HashSet::new();
        let slot_fields = self
            .arguments
            .iter()
            .map(|slot| &slot.field)
            .chain(self.options.iter().map(|slot| &slot.field));
        for field in slot_fields {
            if !fields.insert(field.as_str()) {
                return Err(ConfigError::DuplicateField {
                    field: field.clone(),
                });
            }
        }

        let last = positions.keys().next_back().copied();
        for slot in self.arguments.iter().filter(|slot| slot.is_array()) {
            if Some(slot.position) != last {
                return Err(ConfigError::invalid_array(
                    &slot.field,
                    "only the final argument may collect the remaining tokens",
                ));
            }
        }

        let mut flags = HashSet::new();
        for slot in &self.options {
            if !slot.flag.starts_with(OPTION_PREFIX) || slot.flag.len() < 2 {
                return Err(ConfigError::InvalidFlag {
                    flag: slot.flag.clone(),
                    field: slot.field.clone(),
                });
            }
            if !flags.insert(slot.flag.as_str()) {
                return Err(ConfigError::DuplicateFlag {
                    flag: slot.flag.clone(),
                });
            }
            if slot.kind.is_array() {
                return Err(ConfigError::invalid_array(
                    &slot.field,
                    "options bind a single value",
                ));
            }
            if let Some(default) = &slot.default {
                coerce(&slot.field, default, slot.kind).map_err(|_| {
                    ConfigError::InvalidDefault {
                        flag: slot.flag.clone(),
                        value: default.clone(),
                        expected: slot.kind,
                    }
                })?;
            }
        }

        Ok(())
    }

    /// Render the help block for a command using this descriptor.
    ///
    /// Arguments are listed by ascending position (shown one-based),
    /// options in declaration order.
    pub fn render_help(&self, description: Option<&str>) -> String {
        let mut help = format!(
            "Description:\t{:<width$}\n",
            description.unwrap_or_default(),
            width = HELP_COLUMN
        );

        if !self.arguments.is_empty() {
            let mut sorted: Vec<&ArgumentSlot> = self.arguments.iter().collect();
            sorted.sort_by_key(|slot| slot.position);

            help.push_str("Arguments:\n");
            for slot in sorted {
                let mut label = format!("position {}", slot.position + 1);
                if slot.is_array() {
                    label.push_str("...");
                }
                let required = if slot.required { " (required)" } else { "" };
                help.push_str(&format!(
                    "\t{:<width$}\t{}{}\n",
                    label,
                    slot.description,
                    required,
                    width = HELP_COLUMN
                ));
            }
        }

        if !self.options.is_empty() {
            help.push_str("Options:\n");
            for slot in &self.options {
                let default = slot
                    .default
                    .as_deref()
                    .and_then(|raw| coerce(&slot.field, raw, slot.kind).ok())
                    .map(|value| format!(" [default: {}]", value))
                    .unwrap_or_default();
                help.push_str(&format!(
                    "\t{:<width$}\t{}{}\n",
                    slot.flag,
                    slot.description,
                    default,
                    width = HELP_COLUMN
                ));
            }
        }

        help
    }
}
