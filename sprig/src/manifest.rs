//! Machine-readable description of a command tree.
//!
//! Built from the same descriptors that drive binding and help, so tools
//! consuming the manifest see exactly what the dispatcher accepts.

use crate::descriptor::{ArgumentSlot, OptionSlot};
use crate::node::CommandNode;
use serde::Serialize;

/// Whole application.
#[derive(Debug, Clone, Serialize)]
pub struct AppManifest {
    pub name: String,
    pub version: String,
    pub commands: Vec<CommandManifest>,
}

impl AppManifest {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One command and, recursively, its subcommands.
#[derive(Debug, Clone, Serialize)]
pub struct CommandManifest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub arguments: Vec<ArgumentSlot>,
    pub options: Vec<OptionSlot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<CommandManifest>,
}

impl CommandManifest {
    pub fn from_node(node: &CommandNode) -> Self {
        let descriptor = node.descriptor();
        let mut arguments = descriptor.arguments().to_vec();
        arguments.sort_by_key(|slot| slot.position);

        Self {
            name: node.name().to_string(),
            description: node.description().map(str::to_string),
            arguments,
            options: descriptor.options().to_vec(),
            subcommands: node.children().map(Self::from_node).collect(),
        }
    }
}
