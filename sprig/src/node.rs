//! The command tree.
//!
//! A [`CommandNode`] owns its command, the descriptor of the command's
//! receiver, its subcommands and its help text. Nodes are built
//! and validated at registration; dispatch only reads them.

use crate::command::{Command, Erased, Executable, Receiver};
use crate::context::ContextData;
use crate::descriptor::{Descriptor, HELP_COLUMN};
use crate::error::ConfigError;
use crate::OPTION_PREFIX;
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Subcommand fanout limit per node.
pub const MAX_CHILDREN: usize = 3;

/// One addressable command.
pub struct CommandNode {
    name: String,
    description: Option<String>,
    executable: Box<dyn Executable>,
    descriptor: Descriptor,
    children: IndexMap<String, CommandNode>,
    data: Option<ContextData>,
    /// Description and slot blocks; the children block is rendered on read
    usage: String,
}

impl CommandNode {
    /// Create a node for `command`, validating the name and the receiver's descriptor.
    pub fn new<C: Command>(name: impl Into<String>, command: C) -> Result<Self, ConfigError> {
        let name = name.into();
        validate_name(&name)?;

        let descriptor = <C::Receiver as Receiver>::descriptor();
        descriptor.validate()?;

        let mut node = Self {
            name,
            description: None,
            executable: Box::new(Erased(command)),
            descriptor,
            children: IndexMap::new(),
            data: None,
            usage: String::new(),
        };
        node.refresh_usage();
        Ok(node)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Help text for this command.
    ///
    /// Reflects the current description of this node and of every child,
    /// including children described after they were attached.
    pub fn help(&self) -> String {
        let mut help = self.usage.clone();
        if !self.children.is_empty() {
            help.push_str("Commands:\n");
            for child in self.children.values() {
                help.push_str(&format!(
                    "\t{:<width$}\t{}\n",
                    child.name,
                    child.description().unwrap_or_default(),
                    width = HELP_COLUMN
                ));
            }
        }
        help
    }

    /// Subcommands in registration order.
    pub fn children(&self) -> impl Iterator<Item = &CommandNode> {
        self.children.values()
    }

    pub fn find_child(&self, name: &str) -> Option<&CommandNode> {
        self.children.get(name)
    }

    pub fn find_child_mut(&mut self, name: &str) -> Option<&mut CommandNode> {
        self.children.get_mut(name)
    }

    /// Set the description shown in help listings.
    pub fn describe(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self.refresh_usage();
        self
    }

    /// Owned variant of [`CommandNode::describe`] for building children.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.describe(description);
        self
    }

    /// Attach data handed to this command's `execute` through the context.
    pub fn attach_context<T: Any + Send + Sync>(&mut self, data: T) -> &mut Self {
        self.data = Some(Arc::new(data));
        self
    }

    /// Owned variant of [`CommandNode::attach_context`].
    pub fn with_initial_context<T: Any + Send + Sync>(mut self, data: T) -> Self {
        self.attach_context(data);
        self
    }

    /// Add a subcommand built by `factory`.
    ///
    /// Fails when this node already has [`MAX_CHILDREN`] children (the
    /// factory is not called) or a sibling has the same name.
    pub fn child<F>(&mut self, factory: F) -> Result<&mut Self, ConfigError>
    where
        F: FnOnce() -> Result<CommandNode, ConfigError>,
    {
        if self.children.len() >= MAX_CHILDREN {
            return Err(ConfigError::TooManyChildren {
                parent: self.name.clone(),
                limit: MAX_CHILDREN,
            });
        }

        let child = factory()?;
        if self.children.contains_key(&child.name) {
            return Err(ConfigError::DuplicateChild {
                parent: self.name.clone(),
                child: child.name,
            });
        }

        self.children.insert(child.name.clone(), child);
        Ok(self)
    }

    pub(crate) fn executable(&self) -> &dyn Executable {
        self.executable.as_ref()
    }

    pub(crate) fn context_data(&self) -> Option<ContextData> {
        self.data.clone()
    }

    fn refresh_usage(&mut self) {
        self.usage = self.descriptor.render_help(self.description.as_deref());
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("descriptor", &self.descriptor)
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::invalid_name(name, "name must not be empty"));
    }
    if name.starts_with(OPTION_PREFIX) {
        return Err(ConfigError::invalid_name(
            name,
            format!("name must not start with '{}'", OPTION_PREFIX),
        ));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ConfigError::invalid_name(name, "name must not contain whitespace"));
    }
    Ok(())
}
