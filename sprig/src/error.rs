//! Registration, dispatch and boundary error types
//!
//! `ConfigError` is raised while the command tree is being built and is
//! always a programming mistake in the application. `DispatchError` is
//! raised while resolving and binding a single invocation. Both end up in
//! `CliError`, which is what commands return and what the boundary prints.

use crate::coerce::ValueKind;
use thiserror::Error;

/// Errors detected while registering commands or validating descriptors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Command name is empty or starts with the option prefix
    #[error("Invalid command name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// A top-level command with this name already exists
    #[error("Command '{0}' is already registered")]
    DuplicateCommand(String),

    /// A sibling with this name already exists under the parent
    #[error("Command '{parent}' already has a subcommand named '{child}'")]
    DuplicateChild { parent: String, child: String },

    /// Parent reached the subcommand fanout limit
    #[error("Command '{parent}' cannot have more than {limit} subcommands")]
    TooManyChildren { parent: String, limit: usize },

    /// Two argument slots share a position
    #[error("Argument position {position} is declared by both '{first}' and '{second}'")]
    DuplicatePosition {
        position: usize,
        first: String,
        second: String,
    },

    /// Two slots (argument or option) bind the same receiver field
    #[error("Field '{field}' is bound by more than one argument or option")]
    DuplicateField { field: String },

    /// Two option slots share a flag
    #[error("Option '{flag}' is declared more than once")]
    DuplicateFlag { flag: String },

    /// Option flag does not start with the option prefix
    #[error("Option '{flag}' on field '{field}' must start with '-'")]
    InvalidFlag { flag: String, field: String },

    /// Array slot used somewhere other than the final argument position
    #[error("Array slot '{field}' is invalid: {reason}")]
    InvalidArraySlot { field: String, reason: String },

    /// Declared default cannot be converted to the field's kind
    #[error("Default value '{value}' for option '{flag}' is not a valid {expected}")]
    InvalidDefault {
        flag: String,
        value: String,
        expected: ValueKind,
    },
}

impl ConfigError {
    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid array slot error
    pub fn invalid_array(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArraySlot {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that abort a single dispatch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// First token does not name a registered command
    #[error("Command '{0}' not found")]
    CommandNotFound(String),

    /// A raw value could not be converted to the field's kind
    #[error("Invalid value '{value}' for '{field}': expected {expected}")]
    InvalidFormat {
        field: String,
        value: String,
        expected: ValueKind,
    },

    /// A required positional argument was not supplied
    #[error("Missing required argument '{field}' at position {}", .position + 1)]
    MissingRequiredArgument { field: String, position: usize },

    /// Descriptor references a field the receiver cannot assign
    #[error("Receiver has no field named '{0}'")]
    UnknownField(String),
}

impl DispatchError {
    /// Create an invalid format error
    pub fn invalid_format(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: ValueKind,
    ) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            value: value.into(),
            expected,
        }
    }

    /// Check if the user can fix this by changing the command line
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::UnknownField(_))
    }
}

// ============================================================================
// Boundary
// ============================================================================

/// Error returned from `Command::execute` and produced by a failed dispatch.
///
/// The variant decides the exit status: 1 when the user can fix the
/// command line, 101 when the application or its environment is at fault.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    User(UserError),

    #[error("{0}")]
    System(SystemError),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::User(_) => 1,
            CliError::System(_) => 101,
        }
    }

    /// User error carrying a plain message.
    pub fn user(message: impl Into<String>) -> Self {
        CliError::User(UserError::Message(message.into()))
    }

    /// Internal failure carrying a plain message.
    pub fn system(message: impl Into<String>) -> Self {
        CliError::System(SystemError::Internal(message.into()))
    }
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Error: {0}")]
    Message(String),

    /// Lookup or binding rejected the command line
    #[error("Error: {0}")]
    Dispatch(DispatchError),
}

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Internal Error: {0}\n\nThis is likely a bug.")]
    Internal(String),

    #[error("Internal Error: I/O operation failed\n\n{0}")]
    Io(#[from] std::io::Error),

    /// The command tree was declared incorrectly
    #[error("Internal Error: Invalid command configuration\n\n{0}\n\nThis is likely a bug.")]
    Config(ConfigError),
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::System(e.into())
    }
}

impl From<DispatchError> for CliError {
    fn from(e: DispatchError) -> Self {
        if e.is_user_error() {
            CliError::User(UserError::Dispatch(e))
        } else {
            CliError::System(SystemError::Internal(e.to_string()))
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::System(SystemError::Config(e))
    }
}
