//! # sprig: declarative command trees for CLIs
//!
//! Register named commands (optionally nested up to three subcommands per
//! node), describe each command's input as a plain struct, and let the
//! dispatcher resolve `argv`, bind tokens into typed fields, and run the
//! matching command.
//!
//! ## Core Principles
//!
//! - **Declared inputs**: receivers list their positional arguments and
//!   options once; binding and help text come from the same metadata
//! - **Eager validation**: slot layouts and tree shape are checked at
//!   registration, not on first use
//! - **One boundary**: every dispatch failure becomes a printed message
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sprig::{App, CliResult, Command, Context, Receiver};
//!
//! #[derive(Debug, Default, Receiver)]
//! struct GreetArgs {
//!     #[sprig(position = 0, help = "Who to greet", required)]
//!     name: String,
//!
//!     #[sprig(flag = "-p", help = "Punctuation", default = "!")]
//!     punctuation: String,
//! }
//!
//! struct Greet;
//!
//! #[async_trait::async_trait]
//! impl Command for Greet {
//!     type Receiver = GreetArgs;
//!     type Output = String;
//!
//!     async fn execute(&self, args: GreetArgs, _ctx: &Context) -> CliResult<String> {
//!         Ok(format!("Hello, {}{}", args.name, args.punctuation))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut app = App::new("greeter");
//!     app.register("greet", Greet).unwrap().describe("Say hello");
//!
//!     let response = app.run_env().await;
//!     std::process::exit(response.exit_code);
//! }
//! ```

// Lets code generated by `#[derive(Receiver)]` name `::sprig` inside this crate.
extern crate self as sprig;

pub mod bind;
pub mod build_info;
pub mod coerce;
pub mod command;
pub mod context;
pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod manifest;
pub mod node;
pub mod response;
pub mod tokenizer;
pub mod tracing_support;

// Re-export the derive macro
pub use sprig_macros::Receiver;

pub use bind::bind;
pub use coerce::{coerce, convert, FromValue, Value, ValueKind};
pub use command::{Command, Receiver};
pub use context::Context;
pub use descriptor::{ArgumentSlot, Descriptor, OptionSlot};
pub use dispatcher::{App, AppConfig};
pub use error::{CliError, ConfigError, DispatchError, SystemError, UserError};
pub use manifest::{AppManifest, CommandManifest};
pub use node::{CommandNode, MAX_CHILDREN};
pub use response::{IntoResponse, Output, Response};
pub use tokenizer::{scan, LevelInput, OptionPolicy, Scan};

#[cfg(feature = "tracing")]
pub use tracing_support::{init_subscriber, init_subscriber_with_config, TracingConfig, TracingFormat};

pub use build_info::{version_info, version_short, BuildInfo};

/// Prefix that marks a token as an option.
pub const OPTION_PREFIX: char = '-';

/// Flags that print help, globally or for one command.
pub const HELP_FLAGS: [&str; 2] = ["-h", "--help"];

/// Flags that print the application version.
pub const VERSION_FLAGS: [&str; 2] = ["-v", "--version"];

/// Result of a command's `execute`.
pub type CliResult<T> = Result<T, CliError>;
