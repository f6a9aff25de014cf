//! Top-level dispatch.
//!
//! [`App`] owns the registered command tree. A dispatch walks:
//!
//! 1. no arguments: welcome banner
//! 2. leading option: global help / version (anything else is ignored)
//! 3. otherwise: look up the top-level command, scan level by level down
//!    the subcommand chain, bind the leaf's receiver and execute it
//!
//! Every failure along the way is turned into a [`Response`] by
//! [`App::execute`]; nothing escapes as a panic or raw error.

use crate::build_info;
use crate::context::Context;
use crate::descriptor::HELP_COLUMN;
use crate::error::{ConfigError, DispatchError};
use crate::manifest::{AppManifest, CommandManifest};
use crate::node::{validate_name, CommandNode};
use crate::tokenizer::{scan, OptionPolicy, Scan};
use crate::{CliResult, Command, IntoResponse, Response, HELP_FLAGS, OPTION_PREFIX, VERSION_FLAGS};
use indexmap::IndexMap;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, warn};

/// Application-level settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Program name used in help output
    pub name: String,
    /// Printed by `-v` / `--version`
    pub version: String,
    /// Printed when no arguments are given
    pub banner: String,
    pub option_policy: OptionPolicy,
}

impl AppConfig {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            banner: format!("Welcome to {}!", name),
            name,
            version: build_info::version_short().to_string(),
            option_policy: OptionPolicy::default(),
        }
    }
}

/// A command-line application: configuration plus the command tree.
pub struct App {
    config: AppConfig,
    commands: IndexMap<String, CommandNode>,
}

impl App {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(AppConfig::new(name))
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            commands: IndexMap::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    pub fn banner(mut self, banner: impl Into<String>) -> Self {
        self.config.banner = banner.into();
        self
    }

    pub fn option_policy(mut self, policy: OptionPolicy) -> Self {
        self.config.option_policy = policy;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Register a top-level command.
    pub fn register<C: Command>(
        &mut self,
        name: impl Into<String>,
        command: C,
    ) -> Result<&mut CommandNode, ConfigError> {
        let name = name.into();
        validate_name(&name)?;
        if self.commands.contains_key(&name) {
            return Err(ConfigError::DuplicateCommand(name));
        }
        let node = CommandNode::new(name, command)?;
        self.add(node)
    }

    /// Register a node built elsewhere, children included.
    pub fn add(&mut self, node: CommandNode) -> Result<&mut CommandNode, ConfigError> {
        let name = node.name().to_string();
        if self.commands.contains_key(&name) {
            return Err(ConfigError::DuplicateCommand(name));
        }
        debug!(command = %name, "registered");
        Ok(self.commands.entry(name).or_insert(node))
    }

    pub fn command(&self, name: &str) -> Option<&CommandNode> {
        self.commands.get(name)
    }

    pub fn command_mut(&mut self, name: &str) -> Option<&mut CommandNode> {
        self.commands.get_mut(name)
    }

    /// Top-level commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandNode> {
        self.commands.values()
    }

    /// Global help: options, then every top-level command.
    pub fn help(&self) -> String {
        let mut help = String::from("Options:\n");
        help.push_str(&help_row(&HELP_FLAGS.join(", "), "Print help information"));
        help.push_str(&help_row(
            &VERSION_FLAGS.join(", "),
            "Print version information",
        ));

        help.push_str("Commands:\n");
        for node in self.commands.values() {
            help.push_str(&help_row(node.name(), node.description().unwrap_or_default()));
        }

        help.push_str(&format!(
            "\nRun '{} [command] --help' for more information about a command.",
            self.config.name
        ));
        help
    }

    /// Serializable description of the whole tree.
    pub fn manifest(&self) -> AppManifest {
        AppManifest {
            name: self.config.name.clone(),
            version: self.config.version.clone(),
            commands: self
                .commands
                .values()
                .map(CommandManifest::from_node)
                .collect(),
        }
    }

    /// Dispatch `args` (program name excluded) and return the outcome.
    ///
    /// Errors become a response with a non-zero exit code and the error
    /// message as output.
    pub async fn execute<I, S>(&self, args: I) -> Response
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let result = self.dispatch(&args).await;
        if let Err(e) = &result {
            debug!(error = %e, exit_code = e.exit_code(), "dispatch failed");
        }
        result.into_response()
    }

    /// Dispatch `args` and print the response.
    ///
    /// Output goes to stdout, error messages to stderr. The response is
    /// returned so callers can choose to exit with its code.
    pub async fn run<I, S>(&self, args: I) -> Response
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let response = self.execute(args).await;
        if let Err(e) = emit(&response).await {
            error!(error = %e, "failed to write output");
        }
        response
    }

    /// [`App::run`] with the process arguments.
    pub async fn run_env(&self) -> Response {
        self.run(std::env::args().skip(1)).await
    }

    async fn dispatch(&self, args: &[String]) -> CliResult<Response> {
        let Some(first) = args.first() else {
            debug!("no arguments");
            return Ok(Response::text(self.config.banner.clone()));
        };

        if first.starts_with(OPTION_PREFIX) {
            return Ok(self.global_flag(first));
        }

        let mut node = self
            .commands
            .get(first.as_str())
            .ok_or_else(|| DispatchError::CommandNotFound(first.clone()))?;
        let mut tokens = &args[1..];
        let mut path = vec![node.name().to_string()];

        let input = loop {
            match scan(node, tokens, self.config.option_policy) {
                Scan::Help => {
                    debug!(command = %path.join(" "), "help requested");
                    return Ok(Response::text(node.help()));
                }
                Scan::Descend { child, rest } => {
                    debug!(parent = %node.name(), child = %child.name(), "descending");
                    path.push(child.name().to_string());
                    node = child;
                    tokens = rest;
                }
                Scan::Leaf(input) => break input,
            }
        };

        debug!(
            command = %path.join(" "),
            positionals = input.positionals.len(),
            options = input.options.len(),
            "executing"
        );
        let ctx = Context::for_invocation(node.context_data(), path);
        node.executable()
            .invoke(node.descriptor(), &input, &ctx)
            .await
    }

    fn global_flag(&self, flag: &str) -> Response {
        if HELP_FLAGS.contains(&flag) {
            Response::text(self.help())
        } else if VERSION_FLAGS.contains(&flag) {
            Response::text(self.config.version.clone())
        } else {
            warn!(flag = %flag, "ignoring unrecognized global option");
            Response::silent()
        }
    }
}

fn help_row(label: &str, description: &str) -> String {
    format!("\t{:<width$}\t{}\n", label, description, width = HELP_COLUMN)
}

async fn emit(response: &Response) -> std::io::Result<()> {
    let Some(text) = response.output.as_text() else {
        return Ok(());
    };
    let mut text = text.to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }

    if response.is_success() {
        let mut out = tokio::io::stdout();
        out.write_all(text.as_bytes()).await?;
        out.flush().await
    } else {
        let mut err = tokio::io::stderr();
        err.write_all(text.as_bytes()).await?;
        err.flush().await
    }
}
