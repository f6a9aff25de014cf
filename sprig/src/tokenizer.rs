//! Per-level token scanning.
//!
//! Each dispatch level sees the tokens that follow its command name. The
//! scan either stops at a help flag, hands the rest to a matching
//! subcommand, or collects positionals and option values for the level.

use crate::node::CommandNode;
use crate::{HELP_FLAGS, OPTION_PREFIX};
use indexmap::IndexMap;
use tracing::trace;

/// How many options a single level binds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OptionPolicy {
    /// The first option and its value end the scan; later tokens are dropped.
    #[default]
    Single,

    /// Options may be interleaved with positionals; each consumes one value.
    Multiple,
}

/// Tokens collected for the level that will execute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelInput {
    pub positionals: Vec<String>,
    /// Flag to raw value; the first occurrence of a flag wins
    pub options: IndexMap<String, String>,
}

impl LevelInput {
    pub fn option(&self, flag: &str) -> Option<&str> {
        self.options.get(flag).map(String::as_str)
    }
}

/// Outcome of scanning one level.
#[derive(Debug)]
pub enum Scan<'a> {
    /// Help flag as the level's first token
    Help,

    /// A child command matched; `rest` follows its name
    Descend {
        child: &'a CommandNode,
        rest: &'a [String],
    },

    /// No child matched; this node executes
    Leaf(LevelInput),
}

pub fn is_help_flag(token: &str) -> bool {
    HELP_FLAGS.contains(&token)
}

/// Scan `tokens` for `node`.
pub fn scan<'a>(node: &'a CommandNode, tokens: &'a [String], policy: OptionPolicy) -> Scan<'a> {
    let mut input = LevelInput::default();
    let mut index = 0;

    while let Some(token) = tokens.get(index) {
        if token.starts_with(OPTION_PREFIX) {
            if index == 0 && is_help_flag(token) {
                return Scan::Help;
            }

            match tokens.get(index + 1) {
                Some(value) => {
                    trace!(flag = %token, value = %value, "option");
                    input
                        .options
                        .entry(token.clone())
                        .or_insert_with(|| value.clone());

                    if policy == OptionPolicy::Single {
                        if index + 2 < tokens.len() {
                            trace!(dropped = tokens.len() - index - 2, "tokens after option ignored");
                        }
                        break;
                    }
                    index += 2;
                }
                // Trailing flag without a value
                None => index += 1,
            }
            continue;
        }

        if let Some(child) = node.find_child(token) {
            return Scan::Descend {
                child,
                rest: &tokens[index + 1..],
            };
        }

        trace!(position = input.positionals.len(), value = %token, "positional");
        input.positionals.push(token.clone());
        index += 1;
    }

    Scan::Leaf(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::context::Context;
    use crate::CliResult;
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl Command for Noop {
        type Receiver = ();
        type Output = ();

        async fn execute(&self, _receiver: (), _ctx: &Context) -> CliResult<()> {
            Ok(())
        }
    }

    fn tree() -> CommandNode {
        let mut root = CommandNode::new("convert", Noop).unwrap();
        root.child(|| CommandNode::new("ts", Noop)).unwrap();
        root
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn leaf(scan: Scan<'_>) -> LevelInput {
        match scan {
            Scan::Leaf(input) => input,
            other => panic!("expected leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_positionals_only() {
        let root = tree();
        let args = tokens(&["a", "b"]);
        let input = leaf(scan(&root, &args, OptionPolicy::Single));
        assert_eq!(input.positionals, ["a", "b"]);
        assert!(input.options.is_empty());
    }

    #[test]
    fn test_help_only_as_first_token() {
        let root = tree();
        let first = tokens(&["-h"]);
        assert!(matches!(scan(&root, &first, OptionPolicy::Single), Scan::Help));
        let long = tokens(&["--help", "ignored"]);
        assert!(matches!(scan(&root, &long, OptionPolicy::Single), Scan::Help));

        // Not first: treated as an ordinary option taking a value
        let later = tokens(&["a", "-h", "x"]);
        let input = leaf(scan(&root, &later, OptionPolicy::Single));
        assert_eq!(input.option("-h"), Some("x"));
    }

    #[test]
    fn test_single_option_stops_scanning() {
        let root = tree();
        let args = tokens(&["a", "-f", "ms", "b", "ts"]);
        let input = leaf(scan(&root, &args, OptionPolicy::Single));
        assert_eq!(input.positionals, ["a"]);
        assert_eq!(input.option("-f"), Some("ms"));
        assert_eq!(input.options.len(), 1);
    }

    #[test]
    fn test_multiple_options_continue_scanning() {
        let root = tree();
        let args = tokens(&["-f", "ms", "a", "-o", "x", "-f", "s", "b"]);
        let input = leaf(scan(&root, &args, OptionPolicy::Multiple));
        assert_eq!(input.positionals, ["a", "b"]);
        assert_eq!(input.option("-f"), Some("ms"));
        assert_eq!(input.option("-o"), Some("x"));
    }

    #[test]
    fn test_trailing_option_without_value_ignored() {
        let root = tree();
        let args = tokens(&["a", "-f"]);
        let input = leaf(scan(&root, &args, OptionPolicy::Single));
        assert_eq!(input.positionals, ["a"]);
        assert!(input.options.is_empty());
    }

    #[test]
    fn test_child_match_descends_with_rest() {
        let root = tree();
        let args = tokens(&["x", "ts", "2024-01-01", "-f", "ms"]);
        match scan(&root, &args, OptionPolicy::Single) {
            Scan::Descend { child, rest } => {
                assert_eq!(child.name(), "ts");
                assert_eq!(rest, ["2024-01-01", "-f", "ms"]);
            }
            other => panic!("expected descend, got {:?}", other),
        }
    }

    #[test]
    fn test_option_value_is_not_a_child_name() {
        let root = tree();
        let args = tokens(&["-f", "ts"]);
        let input = leaf(scan(&root, &args, OptionPolicy::Single));
        assert_eq!(input.option("-f"), Some("ts"));
    }
}
