mod commands;
mod time;

use commands::{ConvertCommand, EchoCommand, GuidCommand, TimeToTimestamp, TimestampToTime};
use sprig::{init_subscriber, App, CliError, CommandNode, ConfigError};

// ============================================
// Command Tree
// ============================================

fn build_app() -> Result<App, ConfigError> {
    let mut app = App::new("sprig");

    app.register("uuid", GuidCommand)?
        .describe("Generate a random UUID");

    app.register("test", EchoCommand)?
        .describe("Echo two arguments and the -o option");

    app.register("convert", ConvertCommand)?
        .describe("Convert between local times and Unix timestamps")
        .child(|| {
            Ok(CommandNode::new("ts", TimeToTimestamp)?
                .with_description("Convert a local time to a timestamp"))
        })?
        .child(|| {
            Ok(CommandNode::new("time", TimestampToTime)?
                .with_description("Convert a timestamp to local time"))
        })?;

    Ok(app)
}

// ============================================
// Main Entry Point
// ============================================

#[tokio::main]
async fn main() {
    init_subscriber();

    let app = match build_app() {
        Ok(app) => app,
        Err(e) => {
            let err = CliError::from(e);
            eprintln!("{}", err);
            std::process::exit(err.exit_code());
        }
    };

    let response = app.run_env().await;
    std::process::exit(response.exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_tree_builds() {
        let app = build_app().unwrap();
        let names: Vec<&str> = app.commands().map(CommandNode::name).collect();
        assert_eq!(names, ["uuid", "test", "convert"]);

        let convert = app.command("convert").unwrap();
        let children: Vec<&str> = convert.children().map(CommandNode::name).collect();
        assert_eq!(children, ["ts", "time"]);
    }
}
