use async_trait::async_trait;
use sprig::{CliResult, Command, Context, Receiver};

#[derive(Debug, Default, Receiver)]
pub struct EchoArgs {
    #[sprig(position = 0, help = "First argument")]
    pub first: Option<String>,

    #[sprig(position = 1, help = "Second argument")]
    pub second: Option<String>,

    #[sprig(flag = "-o", help = "Test option")]
    pub option: Option<String>,
}

/// Echoes what was bound, for trying out the tokenizer by hand.
pub struct EchoCommand;

#[async_trait]
impl Command for EchoCommand {
    type Receiver = EchoArgs;
    type Output = String;

    async fn execute(&self, args: EchoArgs, _ctx: &Context) -> CliResult<String> {
        Ok(format!(
            "Argument 1: {}\nArgument 2: {}\nOption -o: {}",
            args.first.unwrap_or_default(),
            args.second.unwrap_or_default(),
            args.option.unwrap_or_default()
        ))
    }
}
