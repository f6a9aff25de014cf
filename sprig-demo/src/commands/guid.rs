use async_trait::async_trait;
use sprig::{CliResult, Command, Context};
use uuid::Uuid;

/// Prints a random (v4) UUID.
pub struct GuidCommand;

#[async_trait]
impl Command for GuidCommand {
    type Receiver = ();
    type Output = String;

    async fn execute(&self, _receiver: (), _ctx: &Context) -> CliResult<String> {
        Ok(Uuid::new_v4().to_string())
    }
}
