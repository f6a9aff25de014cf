//! `convert ts` and `convert time`.

use crate::time::{self, Unit};
use async_trait::async_trait;
use sprig::{CliResult, Command, Context, Receiver};

/// Group node for the conversion subcommands; does nothing on its own.
pub struct ConvertCommand;

#[async_trait]
impl Command for ConvertCommand {
    type Receiver = ();
    type Output = ();

    async fn execute(&self, _receiver: (), _ctx: &Context) -> CliResult<()> {
        Ok(())
    }
}

#[derive(Debug, Default, Receiver)]
pub struct TimeArgs {
    #[sprig(position = 0, help = "Time or timestamp to convert", required)]
    pub value: String,

    /// Read by `ts` only; `time` takes the unit from the digit count
    #[sprig(
        flag = "-f",
        help = "Timestamp unit <s|ms> for ts; time infers it from the digit count",
        default = "s"
    )]
    pub format: String,
}

pub struct TimeToTimestamp;

#[async_trait]
impl Command for TimeToTimestamp {
    type Receiver = TimeArgs;
    type Output = String;

    async fn execute(&self, args: TimeArgs, _ctx: &Context) -> CliResult<String> {
        let unit: Unit = args.format.parse()?;
        let ts = time::to_timestamp(&args.value, unit)?;
        Ok(ts.to_string())
    }
}

pub struct TimestampToTime;

#[async_trait]
impl Command for TimestampToTime {
    type Receiver = TimeArgs;
    type Output = String;

    async fn execute(&self, args: TimeArgs, _ctx: &Context) -> CliResult<String> {
        let local = time::from_timestamp(&args.value)?;
        Ok(time::format_local(&local))
    }
}
