pub mod convert;
pub mod echo;
pub mod guid;

pub use convert::{ConvertCommand, TimeToTimestamp, TimestampToTime};
pub use echo::EchoCommand;
pub use guid::GuidCommand;
