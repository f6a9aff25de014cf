//! Command and receiver contracts.

use crate::bind::bind;
use crate::coerce::Value;
use crate::context::Context;
use crate::descriptor::Descriptor;
use crate::error::DispatchError;
use crate::tokenizer::LevelInput;
use crate::{CliResult, IntoResponse, Response};
use async_trait::async_trait;

/// Data type populated from the command line before a command runs.
///
/// Usually derived with `#[derive(Receiver)]`; a hand-written impl lists
/// the slots in [`Receiver::descriptor`] and routes each field name to
/// its field in [`Receiver::assign`].
pub trait Receiver: Default + Send + 'static {
    /// Slot metadata for this type.
    fn descriptor() -> Descriptor;

    /// Store a coerced value into the field named `field`.
    fn assign(&mut self, field: &str, value: Value) -> Result<(), DispatchError>;
}

/// Parameterless commands use `()` as their receiver.
impl Receiver for () {
    fn descriptor() -> Descriptor {
        Descriptor::new()
    }

    fn assign(&mut self, field: &str, _value: Value) -> Result<(), DispatchError> {
        Err(DispatchError::UnknownField(field.to_string()))
    }
}

/// An executable command.
///
/// The dispatcher builds a fresh `Self::Receiver` for every invocation and
/// moves it into `execute`.
#[async_trait]
pub trait Command: Send + Sync + 'static {
    type Receiver: Receiver;
    type Output: IntoResponse + Send;

    async fn execute(&self, receiver: Self::Receiver, ctx: &Context) -> CliResult<Self::Output>;
}

/// Type-erased command stored in the tree.
#[async_trait]
pub(crate) trait Executable: Send + Sync {
    async fn invoke(
        &self,
        descriptor: &Descriptor,
        input: &LevelInput,
        ctx: &Context,
    ) -> CliResult<Response>;
}

pub(crate) struct Erased<C>(pub(crate) C);

#[async_trait]
impl<C: Command> Executable for Erased<C> {
    async fn invoke(
        &self,
        descriptor: &Descriptor,
        input: &LevelInput,
        ctx: &Context,
    ) -> CliResult<Response> {
        let receiver = bind::<C::Receiver>(descriptor, input)?;
        let output = self.0.execute(receiver, ctx).await?;
        Ok(output.into_response())
    }
}
