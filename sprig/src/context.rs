//! Per-invocation context handed to a command's `execute`.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Payload attached to a command node at registration.
pub(crate) type ContextData = Arc<dyn Any + Send + Sync>;

/// Invocation context.
///
/// Carries the initial data attached to the executing node (if any) and
/// the chain of command names that led to it.
#[derive(Clone, Default)]
pub struct Context {
    data: Option<ContextData>,
    path: Vec<String>,
}

impl Context {
    /// Empty context with no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying `data`.
    pub fn with_data<T: Any + Send + Sync>(data: T) -> Self {
        Self {
            data: Some(Arc::new(data)),
            path: Vec::new(),
        }
    }

    pub(crate) fn for_invocation(data: Option<ContextData>, path: Vec<String>) -> Self {
        Self { data, path }
    }

    /// Borrow the attached data as `T`.
    ///
    /// Returns `None` when nothing is attached or the data is another type.
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.as_deref()?.downcast_ref::<T>()
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Command names from the top-level command down to the executing one.
    pub fn command_path(&self) -> &[String] {
        &self.path
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("has_data", &self.has_data())
            .field("path", &self.path)
            .finish()
    }
}
