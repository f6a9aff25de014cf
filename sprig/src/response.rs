//! What a dispatch hands back to the process.

use crate::CliResult;
use std::fmt;

/// Outcome of one dispatch: exit status plus whatever should be printed.
#[derive(Debug)]
pub struct Response {
    /// 0 on success, 1 for user errors, 101 for system errors
    pub exit_code: i32,
    pub output: Output,
}

impl Response {
    /// Successful response printing `content` to stdout.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            output: Output::Text(content.into()),
        }
    }

    /// Successful response that prints nothing.
    pub fn silent() -> Self {
        Self {
            exit_code: 0,
            output: Output::Silent,
        }
    }

    /// Failed response; `message` goes to stderr.
    pub fn error(exit_code: i32, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            output: Output::Text(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Silent,
    /// Printed to stdout on success and to stderr on failure
    Text(String),
}

impl Output {
    pub fn is_empty(&self) -> bool {
        matches!(self, Output::Silent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            Output::Silent => None,
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text().unwrap_or_default())
    }
}

/// Values a command may return from `execute`.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

/// Commands that only have side effects print nothing.
impl IntoResponse for () {
    fn into_response(self) -> Response {
        Response::silent()
    }
}

impl<T: IntoResponse> IntoResponse for CliResult<T> {
    fn into_response(self) -> Response {
        self.map_or_else(
            |e| Response::error(e.exit_code(), e.to_string()),
            IntoResponse::into_response,
        )
    }
}
