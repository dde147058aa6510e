//! Error types for the client.
//!
//! Transport and provider errors carry detail for the logs. What the user
//! sees is always one of the fixed [`Failure`] messages.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("sign-in was cancelled")]
    Cancelled,

    #[error("identity provider error: {0}")]
    Provider(String),

    #[error("could not read identity provider response: {0}")]
    Payload(String),
}

/// User-facing failure categories. Each maps to one fixed banner message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    SignIn,
    LoadNotes,
    CreateNote,
    LoadTasks,
    CreateTask,
    Assistant,
}

impl Failure {
    pub fn message(self) -> &'static str {
        match self {
            Failure::SignIn => "Failed to sign in. Check the logs for details.",
            Failure::LoadNotes => "Failed to load notes.",
            Failure::CreateNote => "Failed to create note.",
            Failure::LoadTasks => "Failed to load tasks.",
            Failure::CreateTask => "Failed to create task.",
            Failure::Assistant => "Assistant failed to respond.",
        }
    }
}
