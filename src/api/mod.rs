/// Backend API access.
///
/// - `client` - `ApiClient`, the reqwest-backed implementation
///
/// The [`Backend`] trait is the seam the controller talks to, so the view
/// state logic can be driven without a server.
mod client;

pub use client::ApiClient;

use crate::error::ApiResult;
use crate::types::{Note, NoteDraft, Task, TaskDraft};
use async_trait::async_trait;

#[async_trait(?Send)]
pub trait Backend {
    async fn list_notes(&self, token: &str) -> ApiResult<Vec<Note>>;

    async fn create_note(&self, token: &str, draft: &NoteDraft) -> ApiResult<Note>;

    async fn list_tasks(&self, token: &str) -> ApiResult<Vec<Task>>;

    async fn create_task(&self, token: &str, draft: &TaskDraft) -> ApiResult<Task>;

    /// Returns the assistant's reply text.
    async fn send_chat_message(&self, token: &str, message: &str) -> ApiResult<String>;

    /// Unauthenticated liveness probe.
    async fn health(&self) -> ApiResult<()>;
}
