use super::Backend;
use crate::error::{ApiError, ApiResult};
use crate::types::{Note, NoteDraft, Task, TaskDraft};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    reply: String,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

/// HTTP client for the notes/tasks backend at a single origin.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, token: &str, path: &str) -> ApiResult<T> {
        tracing::debug!(path, "GET");
        let request = self.client.get(self.url(path)).bearer_auth(token);
        read_json(request).await
    }

    async fn post_json<B, T>(&self, token: &str, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let request = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body);
        read_json(request).await
    }
}

async fn read_json<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status { status, body });
    }
    Ok(serde_json::from_str(&body)?)
}

#[async_trait(?Send)]
impl Backend for ApiClient {
    async fn list_notes(&self, token: &str) -> ApiResult<Vec<Note>> {
        self.get_json(token, "/notes").await
    }

    async fn create_note(&self, token: &str, draft: &NoteDraft) -> ApiResult<Note> {
        self.post_json(token, "/notes", draft).await
    }

    async fn list_tasks(&self, token: &str) -> ApiResult<Vec<Task>> {
        self.get_json(token, "/tasks").await
    }

    async fn create_task(&self, token: &str, draft: &TaskDraft) -> ApiResult<Task> {
        self.post_json(token, "/tasks", draft).await
    }

    async fn send_chat_message(&self, token: &str, message: &str) -> ApiResult<String> {
        let response: ChatResponse = self
            .post_json(token, "/assistant/chat", &ChatRequest { message })
            .await?;
        Ok(response.reply)
    }

    async fn health(&self) -> ApiResult<()> {
        let response = self.client.get(self.url("/health")).send().await?;
        let status = response.status();
        let body = response.text().await?;
        match serde_json::from_str::<HealthResponse>(&body) {
            Ok(parsed) if status.is_success() && parsed.status == "ok" => Ok(()),
            _ => Err(ApiError::Status { status, body }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_onto_normalised_origin() {
        let api = ApiClient::new("http://127.0.0.1:8000/");
        assert_eq!(api.base_url(), "http://127.0.0.1:8000");
        assert_eq!(api.url("/notes"), "http://127.0.0.1:8000/notes");
    }
}
