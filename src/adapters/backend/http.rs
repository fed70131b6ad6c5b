//! HTTP adapter for the chat service.
//!
//! `POST <server_url>/<chat_path>` with `{"message": ...}`, expects `{"answer": ...}`.
//! `GET <server_url>/` for health. No timeout and no retry on either call.

use crate::domain::{ChatReply, ChatRequest, DomainError, HealthStatus, OutgoingMessage};
use crate::ports::ChatBackend;
use reqwest::Url;
use tracing::{debug, warn};

/// Resolve the chat and health URLs. Both stay under any path carried by
/// `server_url`; a leading `/` on `chat_path` does not escape it.
pub fn endpoint_urls(server_url: &str, chat_path: &str) -> Result<(Url, Url), DomainError> {
    let mut base = Url::parse(server_url)
        .map_err(|e| DomainError::Config(format!("invalid server url {server_url}: {e}")))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let chat_url = base
        .join(chat_path.trim_start_matches('/'))
        .map_err(|e| DomainError::Config(format!("invalid chat path {chat_path}: {e}")))?;
    Ok((chat_url, base))
}

pub struct HttpChatBackend {
    client: reqwest::Client,
    chat_url: Url,
    health_url: Url,
}

impl HttpChatBackend {
    /// Create a backend for the service at `server_url`.
    ///
    /// # Arguments
    /// * `server_url` - Service base (e.g., "http://127.0.0.1:8000" or "http://host/api")
    /// * `chat_path` - Path of the chat endpoint under the base (e.g., "/chat" or "chat")
    pub fn new(server_url: &str, chat_path: &str) -> Result<Self, DomainError> {
        let (chat_url, health_url) = endpoint_urls(server_url, chat_path)?;
        Ok(Self {
            client: reqwest::Client::new(),
            chat_url,
            health_url,
        })
    }

    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }

    /// Turn a non-success response into `DomainError::Status` with a short body excerpt.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, DomainError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %text, "chat service returned error");
        Err(DomainError::Status {
            status: status.as_u16(),
            body: text.chars().take(200).collect(),
        })
    }
}

#[async_trait::async_trait]
impl ChatBackend for HttpChatBackend {
    async fn ask(&self, message: &OutgoingMessage) -> Result<ChatReply, DomainError> {
        let request = ChatRequest {
            message: message.as_str().to_string(),
        };

        let response = self
            .client
            .post(self.chat_url.clone())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("HTTP request failed: {}", e)))?;

        let response = Self::check_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to read response body: {}", e)))?;

        let reply: ChatReply = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, body = %body.chars().take(200).collect::<String>(), "JSON parse failed");
            DomainError::Decode(e.to_string())
        })?;

        debug!(answer_len = reply.answer.len(), "decoded chat reply");
        Ok(reply)
    }

    async fn health(&self) -> Result<HealthStatus, DomainError> {
        let response = self
            .client
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("HTTP request failed: {}", e)))?;

        let response = Self::check_status(response).await?;

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| DomainError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};

    async fn chat_echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        Json(json!({
            "question": body["message"],
            "answer": format!("{} | {}", body["message"].as_str().unwrap_or_default(), content_type),
        }))
    }

    async fn health_ok() -> Json<Value> {
        Json(json!({ "status": "healthy", "service": "test" }))
    }

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn msg(text: &str) -> OutgoingMessage {
        OutgoingMessage::new(text).unwrap()
    }

    #[tokio::test]
    async fn test_ask_posts_json_and_decodes_answer() {
        let url = spawn_server(
            Router::new()
                .route("/chat", post(chat_echo))
                .route("/", get(health_ok)),
        )
        .await;
        let backend = HttpChatBackend::new(&url, "/chat").unwrap();

        let reply = backend.ask(&msg("<b>hi</b>")).await.unwrap();

        assert_eq!(reply.answer, "<b>hi</b> | application/json");
        assert_eq!(reply.question.as_deref(), Some("<b>hi</b>"));
    }

    #[tokio::test]
    async fn test_health_decodes_status() {
        let url = spawn_server(Router::new().route("/", get(health_ok))).await;
        let backend = HttpChatBackend::new(&url, "/chat").unwrap();

        let health = backend.health().await.unwrap();

        assert!(health.is_healthy());
        assert_eq!(health.service, "test");
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let url = spawn_server(Router::new().route("/chat", post(|| async { "plain text" }))).await;
        let backend = HttpChatBackend::new(&url, "/chat").unwrap();

        let err = backend.ask(&msg("hi")).await.unwrap_err();

        assert!(matches!(err, DomainError::Decode(_)));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let url = spawn_server(Router::new().route(
            "/chat",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        ))
        .await;
        let backend = HttpChatBackend::new(&url, "/chat").unwrap();

        let err = backend.ask(&msg("hi")).await.unwrap_err();

        assert!(matches!(err, DomainError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let backend = HttpChatBackend::new("http://127.0.0.1:1", "/chat").unwrap();

        let err = backend.ask(&msg("hi")).await.unwrap_err();

        assert!(matches!(err, DomainError::Transport(_)));
    }

    #[test]
    fn test_urls_are_joined_onto_base() {
        let backend = HttpChatBackend::new("http://127.0.0.1:8000", "/chat").unwrap();
        assert_eq!(backend.chat_url().as_str(), "http://127.0.0.1:8000/chat");
        assert_eq!(backend.health_url.as_str(), "http://127.0.0.1:8000/");
        assert!(HttpChatBackend::new("not a url", "/chat").is_err());
    }

    #[test]
    fn test_base_path_is_kept() {
        for (base, path) in [
            ("http://10.0.0.5:9000/api", "/chat"),
            ("http://10.0.0.5:9000/api/", "chat"),
            ("http://10.0.0.5:9000/api", "chat"),
        ] {
            let (chat, health) = endpoint_urls(base, path).unwrap();
            assert_eq!(chat.as_str(), "http://10.0.0.5:9000/api/chat");
            assert_eq!(health.as_str(), "http://10.0.0.5:9000/api/");
        }
        let (chat, _) = endpoint_urls("http://127.0.0.1:8000", "chat").unwrap();
        assert_eq!(chat.as_str(), "http://127.0.0.1:8000/chat");
    }

    #[tokio::test]
    async fn test_displayed_url_is_the_one_requested() {
        let url = spawn_server(
            Router::new()
                .route("/api/chat", post(chat_echo))
                .route("/api/", get(health_ok)),
        )
        .await;
        let backend = HttpChatBackend::new(&format!("{url}/api"), "/chat").unwrap();

        assert_eq!(backend.chat_url().as_str(), format!("{url}/api/chat"));
        let reply = backend.ask(&msg("hi")).await.unwrap();
        assert_eq!(reply.answer, "hi | application/json");
        assert!(backend.health().await.unwrap().is_healthy());
    }
}
