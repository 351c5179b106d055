//! Answer Service HTTP client: one `POST {question}` per call, `{answer}` back.
//! No timeout and no retry; a call that never settles keeps the widget in `Sending`.

use std::future::Future;

use crate::messages::{AnswerResponse, ChatRequest, ErrorBody};

/// Error message used when a non-2xx body carries no `detail`.
pub const API_ERROR_FALLBACK: &str = "Ocorreu um erro na API.";

/// A successful reply from the Answer Service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<String>,
}

/// Anything that turns a question into an [`Answer`].
pub trait AnswerService {
    fn ask(&self, question: &str) -> impl Future<Output = Result<Answer, ClientError>> + Send;
}

/// Answer Service failure. `Display` is the text the widget shows after `"Erro: "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The HTTP exchange did not complete (connect, DNS, reset).
    Transport(String),
    /// The service answered with a non-2xx status.
    Api { status: u16, message: String },
    /// A 2xx body that is not a valid answer.
    Decode(String),
}

impl ClientError {
    fn transport(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(s) | ClientError::Decode(s) => write!(f, "{}", s),
            ClientError::Api { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

/// HTTP client bound to one endpoint. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AnswerClient {
    http: reqwest::Client,
    url: String,
    session_id: Option<String>,
}

impl AnswerClient {
    pub fn new(url: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            session_id,
        }
    }

    pub fn from_config(config: &crate::Config) -> Self {
        Self::new(config.api_url(), config.session_id().map(str::to_string))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Post `question` and wait for the reply.
    pub async fn ask(&self, question: &str) -> Result<Answer, ClientError> {
        let body = ChatRequest::new(question, self.session_id.as_deref());
        tracing::debug!(url = %self.url, "posting question");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::transport)?;

        if !status.is_success() {
            let message = ErrorBody::from_bytes(&bytes)
                .detail
                .unwrap_or_else(|| API_ERROR_FALLBACK.to_string());
            tracing::warn!(status = status.as_u16(), %message, "answer service returned an error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnswerResponse = serde_json::from_slice(&bytes)?;
        Ok(Answer {
            text: parsed.answer,
            sources: parsed.source.unwrap_or_default(),
        })
    }
}

impl AnswerService for AnswerClient {
    fn ask(&self, question: &str) -> impl Future<Output = Result<Answer, ClientError>> + Send {
        AnswerClient::ask(self, question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let e = ClientError::Api {
            status: 500,
            message: "Service unavailable".into(),
        };
        assert_eq!(e.to_string(), "Service unavailable");
        assert_eq!(
            ClientError::Transport("connection refused".into()).to_string(),
            "connection refused"
        );
    }

    #[test]
    fn from_config_uses_default_url() {
        let client = AnswerClient::from_config(&crate::Config::default());
        assert_eq!(client.url(), crate::DEFAULT_API_URL);
    }
}
