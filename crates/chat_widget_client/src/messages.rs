//! JSON bodies exchanged with the Answer Service (`POST {question}` → `{answer}`).

use serde::{Deserialize, Serialize};

/// Client → service: question body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

impl<'a> ChatRequest<'a> {
    pub fn new(question: &'a str, session_id: Option<&'a str>) -> Self {
        Self {
            question,
            session_id,
        }
    }
}

/// Service → client: successful answer.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
    /// Documents the answer was drawn from, when the service reports them.
    #[serde(default)]
    pub source: Option<Vec<String>>,
}

/// Service → client: error payload on a non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Lenient parse: anything that is not JSON with a string `detail` has no detail.
    pub fn from_bytes(body: &[u8]) -> Self {
        let value: serde_json::Value = match serde_json::from_slice(body) {
            Ok(v) => v,
            Err(_) => return Self::default(),
        };
        let detail = value
            .get("detail")
            .and_then(|d| d.as_str())
            .map(|s| s.to_string());
        Self { detail }
    }
}
