use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Answer payload from `/api/query`. The field is optional so that a
/// well-formed JSON object of any other shape still deserializes; a
/// missing answer is handled at the display layer.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub answer: Option<String>,
}
