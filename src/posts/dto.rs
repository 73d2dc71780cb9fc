use serde::{Deserialize, Serialize};

/// Body for post creation and for commenting. `name`/`avatar` are the
/// author's display snapshot supplied by the client.
#[derive(Debug, Deserialize)]
pub struct PostBody {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}
