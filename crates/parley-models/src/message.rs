use serde::{Deserialize, Serialize};

/// Response code carried by every successful reply.
pub const CODE_SUCCESS: i32 = 0;
pub const MSG_SUCCESS: &str = "success";

/// A message as seen by callers of the pull endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub chat: String,
    pub text: String,
    pub sender: String,
    /// Unix seconds at which the server accepted the message.
    pub send_time: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendRequest {
    pub chat: String,
    pub text: String,
    pub sender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResponse {
    pub code: i32,
    pub msg: String,
}

impl SendResponse {
    pub fn success() -> Self {
        Self {
            code: CODE_SUCCESS,
            msg: MSG_SUCCESS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub chat: String,
    #[serde(default)]
    pub cursor: i64,
    #[serde(default)]
    pub limit: i32,
    #[serde(default)]
    pub reverse: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullResponse {
    pub code: i32,
    pub msg: String,
    pub messages: Vec<Message>,
    pub has_more: bool,
    pub next_cursor: i64,
}

impl PullResponse {
    pub fn success(messages: Vec<Message>, has_more: bool, next_cursor: i64) -> Self {
        Self {
            code: CODE_SUCCESS,
            msg: MSG_SUCCESS.to_string(),
            messages,
            has_more,
            next_cursor,
        }
    }
}
