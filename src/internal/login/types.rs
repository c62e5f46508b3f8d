use serde::{Deserialize, Serialize};

use super::error::LoginError;

pub const CODE_OK: i64 = 0;
pub const CODE_BAD_CREDENTIALS: i64 = 1;
pub const CODE_INVALID_REQUEST: i64 = 2;

/// Top-level reply of the login endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    /// Present only when the login succeeded
    #[serde(default)]
    pub data: Option<LoginData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    pub user_id: i64,
    pub account: String,
}

impl ResponseEnvelope {
    pub fn success(data: LoginData) -> Self {
        Self {
            code: CODE_OK,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn failure(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, LoginError> {
        serde_json::from_slice(body).map_err(LoginError::ResponseParse)
    }

    /// The nested record, or `LoginFailed` carrying the reply's code and message
    pub fn into_data(self) -> Result<LoginData, LoginError> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(LoginError::LoginFailed {
                code: self.code,
                msg: self.msg,
            }),
        }
    }
}
