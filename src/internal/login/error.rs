use crate::internal::requester::RequestError;

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("response parse error: {0}")]
    ResponseParse(#[source] serde_json::Error),
    #[error("login failed (code {code}): {msg}")]
    LoginFailed { code: i64, msg: String },
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}
