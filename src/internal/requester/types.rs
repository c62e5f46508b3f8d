// src/internal/requester/types.rs

use std::collections::{BTreeMap, HashMap};

/// Header name to value, every entry is appended to the outgoing request
pub type HeaderSet = HashMap<String, String>;

/// Form fields; sorted so the encoded body is stable
pub type FormParams = BTreeMap<String, String>;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP response structure
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
    pub headers: HashMap<String, String>,
}

impl HttpResponse {
    pub fn new(status_code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status_code,
            body: body.into(),
            headers: HashMap::new(),
        }
    }

    /// Consume the response, keeping only the raw body
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}
