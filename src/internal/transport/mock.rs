use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use super::Transport;
use crate::internal::requester::{HttpResponse, RequestError};

/// What the mock saw for one request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Mock transport for testing - serves queued responses and captures requests.
/// Once the queue is empty it answers `200` with an empty body.
#[derive(Clone, Default)]
pub struct MockTransport {
    /// Queued responses, served in order
    pub responses: Arc<Mutex<VecDeque<HttpResponse>>>,
    /// Captured requests
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to be returned
    pub fn queue_response(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Queue a `200` response with a JSON body
    pub fn queue_json(&self, body: &serde_json::Value) {
        let body = serde_json::to_vec(body).unwrap();
        self.queue_response(HttpResponse::new(200, body));
    }

    /// Get all captured requests
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: reqwest::Request) -> Result<HttpResponse, RequestError> {
        let recorded = RecordedRequest {
            method: request.method().to_string(),
            url: request.url().to_string(),
            headers: request
                .headers()
                .iter()
                .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
                .collect(),
            body: request.body().and_then(|b| b.as_bytes()).map(|b| b.to_vec()),
        };
        debug!("[MockTransport] execute: {} {}", recorded.method, recorded.url);
        self.requests.lock().unwrap().push(recorded);

        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| HttpResponse::new(200, Vec::new()));
        Ok(response)
    }
}
