// src/internal/server/handler.rs

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Method, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tracing::{debug, info};

use crate::internal::login::types::{CODE_BAD_CREDENTIALS, CODE_INVALID_REQUEST};
use crate::internal::login::{LoginData, ResponseEnvelope};
use crate::internal::requester::{FORM_CONTENT_TYPE, JSON_CONTENT_TYPE};

/// An account the mock login endpoint accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockUser {
    pub user_id: i64,
    pub account: String,
    pub password: String,
}

impl MockUser {
    pub fn new(user_id: i64, account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id,
            account: account.into(),
            password: password.into(),
        }
    }
}

impl Default for MockUser {
    fn default() -> Self {
        Self::new(10000, "snai", "snai")
    }
}

/// Credentials as sent by either demonstration: form sends `account`,
/// JSON sends `user_id`
#[derive(Debug, Deserialize)]
struct LoginAttempt {
    #[serde(default)]
    user_id: Option<i64>,
    #[serde(default)]
    account: Option<String>,
    password: String,
}

/// What `/inspect` saw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectedRequest {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// Handler builds the mock router and its middleware stack
#[derive(Clone)]
pub struct Handler {
    users: Arc<Vec<MockUser>>,
}

impl Handler {
    pub fn new(users: Vec<MockUser>) -> Self {
        Self {
            users: Arc::new(users),
        }
    }

    pub fn create_http_router(&self) -> Router {
        let router = Router::new()
            .route("/health", get(|| async { "OK" }))
            .route("/user/login", post(Self::login))
            .route("/echo", post(Self::echo))
            .route("/inspect", axum::routing::any(Self::inspect))
            .with_state(self.clone())
            .layer(ServiceBuilder::new().layer(middleware::from_fn(Self::log_requests)));

        info!("Mock login router created with {} users", self.users.len());
        router
    }

    /// Accepts form or JSON credentials, chosen by Content-Type
    async fn login(
        State(handler): State<Handler>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Json<ResponseEnvelope> {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        let attempt: Option<LoginAttempt> = if content_type.starts_with(JSON_CONTENT_TYPE) {
            serde_json::from_slice(&body).ok()
        } else if content_type.starts_with(FORM_CONTENT_TYPE) {
            serde_urlencoded::from_bytes(&body).ok()
        } else {
            None
        };

        let Some(attempt) = attempt else {
            debug!("Unreadable login body with content type '{}'", content_type);
            return Json(ResponseEnvelope::failure(CODE_INVALID_REQUEST, "invalid request"));
        };

        if attempt.user_id.is_none() && attempt.account.is_none() {
            return Json(ResponseEnvelope::failure(CODE_INVALID_REQUEST, "invalid request"));
        }

        Json(handler.authenticate(&attempt))
    }

    fn authenticate(&self, attempt: &LoginAttempt) -> ResponseEnvelope {
        let user = self.users.iter().find(|user| {
            let id_matches = attempt.user_id == Some(user.user_id);
            let account_matches = attempt.account.as_deref() == Some(user.account.as_str());
            (id_matches || account_matches) && user.password == attempt.password
        });

        match user {
            Some(user) => ResponseEnvelope::success(LoginData {
                user_id: user.user_id,
                account: user.account.clone(),
            }),
            None => ResponseEnvelope::failure(CODE_BAD_CREDENTIALS, "bad credentials"),
        }
    }

    /// Replies with the received body and content type
    async fn echo(headers: HeaderMap, body: Bytes) -> impl IntoResponse {
        let mut reply = HeaderMap::new();
        if let Some(content_type) = headers.get(CONTENT_TYPE) {
            reply.insert(CONTENT_TYPE, content_type.clone());
        }
        (reply, body)
    }

    /// Reports method, headers and body of the request as JSON
    async fn inspect(method: Method, headers: HeaderMap, body: Bytes) -> Json<InspectedRequest> {
        let headers = headers
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();

        Json(InspectedRequest {
            method: method.to_string(),
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    /// Middleware to log HTTP requests
    async fn log_requests(request: Request<Body>, next: Next) -> Response {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let version = request.version();

        debug!("→ {} {} {:?}", method, uri, version);

        let response = next.run(request).await;

        debug!("← {} {}", response.status(), uri);

        response
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new(vec![MockUser::default()])
    }
}
