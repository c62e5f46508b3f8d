// src/internal/requester/http_requester.rs

use anyhow::Result;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::Serialize;
use tracing::{debug, info};

use super::error::RequestError;
use super::types::{FormParams, HeaderSet, HttpResponse, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE};
use crate::internal::config::TargetConfig;
use crate::internal::transport::{ReqwestTransport, Transport};

/// HttpRequester handles request building; execution is delegated to its transport
#[derive(Clone)]
pub struct HttpRequester<T = ReqwestTransport> {
    transport: T,
}

impl HttpRequester<ReqwestTransport> {
    /// Create a requester over a reqwest client configured from the target settings
    pub fn new(target_cfg: &TargetConfig) -> Result<Self> {
        Ok(Self {
            transport: ReqwestTransport::from_config(target_cfg)?,
        })
    }
}

impl<T: Transport> HttpRequester<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Send `params` as an `application/x-www-form-urlencoded` body.
    /// Without params the request carries no body.
    pub async fn send_form(
        &self,
        method: &str,
        url: &str,
        headers: Option<&HeaderSet>,
        params: Option<&FormParams>,
    ) -> Result<HttpResponse, RequestError> {
        if url.is_empty() {
            return Err(RequestError::EmptyUrl);
        }

        let body = params
            .map(|params| {
                serde_urlencoded::to_string(params)
                    .map(String::into_bytes)
                    .map_err(|e| RequestError::PayloadEncoding(e.to_string()))
            })
            .transpose()?;

        let request = build_request(method, url, headers, body, FORM_CONTENT_TYPE)?;
        self.execute(request).await
    }

    /// Send `params` as a JSON body. Without params the request carries no body.
    pub async fn send_json<P>(
        &self,
        method: &str,
        url: &str,
        headers: Option<&HeaderSet>,
        params: Option<&P>,
    ) -> Result<HttpResponse, RequestError>
    where
        P: Serialize + ?Sized,
    {
        if url.is_empty() {
            return Err(RequestError::EmptyUrl);
        }

        let body = params
            .map(|params| {
                serde_json::to_vec(params).map_err(|e| RequestError::PayloadEncoding(e.to_string()))
            })
            .transpose()?;

        let request = build_request(method, url, headers, body, JSON_CONTENT_TYPE)?;
        self.execute(request).await
    }

    async fn execute(&self, request: reqwest::Request) -> Result<HttpResponse, RequestError> {
        info!("Executing request: {} {}", request.method(), request.url());

        let response = self.transport.execute(request).await?;

        debug!(
            "Response status {} ({} bytes)",
            response.status_code,
            response.body.len()
        );
        Ok(response)
    }
}

/// Build the outgoing request without touching the network.
///
/// Headers are appended, never replacing transport defaults. `default_content_type`
/// only applies when a body is present and the caller set no Content-Type.
fn build_request(
    method: &str,
    url: &str,
    headers: Option<&HeaderSet>,
    body: Option<Vec<u8>>,
    default_content_type: &'static str,
) -> Result<reqwest::Request, RequestError> {
    let method = Method::from_bytes(method.as_bytes())
        .map_err(|_| RequestError::RequestConstruction(format!("invalid method '{}'", method)))?;
    let url = Url::parse(url)
        .map_err(|e| RequestError::RequestConstruction(format!("invalid URL '{}': {}", url, e)))?;

    let mut request = reqwest::Request::new(method, url);

    if let Some(headers) = headers {
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                RequestError::RequestConstruction(format!("invalid header name '{}'", key))
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                RequestError::RequestConstruction(format!("invalid value for header '{}'", key))
            })?;
            request.headers_mut().append(name, value);
        }
    }

    if let Some(body) = body {
        if !request.headers().contains_key(CONTENT_TYPE) {
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(default_content_type));
        }
        debug!("Request body: {} bytes", body.len());
        *request.body_mut() = Some(body.into());
    }

    Ok(request)
}
