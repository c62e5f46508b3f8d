// src/internal/transport/http.rs

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::Transport;
use crate::internal::config::TargetConfig;
use crate::internal::requester::{HttpResponse, RequestError};

/// Transport backed by a single reqwest client.
///
/// The client lives as long as the transport. With connection reuse off it
/// keeps no idle connections, so each request opens and releases its own.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client with an optional timeout covering connect through body read
    pub fn new(timeout: Option<Duration>, reuse_connections: bool) -> Result<Self> {
        let mut builder = Client::builder();

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        if !reuse_connections {
            builder = builder.pool_max_idle_per_host(0);
        }

        let client = builder.build().context("Failed to create HTTP client")?;

        debug!(
            "HTTP client created (timeout: {:?}, reuse connections: {})",
            timeout, reuse_connections
        );

        Ok(Self { client })
    }

    pub fn from_config(cfg: &TargetConfig) -> Result<Self> {
        let timeout = cfg.timeout().context("Invalid target timeout")?;
        Self::new(timeout, cfg.reuse_connections)
    }

    /// Process the HTTP response into our standard format
    async fn process_response(response: reqwest::Response) -> Result<HttpResponse, RequestError> {
        let status_code = response.status().as_u16();

        // Clone headers before consuming the response
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(key, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (key.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(RequestError::ResponseRead)?
            .to_vec();

        debug!("Received {} with {} body bytes", status_code, body.len());

        Ok(HttpResponse {
            status_code,
            body,
            headers,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: reqwest::Request) -> Result<HttpResponse, RequestError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(RequestError::RequestExecution)?;

        Self::process_response(response).await
    }
}
