// src/internal/login/driver.rs

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Context;
use serde_json::json;
use tracing::{info, warn};

use super::error::LoginError;
use super::types::{LoginData, ResponseEnvelope};
use crate::internal::config::{AppConfig, Credentials, DemoMode, TargetConfig};
use crate::internal::requester::{
    FormParams, HeaderSet, HttpRequester, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE,
};
use crate::internal::transport::{ReqwestTransport, Transport};

/// Body encoding used by one demonstration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Form,
    Json,
}

impl Encoding {
    pub fn content_type(self) -> &'static str {
        match self {
            Encoding::Form => FORM_CONTENT_TYPE,
            Encoding::Json => JSON_CONTENT_TYPE,
        }
    }

    fn banner(self) -> &'static str {
        match self {
            Encoding::Form => "form request parameters",
            Encoding::Json => "json request parameters",
        }
    }
}

/// Result of one successful demonstration
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub encoding: Encoding,
    pub data: LoginData,
    pub elapsed: Duration,
}

impl LoginOutcome {
    /// Summary line printed after a successful login
    pub fn summary(&self) -> String {
        format!(
            "user_id:{},account:{},{} ms",
            self.data.user_id,
            self.data.account,
            self.elapsed.as_millis()
        )
    }
}

/// Runs the form and JSON login demonstrations against the configured target
pub struct Driver<T = ReqwestTransport> {
    requester: HttpRequester<T>,
    target: TargetConfig,
    credentials: Credentials,
    mode: DemoMode,
}

impl Driver<ReqwestTransport> {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let requester =
            HttpRequester::new(&config.target).context("Failed to create HTTP requester")?;
        Ok(Self::new(config, requester))
    }
}

impl<T: Transport> Driver<T> {
    pub fn new(config: &AppConfig, requester: HttpRequester<T>) -> Self {
        Self {
            requester,
            target: config.target.clone(),
            credentials: config.credentials.clone(),
            mode: config.driver.mode,
        }
    }

    /// Configured headers plus the Content-Type for `encoding`.
    /// Any Content-Type coming from configuration is replaced.
    pub fn headers_for(&self, encoding: Encoding) -> HeaderSet {
        let mut headers: HeaderSet = self
            .target
            .headers
            .iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case("content-type"))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        headers.insert(
            "Content-Type".to_string(),
            encoding.content_type().to_string(),
        );
        headers
    }

    /// Run every demonstration the mode selects, form first.
    /// The first failure ends the run.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<Vec<LoginOutcome>, LoginError> {
        let mut outcomes = Vec::new();

        if self.mode.runs_form() {
            outcomes.push(self.run_form(out).await?);
        }
        if self.mode.runs_json() {
            outcomes.push(self.run_json(out).await?);
        }

        Ok(outcomes)
    }

    /// Log in with `account` and `password` as a form body
    pub async fn run_form<W: Write>(&self, out: &mut W) -> Result<LoginOutcome, LoginError> {
        writeln!(out, "{}", Encoding::Form.banner())?;
        let start = Instant::now();

        let headers = self.headers_for(Encoding::Form);
        let params = FormParams::from([
            ("account".to_string(), self.credentials.account.clone()),
            ("password".to_string(), self.credentials.password.clone()),
        ]);

        let response = self
            .requester
            .send_form(&self.target.method, &self.target.url, Some(&headers), Some(&params))
            .await?;

        self.finish(Encoding::Form, &response.body, start, out)
    }

    /// Log in with `user_id` and `password` as a JSON body
    pub async fn run_json<W: Write>(&self, out: &mut W) -> Result<LoginOutcome, LoginError> {
        writeln!(out, "{}", Encoding::Json.banner())?;
        let start = Instant::now();

        let headers = self.headers_for(Encoding::Json);
        let params = json!({
            "user_id": self.credentials.user_id,
            "password": self.credentials.password,
        });

        let response = self
            .requester
            .send_json(&self.target.method, &self.target.url, Some(&headers), Some(&params))
            .await?;

        self.finish(Encoding::Json, &response.body, start, out)
    }

    fn finish<W: Write>(
        &self,
        encoding: Encoding,
        body: &[u8],
        start: Instant,
        out: &mut W,
    ) -> Result<LoginOutcome, LoginError> {
        let envelope = ResponseEnvelope::from_slice(body)?;
        let code = envelope.code;

        let data = envelope.into_data().inspect_err(|e| {
            warn!("{:?} login rejected: {}", encoding, e);
        })?;

        let outcome = LoginOutcome {
            encoding,
            data,
            elapsed: start.elapsed(),
        };

        info!(
            "{:?} login succeeded for user {} (code {})",
            encoding, outcome.data.user_id, code
        );
        writeln!(out, "{}", outcome.summary())?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::requester::{HttpResponse, RequestError};
    use crate::internal::transport::MockTransport;
    use serde_json::Value;

    fn driver_with(config: AppConfig) -> (Driver<MockTransport>, MockTransport) {
        let transport = MockTransport::new();
        let driver = Driver::new(&config, HttpRequester::with_transport(transport.clone()));
        (driver, transport)
    }

    fn success_reply() -> Value {
        json!({"code": 0, "msg": "ok", "data": {"user_id": 10000, "account": "snai"}})
    }

    #[tokio::test]
    async fn test_run_both_prints_summaries() {
        let (driver, transport) = driver_with(AppConfig::default());
        transport.queue_json(&success_reply());
        transport.queue_json(&success_reply());

        let mut out = Vec::new();
        let outcomes = driver.run(&mut out).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].encoding, Encoding::Form);
        assert_eq!(outcomes[1].encoding, Encoding::Json);

        let printed = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines[0], "form request parameters");
        assert!(lines[1].starts_with("user_id:10000,account:snai,"));
        assert!(lines[1].ends_with(" ms"));
        assert_eq!(lines[2], "json request parameters");
        assert!(lines[3].starts_with("user_id:10000,account:snai,"));
    }

    #[tokio::test]
    async fn test_requests_carry_demo_payloads() {
        let (driver, transport) = driver_with(AppConfig::default());
        transport.queue_json(&success_reply());
        transport.queue_json(&success_reply());

        driver.run(&mut Vec::new()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);

        let form = &requests[0];
        assert_eq!(form.method, "POST");
        assert_eq!(form.url, "http://localhost:8080/user/login");
        assert_eq!(form.header("content-type"), Some(FORM_CONTENT_TYPE));
        assert!(form.header("user-agent").unwrap().starts_with("Mozilla/5.0"));
        assert_eq!(form.body.as_deref(), Some(&b"account=snai&password=snai"[..]));

        let json_req = &requests[1];
        assert_eq!(json_req.header("content-type"), Some(JSON_CONTENT_TYPE));
        let body: Value = serde_json::from_slice(json_req.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, json!({"user_id": 10000, "password": "snai"}));
    }

    #[tokio::test]
    async fn test_missing_data_is_login_failed() {
        let (driver, transport) = driver_with(AppConfig::default());
        transport.queue_json(&json!({"code": 1, "msg": "bad credentials", "data": null}));

        let mut out = Vec::new();
        let err = driver.run(&mut out).await.unwrap_err();

        assert!(matches!(err, LoginError::LoginFailed { code: 1, ref msg } if msg == "bad credentials"));
        // The json demonstration is skipped after the first failure
        assert_eq!(transport.call_count(), 1);
        assert_eq!(String::from_utf8(out).unwrap(), "form request parameters\n");
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_parse_error() {
        let (driver, transport) = driver_with(AppConfig::default());
        transport.queue_response(HttpResponse::new(502, "bad gateway"));

        let err = driver.run_form(&mut Vec::new()).await.unwrap_err();
        assert!(matches!(err, LoginError::ResponseParse(_)));
    }

    #[tokio::test]
    async fn test_empty_url_surfaces_request_error() {
        let mut config = AppConfig::default();
        config.target.url = String::new();
        let (driver, transport) = driver_with(config);

        let err = driver.run(&mut Vec::new()).await.unwrap_err();

        assert!(matches!(err, LoginError::Request(RequestError::EmptyUrl)));
        assert_eq!(err.to_string(), "empty URL");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_json_mode_skips_form() {
        let mut config = AppConfig::default();
        config.driver.mode = DemoMode::Json;
        let (driver, transport) = driver_with(config);
        transport.queue_json(&success_reply());

        let outcomes = driver.run(&mut Vec::new()).await.unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].encoding, Encoding::Json);
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_configured_content_type_is_replaced() {
        let mut config = AppConfig::default();
        config
            .target
            .headers
            .insert("content-type".to_string(), "text/plain".to_string());
        let (driver, _) = driver_with(config);

        let headers = driver.headers_for(Encoding::Json);

        let content_types: Vec<_> = headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .collect();
        assert_eq!(content_types.len(), 1);
        assert_eq!(content_types[0].1, JSON_CONTENT_TYPE);
        assert_eq!(headers.len(), 6);
    }

    #[test]
    fn test_summary_format() {
        let outcome = LoginOutcome {
            encoding: Encoding::Form,
            data: LoginData {
                user_id: 10000,
                account: "snai".to_string(),
            },
            elapsed: Duration::from_millis(42),
        };
        assert_eq!(outcome.summary(), "user_id:10000,account:snai,42 ms");
    }
}
