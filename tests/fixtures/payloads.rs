use login_requester::internal::requester::{FormParams, HeaderSet};
use serde_json::json;

/// Form fields as the form demonstration sends them
pub fn login_form(account: &str, password: &str) -> FormParams {
    FormParams::from([
        ("account".to_string(), account.to_string()),
        ("password".to_string(), password.to_string()),
    ])
}

/// JSON body as the JSON demonstration sends it
pub fn login_json(user_id: i64, password: &str) -> serde_json::Value {
    json!({
        "user_id": user_id,
        "password": password
    })
}

/// Form fields that need percent-encoding
pub fn awkward_form() -> FormParams {
    FormParams::from([
        ("account".to_string(), "名字 & co".to_string()),
        ("password".to_string(), "a+b=c/d?e%f".to_string()),
        ("note".to_string(), String::new()),
    ])
}

pub fn browser_headers(content_type: &str) -> HeaderSet {
    HeaderSet::from([
        ("Accept".to_string(), "application/json, text/plain, */*".to_string()),
        ("Accept-Language".to_string(), "zh-CN,zh;q=0.9".to_string()),
        ("User-Agent".to_string(), "Mozilla/5.0 (login-requester tests)".to_string()),
        ("Content-Type".to_string(), content_type.to_string()),
    ])
}
