use crate::error::ClientResult;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

pub use treadx_shared::HttpMethod;

#[cfg(test)]
use crate::error::ClientError;
#[cfg(test)]
use std::sync::Mutex;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

fn reqwest_method(m: HttpMethod) -> reqwest::Method {
    match m {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// 通用 HTTP 请求结构
///
/// `path` 是相对于后端根地址的路径，由具体的传输实现决定如何拼接。
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(path: &str, method: HttpMethod) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// 查询参数取值（取第一个同名参数）
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 渲染后的 `path?query` 形式，用于日志与测试
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("{}?{}", self.path, query.join("&"))
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 空响应体按 JSON `null` 解析
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        let body = self.body.trim();
        let body = if body.is_empty() { "null" } else { body };
        Ok(serde_json::from_str(body)?)
    }
}

/// HTTP 客户端特性 (Trait)
///
/// 传输策略：真实后端与本地夹具各有一个实现，在应用启动时选定并注入。
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse>;
}

// =========================================================
// 实现层: reqwest 客户端 (Backend)
// =========================================================

#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestHttpClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let mut builder = self
            .client
            .request(reqwest_method(req.method), self.url(&req.path));

        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }

        for (k, v) in &req.headers {
            builder = builder.header(k, v);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

/// 记录下来的请求 (Method, Target, Headers, Body)
#[cfg(test)]
pub type RecordedRequest = (HttpMethod, String, HashMap<String, String>, Option<String>);

#[cfg(test)]
pub struct MockHttpClient {
    // (Path, (Status, Response Body))
    responses: Mutex<HashMap<String, (u16, String)>>,
    pub requests: Mutex<Vec<RecordedRequest>>,
    fail_network: Mutex<bool>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            fail_network: Mutex::new(false),
        }
    }

    pub fn mock_response(&self, path: &str, status: u16, body: serde_json::Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.to_string()));
    }

    pub fn fail_network(&self) {
        *self.fail_network.lock().unwrap() = true;
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.recorded().pop().expect("no request was sent")
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        self.requests.lock().unwrap().push((
            req.method,
            req.target(),
            req.headers.clone(),
            req.body.clone(),
        ));

        if *self.fail_network.lock().unwrap() {
            return Err(ClientError::Network("connection refused".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        match responses.get(&req.path) {
            Some((status, body)) => Ok(HttpResponse::new(*status, body.clone())),
            None => Ok(HttpResponse::new(404, "Not Found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_with_single_slash() {
        let client = ReqwestHttpClient::new("http://localhost:9003/");
        assert_eq!(client.url("/api/v1/leads"), "http://localhost:9003/api/v1/leads");
        assert_eq!(client.url("api/v1/leads"), "http://localhost:9003/api/v1/leads");
    }

    #[test]
    fn empty_body_parses_as_null() {
        let resp = HttpResponse::new(204, "");
        resp.json::<()>().unwrap();
        let value: serde_json::Value = resp.json().unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn target_renders_query_in_order() {
        let req = HttpRequest::new("/api/v1/leads", HttpMethod::Get).with_query(vec![
            ("page".into(), "1".into()),
            ("size".into(), "5".into()),
        ]);
        assert_eq!(req.target(), "/api/v1/leads?page=1&size=5");
        assert_eq!(req.query_param("size"), Some("5"));
    }

    #[test]
    fn success_range() {
        assert!(HttpResponse::new(201, "{}").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }
}
