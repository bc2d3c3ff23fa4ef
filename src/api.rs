use crate::error::{ClientError, ClientResult};
use crate::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::session::Session;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use treadx_shared::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};

/// 单次请求的附加选项
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    pub body: Option<serde_json::Value>,
    pub headers: HashMap<String, String>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn json<B: Serialize + ?Sized>(body: &B) -> ClientResult<Self> {
        Ok(Self {
            body: Some(serde_json::to_value(body)?),
            ..Self::default()
        })
    }

    pub fn query(pairs: Vec<(String, String)>) -> Self {
        Self {
            query: pairs,
            ..Self::default()
        }
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }
}

/// 所有网络调用的唯一出口
///
/// 传输策略与会话都由外部注入，克隆开销只是两个 `Arc`。
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpClient>,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpClient>, session: Arc<Session>) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// 发出请求并返回原始响应，非 2xx 视为错误
    pub async fn execute(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> ClientResult<HttpResponse> {
        let mut req = HttpRequest::new(endpoint, method)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
            .with_query(options.query);

        if let Some(token) = self.session.token()? {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
        }

        // 调用方的头覆盖默认值
        for (k, v) in &options.headers {
            req = req.with_header(k, v);
        }

        // 字符串原样发送，其余序列化为 JSON
        match options.body {
            Some(serde_json::Value::String(raw)) => req = req.with_body(raw),
            Some(body) => req = req.with_body(body.to_string()),
            None => {}
        }

        tracing::debug!(%method, target = %req.target(), "api request");
        let resp = self.transport.send(req).await.inspect_err(|e| {
            tracing::warn!(%method, endpoint, error = %e, "api request failed");
        })?;

        if !resp.is_success() {
            tracing::warn!(%method, endpoint, status = resp.status, "api request rejected");
            return Err(ClientError::Http {
                status: resp.status,
                method,
                path: endpoint.to_string(),
            });
        }

        Ok(resp)
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        self.execute(method, endpoint, options).await?.json()
    }

    // =========================================================
    // HTTP Methods
    // =========================================================

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ClientResult<T> {
        self.request(HttpMethod::Get, endpoint, RequestOptions::default())
            .await
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: Vec<(String, String)>,
    ) -> ClientResult<T> {
        self.request(HttpMethod::Get, endpoint, RequestOptions::query(query))
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request(HttpMethod::Post, endpoint, RequestOptions::json(body)?)
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request(HttpMethod::Put, endpoint, RequestOptions::json(body)?)
            .await
    }

    /// 删除接口的响应体不固定，直接丢弃
    pub async fn delete(&self, endpoint: &str) -> ClientResult<()> {
        self.execute(HttpMethod::Delete, endpoint, RequestOptions::default())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MockHttpClient;
    use serde_json::json;
    use treadx_shared::{AuthResponse, RoleName};

    fn setup() -> (Arc<MockHttpClient>, ApiClient) {
        let http = Arc::new(MockHttpClient::new());
        let client = ApiClient::new(http.clone(), Arc::new(Session::in_memory()));
        (http, client)
    }

    fn sign_in(client: &ApiClient, token: &str) {
        client
            .session()
            .store_login(&AuthResponse {
                token: token.into(),
                email: "admin@treadx.com".into(),
                first_name: "John".into(),
                last_name: "Admin".into(),
                role: RoleName::PlatformAdmin,
            })
            .unwrap();
    }

    #[tokio::test]
    async fn anonymous_requests_carry_no_bearer() {
        let (http, client) = setup();
        http.mock_response("/api/v1/roles", 200, json!([]));

        let _: serde_json::Value = client.get("/api/v1/roles").await.unwrap();

        let (method, target, headers, body) = http.last();
        assert_eq!(method, HttpMethod::Get);
        assert_eq!(target, "/api/v1/roles");
        assert_eq!(headers.get("Content-Type").map(String::as_str), Some("application/json"));
        assert!(!headers.contains_key("Authorization"));
        assert_eq!(body, None);
    }

    #[tokio::test]
    async fn token_is_read_on_every_request() {
        let (http, client) = setup();
        http.mock_response("/api/v1/roles", 200, json!([]));

        sign_in(&client, "first");
        let _: serde_json::Value = client.get("/api/v1/roles").await.unwrap();
        assert_eq!(http.last().2["Authorization"], "Bearer first");

        sign_in(&client, "second");
        let _: serde_json::Value = client.get("/api/v1/roles").await.unwrap();
        assert_eq!(http.last().2["Authorization"], "Bearer second");

        client.session().clear().unwrap();
        let _: serde_json::Value = client.get("/api/v1/roles").await.unwrap();
        assert!(!http.last().2.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn bodies_are_serialized_unless_already_strings() {
        let (http, client) = setup();
        http.mock_response("/echo", 200, json!({}));

        let _: serde_json::Value = client.post("/echo", &json!({ "a": 1 })).await.unwrap();
        assert_eq!(http.last().3.as_deref(), Some(r#"{"a":1}"#));

        let _: serde_json::Value = client.put("/echo", "raw-text").await.unwrap();
        assert_eq!(http.last().3.as_deref(), Some("raw-text"));
    }

    #[tokio::test]
    async fn caller_headers_override_defaults() {
        let (http, client) = setup();
        http.mock_response("/upload", 200, json!(null));

        let opts = RequestOptions::default().header("Content-Type", "text/plain");
        client
            .execute(HttpMethod::Post, "/upload", opts)
            .await
            .unwrap();
        assert_eq!(http.last().2["Content-Type"], "text/plain");
    }

    #[tokio::test]
    async fn non_success_status_is_an_http_error() {
        let (http, client) = setup();
        http.mock_response("/api/v1/leads/9", 500, json!({ "error": "boom" }));

        let err = client
            .get::<serde_json::Value>("/api/v1/leads/9")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("status: 500"));

        // 未注册的路径由假客户端返回 404
        let err = client.delete("/api/v1/leads/404").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn network_failure_propagates() {
        let (http, client) = setup();
        http.fail_network();
        let err = client.get::<serde_json::Value>("/api/v1/users").await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
        assert_eq!(err.status(), None);
        assert_eq!(http.recorded().len(), 1);
    }

    #[tokio::test]
    async fn delete_ignores_body() {
        let (http, client) = setup();
        http.mock_response("/api/v1/users/3", 200, json!({ "message": "deleted" }));
        client.delete("/api/v1/users/3").await.unwrap();
        assert_eq!(http.last().0, HttpMethod::Delete);
    }
}
