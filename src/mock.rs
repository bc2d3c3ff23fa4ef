//! 夹具传输层
//!
//! 在模拟延迟之后，按 `(method, path)` 把请求路由到夹具数据。
//! 写操作只在本次响应中合成结果，从不回写夹具列表。

mod fixtures;


pub use fixtures::{MOCK_ADMIN_EMAIL, MOCK_ADMIN_PASSWORD, MOCK_TOKEN, MockData};

use crate::error::{ClientError, ClientResult};
use crate::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;
use treadx_shared::endpoints::API_PREFIX;
use treadx_shared::{EntityId, LoginRequest, Page, Timestamp};

const DEFAULT_PAGE_SIZE: u32 = 10;

pub struct FixtureHttpClient {
    delay: Duration,
    data: MockData,
}

impl FixtureHttpClient {
    pub fn new(delay: Duration) -> Self {
        Self::with_data(delay, MockData::default())
    }

    pub fn with_data(delay: Duration, data: MockData) -> Self {
        Self { delay, data }
    }

    pub fn data(&self) -> &MockData {
        &self.data
    }

    fn route(&self, req: &HttpRequest) -> ClientResult<HttpResponse> {
        let Some(rest) = req.path.strip_prefix(API_PREFIX) else {
            return Ok(placeholder());
        };
        let segments: Vec<&str> = rest.trim_matches('/').split('/').collect();

        use HttpMethod::*;
        match (req.method, segments.as_slice()) {
            (Post, ["users", "login"]) => self.login(req),

            (Get, ["leads"]) => paged(&self.data.leads, req),
            (Get, ["dealers"]) => paged(&self.data.dealers, req),
            (Get, ["contacts"]) => paged(&self.data.contacts, req),

            (Get, ["leads", id]) => item(&self.data.leads, id, |l| l.id),
            (Get, ["dealers", id]) => item(&self.data.dealers, id, |d| d.id),
            (Get, ["contacts", id]) => item(&self.data.contacts, id, |c| c.id),
            (Get, ["users", id]) => item(&self.data.users, id, |u| u.id),

            (Get, ["users"]) => ok(&self.data.users),
            (Get, ["roles"]) => ok(&self.data.roles),
            (Get, ["addresses"]) => ok(&self.data.addresses()),
            (Get, ["addresses", id]) if *id != "base" => {
                item(&self.data.addresses(), id, |a| a.id.unwrap_or_default())
            }
            (Get, ["addresses", "base", "countries"]) => ok(&self.data.locations.countries),
            (Get, ["addresses", "base", "countries", id, "provinces"]) => match parse_id(id) {
                Some(id) => ok(&self.data.locations.provinces_of(id)),
                None => Ok(not_found()),
            },
            (Get, ["addresses", "base", "provinces", id, "cities"]) => match parse_id(id) {
                Some(id) => ok(&self.data.locations.cities_of(id)),
                None => Ok(not_found()),
            },

            (Post, ["leads" | "dealers" | "contacts" | "users" | "addresses"])
            | (Post, ["leads", _, "convert-to-contact"])
            | (Post, ["contacts", _, "convert-to-dealer"]) => created(req),

            (Put, [_, id]) => match parse_id(id) {
                Some(id) => updated(req, id),
                None => Ok(not_found()),
            },

            _ => Ok(placeholder()),
        }
    }

    fn login(&self, req: &HttpRequest) -> ClientResult<HttpResponse> {
        let creds: Option<LoginRequest> = req
            .body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok());

        match creds {
            Some(c) if c.email == MOCK_ADMIN_EMAIL && c.password == MOCK_ADMIN_PASSWORD => {
                ok(&self.data.auth_response)
            }
            _ => Err(ClientError::InvalidCredentials),
        }
    }
}

#[async_trait::async_trait]
impl HttpClient for FixtureHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        tokio::time::sleep(self.delay).await;
        tracing::debug!(method = %req.method, target = %req.target(), "mock request");
        self.route(&req)
    }
}

// =========================================================
// 响应构造
// =========================================================

fn ok<T: Serialize + ?Sized>(value: &T) -> ClientResult<HttpResponse> {
    Ok(HttpResponse::new(200, serde_json::to_string(value)?))
}

fn not_found() -> HttpResponse {
    HttpResponse::new(404, json!({ "message": "Not found" }).to_string())
}

/// 未处理路由的兜底响应
fn placeholder() -> HttpResponse {
    HttpResponse::new(200, json!({ "message": "Mock response", "data": null }).to_string())
}

fn parse_id(raw: &str) -> Option<EntityId> {
    raw.parse().ok()
}

fn paged<T: Clone + Serialize>(items: &[T], req: &HttpRequest) -> ClientResult<HttpResponse> {
    let number = req
        .query_param("page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let size = req
        .query_param("size")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE);
    ok(&Page::from_slice(items, number, size))
}

fn item<T: Serialize>(
    items: &[T],
    raw_id: &str,
    id_of: impl Fn(&T) -> EntityId,
) -> ClientResult<HttpResponse> {
    match parse_id(raw_id).and_then(|id| items.iter().find(|i| id_of(i) == id)) {
        Some(found) => ok(found),
        None => Ok(not_found()),
    }
}

fn body_value(req: &HttpRequest) -> ClientResult<Value> {
    match req.body.as_deref() {
        Some(b) if !b.trim().is_empty() => Ok(serde_json::from_str(b)?),
        _ => Ok(Value::Object(Default::default())),
    }
}

/// 回显提交内容，附加基于时间戳的 id 与创建/更新时间
fn created(req: &HttpRequest) -> ClientResult<HttpResponse> {
    let now = Timestamp::now();
    let mut value = body_value(req)?;
    if let Value::Object(map) = &mut value {
        map.insert("id".into(), json!(now.as_millis()));
        map.insert("createdAt".into(), json!(now.to_rfc3339()));
        map.insert("updatedAt".into(), json!(now.to_rfc3339()));
    }
    ok(&value)
}

fn updated(req: &HttpRequest, id: EntityId) -> ClientResult<HttpResponse> {
    let mut value = body_value(req)?;
    if let Value::Object(map) = &mut value {
        map.insert("id".into(), json!(id));
        map.insert("updatedAt".into(), json!(Timestamp::now().to_rfc3339()));
    }
    ok(&value)
}
