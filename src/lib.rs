//! TreadX CRM 客户端
//!
//! 前端访问后端 REST API 的统一入口：
//! - `config`: 选择 mock 或 backend 模式
//! - `api`: 附加认证头、统一错误处理的请求客户端
//! - `mock`: 离线夹具数据与路由
//! - `services`: 按资源划分的领域服务
//! - `session`: Token 与用户资料的持久化
//!
//! ```no_run
//! use std::sync::Arc;
//! use treadx_client::{ClientConfig, CrmServices, FileStorage, Session};
//!
//! # async fn run() -> treadx_client::ClientResult<()> {
//! let config = ClientConfig::from_env()?;
//! let session = Arc::new(Session::new(FileStorage::new(".treadx/session.json")));
//! let crm = CrmServices::new(config.connect(session));
//!
//! crm.auth().login("admin@treadx.com", "admin123").await?;
//! let stats = crm.dashboard().load().await.stats();
//! println!("{} leads", stats.total_leads);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod mock;
pub mod request;
pub mod services;
pub mod session;

pub use treadx_shared as shared;

pub use api::{ApiClient, RequestOptions};
pub use config::{ApiMode, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use mock::FixtureHttpClient;
pub use request::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use services::{CrmServices, DashboardSnapshot, DashboardStats};
pub use session::{FileStorage, MemoryStorage, Session, SessionStorage};
