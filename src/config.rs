use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::mock::FixtureHttpClient;
use crate::request::{HttpClient, ReqwestHttpClient};
use crate::session::Session;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// 环境变量缺省时使用这些值
pub const DEFAULT_BACKEND_URL: &str = "http://159.198.75.161:9003";
pub const DEFAULT_MOCK_DELAY_MS: u64 = 500;

const ENV_MODE: &str = "TREADX_API_MODE";
const ENV_BACKEND_URL: &str = "TREADX_BACKEND_URL";
const ENV_MOCK_DELAY_MS: &str = "TREADX_MOCK_DELAY_MS";

/// 数据来源：本地夹具或真实后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiMode {
    Mock,
    #[default]
    Backend,
}

impl FromStr for ApiMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ApiMode::Mock),
            "backend" => Ok(ApiMode::Backend),
            other => Err(ClientError::Config(format!(
                "unknown API mode '{other}', expected 'mock' or 'backend'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub mode: ApiMode,
    /// 夹具模式下模拟的网络延迟
    pub mock_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            mode: ApiMode::Backend,
            mock_delay: Duration::from_millis(DEFAULT_MOCK_DELAY_MS),
        }
    }
}

impl ClientConfig {
    pub fn mock() -> Self {
        Self {
            mode: ApiMode::Mock,
            ..Self::default()
        }
    }

    pub fn backend(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            mode: ApiMode::Backend,
            ..Self::default()
        }
    }

    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }

    /// 读取 `.env` 与进程环境变量，缺省值见模块常量
    pub fn from_env() -> ClientResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mode = match lookup(ENV_MODE) {
            Some(v) => v.parse()?,
            None => defaults.mode,
        };

        let base_url = lookup(ENV_BACKEND_URL).unwrap_or(defaults.base_url);

        let mock_delay = match lookup(ENV_MOCK_DELAY_MS) {
            Some(v) => v.trim().parse::<u64>().map(Duration::from_millis).map_err(|e| {
                ClientError::Config(format!("{ENV_MOCK_DELAY_MS}='{v}' is not a number: {e}"))
            })?,
            None => defaults.mock_delay,
        };

        Ok(Self {
            base_url,
            mode,
            mock_delay,
        })
    }

    /// 按模式选定传输策略
    pub fn transport(&self) -> Arc<dyn HttpClient> {
        match self.mode {
            ApiMode::Mock => Arc::new(FixtureHttpClient::new(self.mock_delay)),
            ApiMode::Backend => Arc::new(ReqwestHttpClient::new(&self.base_url)),
        }
    }

    pub fn connect(&self, session: Arc<Session>) -> ApiClient {
        tracing::info!(mode = ?self.mode, base_url = %self.base_url, "api client configured");
        ApiClient::new(self.transport(), session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.mode, ApiMode::Backend);
        assert_eq!(cfg.mock_delay, Duration::from_millis(500));
    }

    #[test]
    fn overrides_from_env() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            ("TREADX_API_MODE", "MOCK"),
            ("TREADX_BACKEND_URL", "http://localhost:8080"),
            ("TREADX_MOCK_DELAY_MS", "25"),
        ]))
        .unwrap();
        assert_eq!(cfg.mode, ApiMode::Mock);
        assert_eq!(cfg.base_url, "http://localhost:8080");
        assert_eq!(cfg.mock_delay, Duration::from_millis(25));
    }

    #[test]
    fn rejects_malformed_values() {
        let err = ClientConfig::from_lookup(lookup(&[("TREADX_API_MODE", "staging")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        let err =
            ClientConfig::from_lookup(lookup(&[("TREADX_MOCK_DELAY_MS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("TREADX_MOCK_DELAY_MS"));
    }
}
