use crate::api::ApiClient;
use crate::error::ClientResult;
use treadx_shared::{AuthResponse, LoginRequest, UserProfile, endpoints};

/// 登录 / 注销与会话查询
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// 登录成功时持久化 Token 与用户资料；失败时保留原有状态并返回错误
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let creds = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let resp: AuthResponse = self
            .client
            .post(endpoints::LOGIN, &creds)
            .await
            .inspect_err(|e| tracing::warn!(email, error = %e, "login rejected"))?;

        if self.client.session().store_login(&resp)? {
            tracing::info!(email = %resp.email, role = resp.role.as_str(), "signed in");
        }
        Ok(resp)
    }

    /// 只清除本地会话，不调用服务端
    pub fn logout(&self) -> ClientResult<()> {
        self.client.session().clear()?;
        tracing::info!("signed out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> ClientResult<bool> {
        self.client.session().is_authenticated()
    }

    pub fn current_user(&self) -> ClientResult<Option<UserProfile>> {
        self.client.session().current_user()
    }

    pub fn token(&self) -> ClientResult<Option<String>> {
        self.client.session().token()
    }
}
