use crate::api::ApiClient;
use crate::error::ClientResult;
use treadx_shared::{EntityId, NewUser, Role, User, endpoints};

/// 用户列表不分页，直接返回数组
pub struct UserService<'a> {
    client: &'a ApiClient,
}

impl<'a> UserService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_users(&self) -> ClientResult<Vec<User>> {
        self.client.get(endpoints::USERS).await
    }

    pub async fn create_user(&self, user: &NewUser) -> ClientResult<User> {
        self.client.post(endpoints::USERS, user).await
    }

    pub async fn delete_user(&self, id: EntityId) -> ClientResult<()> {
        self.client.delete(&endpoints::user_by_id(id)).await
    }
}

pub struct RoleService<'a> {
    client: &'a ApiClient,
}

impl<'a> RoleService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_roles(&self) -> ClientResult<Vec<Role>> {
        self.client.get(endpoints::ROLES).await
    }

    pub async fn delete_role(&self, id: EntityId) -> ClientResult<()> {
        self.client.delete(&endpoints::role_by_id(id)).await
    }

    // 权限结构由后端定义，原样返回
    pub async fn get_role_permissions(&self, id: EntityId) -> ClientResult<serde_json::Value> {
        self.client.get(&endpoints::role_permissions(id)).await
    }
}
