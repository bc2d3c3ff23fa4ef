//! 领域服务层
//!
//! 每个资源一个服务，每个操作恰好对应一次 `ApiClient` 调用。
//! 服务不做校验、不缓存、不捕获错误。

mod address;
mod auth;
mod contact;
mod dashboard;
mod dealer;
mod lead;
mod user;


pub use address::AddressService;
pub use auth::AuthService;
pub use contact::ContactService;
pub use dashboard::{DashboardService, DashboardSnapshot, DashboardStats};
pub use dealer::DealerService;
pub use lead::LeadService;
pub use user::{RoleService, UserService};

use crate::api::ApiClient;

/// 同一个客户端上的全部服务
#[derive(Clone)]
pub struct CrmServices {
    client: ApiClient,
}

impl CrmServices {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.client)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(&self.client)
    }

    pub fn roles(&self) -> RoleService<'_> {
        RoleService::new(&self.client)
    }

    pub fn leads(&self) -> LeadService<'_> {
        LeadService::new(&self.client)
    }

    pub fn contacts(&self) -> ContactService<'_> {
        ContactService::new(&self.client)
    }

    pub fn dealers(&self) -> DealerService<'_> {
        DealerService::new(&self.client)
    }

    pub fn addresses(&self) -> AddressService<'_> {
        AddressService::new(&self.client)
    }

    pub fn dashboard(&self) -> DashboardService<'_> {
        DashboardService::new(&self.client)
    }
}
