use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::services::{ContactService, DealerService, LeadService, UserService};
use treadx_shared::{Contact, Dealer, Lead, Page, PageRequest, User};

/// 仪表盘每个列表只取第一页的前几条
pub const DASHBOARD_PAGE_SIZE: u32 = 5;

/// 仪表盘聚合查询
pub struct DashboardService<'a> {
    client: &'a ApiClient,
}

/// 四个查询各自的结果，互不影响
#[derive(Debug)]
pub struct DashboardSnapshot {
    pub leads: ClientResult<Page<Lead>>,
    pub contacts: ClientResult<Page<Contact>>,
    pub dealers: ClientResult<Page<Dealer>>,
    pub users: ClientResult<Vec<User>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_leads: u64,
    pub total_contacts: u64,
    pub total_dealers: u64,
    pub total_users: u64,
    pub recent_leads: Vec<Lead>,
}

impl<'a> DashboardService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// 并发发出四个请求，等待全部结束
    ///
    /// 单个请求失败只影响对应字段，不会取消其余请求。
    pub async fn load(&self) -> DashboardSnapshot {
        let page = PageRequest::new(0, DASHBOARD_PAGE_SIZE);

        let leads = LeadService::new(self.client);
        let contacts = ContactService::new(self.client);
        let dealers = DealerService::new(self.client);
        let users = UserService::new(self.client);

        let (leads, contacts, dealers, users) = futures::join!(
            leads.get_leads(&page),
            contacts.get_contacts(&page),
            dealers.get_dealers(&page),
            users.get_users(),
        );

        let snapshot = DashboardSnapshot {
            leads,
            contacts,
            dealers,
            users,
        };
        for err in snapshot.errors() {
            tracing::warn!(error = %err, "dashboard query failed");
        }
        snapshot
    }
}

impl DashboardSnapshot {
    pub fn errors(&self) -> Vec<&ClientError> {
        [
            self.leads.as_ref().err(),
            self.contacts.as_ref().err(),
            self.dealers.as_ref().err(),
            self.users.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.errors().is_empty()
    }

    /// 失败的部分按 0 计
    pub fn stats(&self) -> DashboardStats {
        fn total<T>(page: &ClientResult<Page<T>>) -> u64 {
            page.as_ref().map(|p| p.total_elements).unwrap_or(0)
        }

        DashboardStats {
            total_leads: total(&self.leads),
            total_contacts: total(&self.contacts),
            total_dealers: total(&self.dealers),
            total_users: self.users.as_ref().map(|u| u.len() as u64).unwrap_or(0),
            recent_leads: self
                .leads
                .as_ref()
                .map(|p| p.content.clone())
                .unwrap_or_default(),
        }
    }
}
