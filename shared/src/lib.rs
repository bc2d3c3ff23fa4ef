use serde::{Deserialize, Serialize};

pub mod date;
pub mod location;
pub mod page;
pub mod protocol;

pub use chrono;
pub use date::Timestamp;
pub use location::{Address, City, Country, LocationDirectory, Province};
pub use page::Page;
pub use protocol::{EntityId, HttpMethod, PageRequest, SortDirection, endpoints};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// =========================================================
// 枚举 (Enumerations)
// =========================================================

/// 线索生命周期: NEW -> CONTACTED -> QUALIFIED -> CONVERTED -> CLOSED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Converted,
    Closed,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Converted,
        LeadStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "NEW",
            LeadStatus::Contacted => "CONTACTED",
            LeadStatus::Qualified => "QUALIFIED",
            LeadStatus::Converted => "CONVERTED",
            LeadStatus::Closed => "CLOSED",
        }
    }

    /// 生命周期中的下一个状态，CLOSED 之后没有
    pub fn next(&self) -> Option<LeadStatus> {
        match self {
            LeadStatus::New => Some(LeadStatus::Contacted),
            LeadStatus::Contacted => Some(LeadStatus::Qualified),
            LeadStatus::Qualified => Some(LeadStatus::Converted),
            LeadStatus::Converted => Some(LeadStatus::Closed),
            LeadStatus::Closed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadSource {
    Website,
    Referral,
    ColdCall,
    SocialMedia,
    TradeShow,
    #[default]
    Other,
}

impl LeadSource {
    pub const ALL: [LeadSource; 6] = [
        LeadSource::Website,
        LeadSource::Referral,
        LeadSource::ColdCall,
        LeadSource::SocialMedia,
        LeadSource::TradeShow,
        LeadSource::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Website => "WEBSITE",
            LeadSource::Referral => "REFERRAL",
            LeadSource::ColdCall => "COLD_CALL",
            LeadSource::SocialMedia => "SOCIAL_MEDIA",
            LeadSource::TradeShow => "TRADE_SHOW",
            LeadSource::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DealerStatus {
    Active,
    Inactive,
    #[default]
    Pending,
    Suspended,
}

impl DealerStatus {
    pub const ALL: [DealerStatus; 4] = [
        DealerStatus::Active,
        DealerStatus::Inactive,
        DealerStatus::Pending,
        DealerStatus::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DealerStatus::Active => "ACTIVE",
            DealerStatus::Inactive => "INACTIVE",
            DealerStatus::Pending => "PENDING",
            DealerStatus::Suspended => "SUSPENDED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    PlatformAdmin,
    SalesManager,
    SalesAgent,
}

impl RoleName {
    pub const ALL: [RoleName; 3] = [
        RoleName::PlatformAdmin,
        RoleName::SalesManager,
        RoleName::SalesAgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::PlatformAdmin => "PLATFORM_ADMIN",
            RoleName::SalesManager => "SALES_MANAGER",
            RoleName::SalesAgent => "SALES_AGENT",
        }
    }

    /// 导航可见性，仅用于界面裁剪，不是安全边界
    pub fn can_view(&self, section: NavSection) -> bool {
        match section {
            NavSection::Users => matches!(self, RoleName::PlatformAdmin),
            _ => true,
        }
    }
}

/// 主导航分区
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavSection {
    Dashboard,
    Leads,
    Contacts,
    Dealers,
    Users,
}

impl NavSection {
    pub const ALL: [NavSection; 5] = [
        NavSection::Dashboard,
        NavSection::Leads,
        NavSection::Contacts,
        NavSection::Dealers,
        NavSection::Users,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            NavSection::Dashboard => "/dashboard",
            NavSection::Leads => "/leads",
            NavSection::Contacts => "/contacts",
            NavSection::Dealers => "/dealers",
            NavSection::Users => "/users",
        }
    }

    /// 某角色可见的分区（保持导航顺序）
    pub fn visible_to(role: RoleName) -> Vec<NavSection> {
        Self::ALL.into_iter().filter(|s| role.can_view(*s)).collect()
    }
}

// =========================================================
// 认证 (Authentication)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: RoleName,
}

/// 登录后缓存到本地的用户资料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: RoleName,
}

impl From<&AuthResponse> for UserProfile {
    fn from(resp: &AuthResponse) -> Self {
        Self {
            email: resp.email.clone(),
            first_name: resp.first_name.clone(),
            last_name: resp.last_name.clone(),
            role: resp.role,
        }
    }
}

// =========================================================
// 用户与角色 (Users & Roles)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: EntityId,
    pub name: RoleName,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub additional_permissions: Vec<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub created_by: Option<EntityId>,
    #[serde(default)]
    pub updated_by: Option<EntityId>,
}

/// 创建用户的提交表单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position: Option<String>,
    pub role_id: EntityId,
    pub password: String,
}

// =========================================================
// 线索 / 联系人 / 经销商 (Pipeline)
// =========================================================

/// 线索的业务字段，创建与更新时提交
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadInput {
    pub business_name: String,
    pub business_email: String,
    pub phone_number: String,
    #[serde(default)]
    pub source: LeadSource,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub dealer_id: Option<EntityId>,
    #[serde(default)]
    pub dealer_unique_id: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: EntityId,
    #[serde(flatten)]
    pub base: LeadInput,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub added_by: Option<EntityId>,
    #[serde(default)]
    pub last_modified_by: Option<EntityId>,
}

/// 联系人的业务字段，也是线索转联系人的提交内容
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    pub business_name: String,
    pub business_email: String,
    pub phone_number: String,
    #[serde(default)]
    pub source: Option<LeadSource>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub dealer_id: Option<EntityId>,
    #[serde(default)]
    pub dealer_unique_id: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

impl From<&LeadInput> for ContactInput {
    fn from(lead: &LeadInput) -> Self {
        Self {
            business_name: lead.business_name.clone(),
            business_email: lead.business_email.clone(),
            phone_number: lead.phone_number.clone(),
            source: Some(lead.source),
            status: None,
            notes: lead.notes.clone(),
            dealer_id: lead.dealer_id,
            dealer_unique_id: lead.dealer_unique_id.clone(),
            address: lead.address.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: EntityId,
    #[serde(flatten)]
    pub base: ContactInput,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub added_by: Option<EntityId>,
    #[serde(default)]
    pub last_modified_by: Option<EntityId>,
}

/// 经销商的业务字段，也是联系人转经销商的提交内容
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub status: DealerStatus,
    #[serde(default)]
    pub access_count: i64,
    #[serde(default)]
    pub dealer_unique_id: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

impl From<&ContactInput> for DealerInput {
    fn from(contact: &ContactInput) -> Self {
        Self {
            name: contact.business_name.clone(),
            email: contact.business_email.clone(),
            phone: contact.phone_number.clone(),
            status: DealerStatus::Pending,
            access_count: 0,
            dealer_unique_id: contact.dealer_unique_id.clone(),
            address: contact.address.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    pub id: EntityId,
    #[serde(flatten)]
    pub base: DealerInput,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enums_use_wire_names() {
        assert_eq!(serde_json::to_value(LeadSource::ColdCall).unwrap(), json!("COLD_CALL"));
        assert_eq!(
            serde_json::from_value::<RoleName>(json!("SALES_MANAGER")).unwrap(),
            RoleName::SalesManager
        );
        for status in LeadStatus::ALL {
            assert_eq!(serde_json::to_value(status).unwrap(), json!(status.as_str()));
        }
        for status in DealerStatus::ALL {
            assert_eq!(serde_json::to_value(status).unwrap(), json!(status.as_str()));
        }
    }

    #[test]
    fn lead_lifecycle_ends_at_closed() {
        let mut status = LeadStatus::New;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            seen.push(next);
            status = next;
        }
        assert_eq!(seen, LeadStatus::ALL.to_vec());
    }

    #[test]
    fn users_section_is_admin_only() {
        assert_eq!(NavSection::visible_to(RoleName::PlatformAdmin).len(), 5);
        let agent = NavSection::visible_to(RoleName::SalesAgent);
        assert!(!agent.contains(&NavSection::Users));
        assert_eq!(agent.first(), Some(&NavSection::Dashboard));
    }

    #[test]
    fn lead_reads_backend_shape() {
        let lead: Lead = serde_json::from_value(json!({
            "id": 2,
            "businessName": "Metro Auto Service",
            "businessEmail": "info@metroauto.com",
            "phoneNumber": "+1-555-0124",
            "source": "REFERRAL",
            "status": "CONTACTED",
            "notes": null,
            "dealerId": null,
            "createdAt": [2024, 6, 8, 14, 30, 0],
            "updatedAt": "2024-06-12T10:15:00Z",
            "addedBy": 3
        }))
        .unwrap();
        assert_eq!(lead.base.status, LeadStatus::Contacted);
        assert_eq!(
            lead.created_at.unwrap().to_rfc3339(),
            "2024-06-08T14:30:00Z"
        );
        assert_eq!(lead.last_modified_by, None);
    }

    #[test]
    fn conversions_carry_business_fields() {
        let lead = LeadInput {
            business_name: "Quick Tire".into(),
            business_email: "q@tire.com".into(),
            phone_number: "1".into(),
            source: LeadSource::Website,
            ..Default::default()
        };
        let contact = ContactInput::from(&lead);
        assert_eq!(contact.source, Some(LeadSource::Website));
        let dealer = DealerInput::from(&contact);
        assert_eq!(dealer.name, "Quick Tire");
        assert_eq!(dealer.status, DealerStatus::Pending);
    }
}
