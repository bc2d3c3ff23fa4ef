use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier type shared by every backend entity.
pub type EntityId = i64;

// =========================================================
// Endpoint Table
// =========================================================

/// Backend routes, all rooted at `/api/v1`.
pub mod endpoints {
    use super::EntityId;

    pub const API_PREFIX: &str = "/api/v1";

    pub const LOGIN: &str = "/api/v1/users/login";

    pub const USERS: &str = "/api/v1/users";
    pub fn user_by_id(id: EntityId) -> String {
        format!("{USERS}/{id}")
    }

    pub const ROLES: &str = "/api/v1/roles";
    pub fn role_by_id(id: EntityId) -> String {
        format!("{ROLES}/{id}")
    }
    pub fn role_permissions(id: EntityId) -> String {
        format!("{ROLES}/{id}/permissions")
    }

    pub const LEADS: &str = "/api/v1/leads";
    pub fn lead_by_id(id: EntityId) -> String {
        format!("{LEADS}/{id}")
    }
    pub fn convert_lead_to_contact(id: EntityId) -> String {
        format!("{LEADS}/{id}/convert-to-contact")
    }

    pub const DEALERS: &str = "/api/v1/dealers";
    pub fn dealer_by_id(id: EntityId) -> String {
        format!("{DEALERS}/{id}")
    }

    pub const CONTACTS: &str = "/api/v1/contacts";
    pub fn contact_by_id(id: EntityId) -> String {
        format!("{CONTACTS}/{id}")
    }
    pub fn convert_contact_to_dealer(id: EntityId) -> String {
        format!("{CONTACTS}/{id}/convert-to-dealer")
    }

    pub const ADDRESSES: &str = "/api/v1/addresses";
    pub fn address_by_id(id: EntityId) -> String {
        format!("{ADDRESSES}/{id}")
    }

    pub const COUNTRIES: &str = "/api/v1/addresses/base/countries";
    pub fn provinces_by_country(country_id: EntityId) -> String {
        format!("{COUNTRIES}/{country_id}/provinces")
    }
    pub fn cities_by_province(province_id: EntityId) -> String {
        format!("/api/v1/addresses/base/provinces/{province_id}/cities")
    }
}

// =========================================================
// List Query Parameters
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Page selection sent with every list call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub direction: SortDirection,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort_by: "createdAt".to_string(),
            direction: SortDirection::Desc,
        }
    }
}

impl PageRequest {
    /// Page `page` of `size` rows, default sort.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = field.into();
        self.direction = direction;
        self
    }

    /// Query pairs in wire order: page, size, sortBy, direction.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
            ("sortBy".to_string(), self.sort_by.clone()),
            ("direction".to_string(), self.direction.as_str().to_string()),
        ]
    }
}
