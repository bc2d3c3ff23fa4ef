//! 夹具数据
//!
//! 形状与后端响应保持一致。地址在构造时通过查找表规范化为 ID。

use treadx_shared::{
    Address, AuthResponse, City, Contact, ContactInput, Country, Dealer, DealerInput,
    DealerStatus, EntityId, Lead, LeadInput, LeadSource, LeadStatus, LocationDirectory, Province,
    Role, RoleName, Timestamp, User,
};

pub const MOCK_ADMIN_EMAIL: &str = "admin@treadx.com";
pub const MOCK_ADMIN_PASSWORD: &str = "admin123";
pub const MOCK_TOKEN: &str = "mock-jwt-token-12345";

#[derive(Debug, Clone)]
pub struct MockData {
    pub auth_response: AuthResponse,
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub leads: Vec<Lead>,
    pub dealers: Vec<Dealer>,
    pub contacts: Vec<Contact>,
    pub locations: LocationDirectory,
}

impl MockData {
    /// 夹具中出现过的所有地址（线索、经销商、联系人）
    pub fn addresses(&self) -> Vec<Address> {
        let leads = self.leads.iter().filter_map(|l| l.base.address.clone());
        let dealers = self.dealers.iter().filter_map(|d| d.base.address.clone());
        let contacts = self.contacts.iter().filter_map(|c| c.base.address.clone());
        leads.chain(dealers).chain(contacts).collect()
    }
}

impl Default for MockData {
    fn default() -> Self {
        let locations = locations();
        let addr = |id,
                    street_name: &str,
                    street_number: &str,
                    postal: &str,
                    unit: &str,
                    city: &str,
                    province: &str,
                    instructions: &str| {
            let mut a = Address {
                id: Some(id),
                street_name: street_name.into(),
                street_number: street_number.into(),
                unit_number: unit.into(),
                postal_code: postal.into(),
                special_instructions: instructions.into(),
                city: Some(city.into()),
                province: Some(province.into()),
                country: Some("Canada".into()),
                ..Default::default()
            };
            locations.normalize(&mut a);
            a
        };

        let leads = vec![
            lead(
                1,
                "Quick Tire Solutions",
                "contact@quicktire.com",
                "+1-555-0123",
                LeadSource::Website,
                LeadStatus::New,
                "Interested in bulk tire purchasing for fleet vehicles",
                addr(
                    1,
                    "Main Street",
                    "123",
                    "12345",
                    "Suite 100",
                    "Toronto",
                    "Ontario",
                    "Ring buzzer for entry",
                ),
                ("2024-06-10T09:00:00Z", "2024-06-10T09:00:00Z"),
                (2, 2),
            ),
            lead(
                2,
                "Metro Auto Service",
                "info@metroauto.com",
                "+1-555-0124",
                LeadSource::Referral,
                LeadStatus::Contacted,
                "Follow up scheduled for next week",
                addr(
                    2,
                    "Industrial Blvd",
                    "456",
                    "67890",
                    "Unit 5",
                    "Vancouver",
                    "British Columbia",
                    "Loading dock at rear",
                ),
                ("2024-06-08T14:30:00Z", "2024-06-12T10:15:00Z"),
                (3, 2),
            ),
            lead(
                3,
                "Highway Tire Center",
                "sales@highwaytire.com",
                "+1-555-0125",
                LeadSource::TradeShow,
                LeadStatus::Qualified,
                "Ready to discuss partnership terms",
                addr(
                    3,
                    "Highway 401",
                    "789",
                    "54321",
                    "",
                    "Calgary",
                    "Alberta",
                    "Large facility, ask for manager",
                ),
                ("2024-06-05T11:20:00Z", "2024-06-13T16:45:00Z"),
                (2, 2),
            ),
        ];

        let dealers = vec![
            Dealer {
                id: 1,
                base: DealerInput {
                    name: "Premium Tire Distributors".into(),
                    email: "contact@premiumtire.com".into(),
                    phone: "+1-555-0200".into(),
                    status: DealerStatus::Active,
                    access_count: 150,
                    dealer_unique_id: Some("PTD-001".into()),
                    address: Some(addr(
                        10,
                        "Commerce Drive",
                        "100",
                        "98765",
                        "Building A",
                        "Montreal",
                        "Quebec",
                        "Main entrance",
                    )),
                },
                created_at: None,
                updated_at: None,
            },
            Dealer {
                id: 2,
                base: DealerInput {
                    name: "Elite Auto Parts".into(),
                    email: "info@eliteauto.com".into(),
                    phone: "+1-555-0201".into(),
                    status: DealerStatus::Active,
                    access_count: 89,
                    dealer_unique_id: Some("EAP-002".into()),
                    address: Some(addr(
                        11,
                        "Industrial Park",
                        "250",
                        "13579",
                        "Suite 200",
                        "Ottawa",
                        "Ontario",
                        "Second floor office",
                    )),
                },
                created_at: None,
                updated_at: None,
            },
        ];

        let contacts = vec![Contact {
            id: 1,
            base: ContactInput {
                business_name: "Tire Express Solutions".into(),
                business_email: "contact@tireexpress.com".into(),
                phone_number: "+1-555-0300".into(),
                source: Some(LeadSource::Website),
                status: Some("CONTACT".into()),
                notes: Some("Converted from lead, ready for dealer conversion".into()),
                dealer_id: None,
                dealer_unique_id: None,
                address: Some(addr(
                    20,
                    "Express Lane",
                    "500",
                    "24680",
                    "",
                    "Winnipeg",
                    "Manitoba",
                    "Call ahead for appointment",
                )),
            },
            created_at: ts("2024-06-01T12:00:00Z"),
            updated_at: ts("2024-06-14T09:30:00Z"),
            added_by: Some(2),
            last_modified_by: Some(2),
        }];

        let roles = vec![
            role(1, RoleName::PlatformAdmin, "Full system access with all permissions"),
            role(2, RoleName::SalesManager, "Sales management with team oversight"),
            role(3, RoleName::SalesAgent, "Basic sales operations"),
        ];

        let users = vec![
            user(
                1,
                "admin@treadx.com",
                "John",
                "Admin",
                "Platform Administrator",
                role(1, RoleName::PlatformAdmin, "Full system access"),
                "2024-01-15T10:00:00Z",
                (1, 1),
            ),
            user(
                2,
                "manager@treadx.com",
                "Sarah",
                "Manager",
                "Sales Manager",
                role(2, RoleName::SalesManager, "Sales management access"),
                "2024-01-16T09:00:00Z",
                (1, 1),
            ),
            user(
                3,
                "agent@treadx.com",
                "Mike",
                "Agent",
                "Sales Agent",
                role(3, RoleName::SalesAgent, "Basic sales access"),
                "2024-01-17T08:00:00Z",
                (2, 2),
            ),
        ];

        Self {
            auth_response: AuthResponse {
                token: MOCK_TOKEN.into(),
                email: MOCK_ADMIN_EMAIL.into(),
                first_name: "John".into(),
                last_name: "Admin".into(),
                role: RoleName::PlatformAdmin,
            },
            users,
            roles,
            leads,
            dealers,
            contacts,
            locations,
        }
    }
}

fn ts(s: &str) -> Option<Timestamp> {
    Timestamp::parse(s)
}

#[allow(clippy::too_many_arguments)]
fn lead(
    id: EntityId,
    name: &str,
    email: &str,
    phone: &str,
    source: LeadSource,
    status: LeadStatus,
    notes: &str,
    address: Address,
    (created, updated): (&str, &str),
    (added_by, modified_by): (EntityId, EntityId),
) -> Lead {
    Lead {
        id,
        base: LeadInput {
            business_name: name.into(),
            business_email: email.into(),
            phone_number: phone.into(),
            source,
            status,
            notes: Some(notes.into()),
            dealer_id: None,
            dealer_unique_id: None,
            address: Some(address),
        },
        created_at: ts(created),
        updated_at: ts(updated),
        added_by: Some(added_by),
        last_modified_by: Some(modified_by),
    }
}

fn role(id: EntityId, name: RoleName, description: &str) -> Role {
    Role {
        id,
        name,
        description: description.into(),
    }
}

#[allow(clippy::too_many_arguments)]
fn user(
    id: EntityId,
    email: &str,
    first: &str,
    last: &str,
    position: &str,
    role: Role,
    at: &str,
    (created_by, updated_by): (EntityId, EntityId),
) -> User {
    User {
        id,
        email: email.into(),
        first_name: first.into(),
        last_name: last.into(),
        position: Some(position.into()),
        role,
        additional_permissions: Vec::new(),
        created_at: ts(at),
        updated_at: ts(at),
        created_by: Some(created_by),
        updated_by: Some(updated_by),
    }
}

fn locations() -> LocationDirectory {
    let country = |id, name: &str, code: &str| Country {
        id,
        name: name.into(),
        code: Some(code.into()),
    };
    let province = |id, name: &str, country_id| Province {
        id,
        name: name.into(),
        country_id: Some(country_id),
    };
    let city = |id, name: &str, province_id| City {
        id,
        name: name.into(),
        province_id: Some(province_id),
    };

    LocationDirectory::new(
        vec![
            country(1, "Canada", "CA"),
            country(2, "United States", "US"),
            country(3, "Mexico", "MX"),
        ],
        vec![
            province(1, "Ontario", 1),
            province(2, "British Columbia", 1),
            province(3, "Quebec", 1),
            province(4, "Alberta", 1),
            province(5, "Manitoba", 1),
            province(6, "California", 2),
            province(7, "New York", 2),
            province(8, "Jalisco", 3),
        ],
        vec![
            city(1, "Toronto", 1),
            city(2, "Vancouver", 2),
            city(3, "Montreal", 3),
            city(4, "Calgary", 4),
            city(5, "Ottawa", 1),
            city(6, "Winnipeg", 5),
        ],
    )
}
