//! 地址与行政区划
//!
//! 地址只保留一种规范表示：城市 / 省份 / 国家的 ID。
//! 旧的创建流程提交的是自由文本名称，由 `LocationDirectory::normalize` 映射为 ID。

use crate::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub street_name: String,
    #[serde(default)]
    pub street_number: String,
    #[serde(default)]
    pub unit_number: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub special_instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_id: Option<EntityId>,

    // 旧格式的自由文本，仅在无法解析为 ID 时保留
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    /// 三级 ID 都已确定
    pub fn is_normalized(&self) -> bool {
        self.city_id.is_some() && self.state_id.is_some() && self.country_id.is_some()
    }
}

/// 国家 -> 省份 -> 城市 的查找表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationDirectory {
    pub countries: Vec<Country>,
    pub provinces: Vec<Province>,
    pub cities: Vec<City>,
}

impl LocationDirectory {
    pub fn new(countries: Vec<Country>, provinces: Vec<Province>, cities: Vec<City>) -> Self {
        Self {
            countries,
            provinces,
            cities,
        }
    }

    pub fn provinces_of(&self, country_id: EntityId) -> Vec<Province> {
        self.provinces
            .iter()
            .filter(|p| p.country_id == Some(country_id))
            .cloned()
            .collect()
    }

    pub fn cities_of(&self, province_id: EntityId) -> Vec<City> {
        self.cities
            .iter()
            .filter(|c| c.province_id == Some(province_id))
            .cloned()
            .collect()
    }

    pub fn country_named(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|c| {
            c.name.eq_ignore_ascii_case(name)
                || c.code.as_deref().is_some_and(|code| code.eq_ignore_ascii_case(name))
        })
    }

    /// 省份名在国家范围内查找；国家未知时全局查找
    pub fn province_named(&self, name: &str, country_id: Option<EntityId>) -> Option<&Province> {
        self.provinces.iter().find(|p| {
            p.name.eq_ignore_ascii_case(name)
                && (country_id.is_none() || p.country_id == country_id)
        })
    }

    pub fn city_named(&self, name: &str, province_id: Option<EntityId>) -> Option<&City> {
        self.cities.iter().find(|c| {
            c.name.eq_ignore_ascii_case(name)
                && (province_id.is_none() || c.province_id == province_id)
        })
    }

    /// 把自由文本名称映射为 ID
    ///
    /// 已有的 ID 不会被覆盖；解析成功的名称字段会被清空，解析失败的保留原样。
    pub fn normalize(&self, address: &mut Address) {
        if address.country_id.is_none() {
            if let Some(country) = address.country.as_deref().and_then(|n| self.country_named(n)) {
                address.country_id = Some(country.id);
            }
        }
        if address.country_id.is_some() {
            address.country = None;
        }

        if address.state_id.is_none() {
            if let Some(province) = address
                .province
                .as_deref()
                .and_then(|n| self.province_named(n, address.country_id))
            {
                address.state_id = Some(province.id);
                if address.country_id.is_none() {
                    address.country_id = province.country_id;
                }
            }
        }
        if address.state_id.is_some() {
            address.province = None;
        }

        if address.city_id.is_none() {
            if let Some(city) = address
                .city
                .as_deref()
                .and_then(|n| self.city_named(n, address.state_id))
            {
                address.city_id = Some(city.id);
            }
        }
        if address.city_id.is_some() {
            address.city = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> LocationDirectory {
        LocationDirectory::new(
            vec![Country {
                id: 1,
                name: "Canada".into(),
                code: Some("CA".into()),
            }],
            vec![
                Province {
                    id: 10,
                    name: "Ontario".into(),
                    country_id: Some(1),
                },
                Province {
                    id: 11,
                    name: "Quebec".into(),
                    country_id: Some(1),
                },
            ],
            vec![
                City {
                    id: 100,
                    name: "Toronto".into(),
                    province_id: Some(10),
                },
                City {
                    id: 101,
                    name: "Ottawa".into(),
                    province_id: Some(10),
                },
            ],
        )
    }

    #[test]
    fn free_text_maps_to_ids() {
        let mut addr = Address {
            city: Some("toronto".into()),
            province: Some("Ontario".into()),
            country: Some("CANADA".into()),
            ..Default::default()
        };
        directory().normalize(&mut addr);
        assert!(addr.is_normalized());
        assert_eq!((addr.country_id, addr.state_id, addr.city_id), (Some(1), Some(10), Some(100)));
        assert_eq!(addr.city, None);
    }

    #[test]
    fn unknown_names_are_kept() {
        let mut addr = Address {
            city: Some("Springfield".into()),
            province: Some("Ontario".into()),
            ..Default::default()
        };
        directory().normalize(&mut addr);
        assert_eq!(addr.state_id, Some(10));
        assert_eq!(addr.country_id, Some(1));
        assert_eq!(addr.city_id, None);
        assert_eq!(addr.city.as_deref(), Some("Springfield"));
    }

    #[test]
    fn existing_ids_win() {
        let mut addr = Address {
            city_id: Some(101),
            city: Some("Toronto".into()),
            ..Default::default()
        };
        directory().normalize(&mut addr);
        assert_eq!(addr.city_id, Some(101));
        assert_eq!(addr.city, None);
    }

    #[test]
    fn cascade_lookups() {
        let dir = directory();
        assert_eq!(dir.provinces_of(1).len(), 2);
        assert_eq!(dir.cities_of(10).len(), 2);
        assert!(dir.cities_of(11).is_empty());
    }
}
