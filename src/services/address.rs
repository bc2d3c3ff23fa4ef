use crate::api::ApiClient;
use crate::error::ClientResult;
use futures::future::try_join_all;
use treadx_shared::{Address, City, Country, EntityId, LocationDirectory, Province, endpoints};

/// 地址 CRUD 与 国家 → 省份 → 城市 的级联查询
pub struct AddressService<'a> {
    client: &'a ApiClient,
}

impl<'a> AddressService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_addresses(&self) -> ClientResult<Vec<Address>> {
        self.client.get(endpoints::ADDRESSES).await
    }

    pub async fn get_address_by_id(&self, id: EntityId) -> ClientResult<Address> {
        self.client.get(&endpoints::address_by_id(id)).await
    }

    pub async fn create_address(&self, address: &Address) -> ClientResult<Address> {
        self.client.post(endpoints::ADDRESSES, address).await
    }

    pub async fn update_address(&self, id: EntityId, address: &Address) -> ClientResult<Address> {
        self.client.put(&endpoints::address_by_id(id), address).await
    }

    pub async fn delete_address(&self, id: EntityId) -> ClientResult<()> {
        self.client.delete(&endpoints::address_by_id(id)).await
    }

    pub async fn get_countries(&self) -> ClientResult<Vec<Country>> {
        self.client.get(endpoints::COUNTRIES).await
    }

    pub async fn get_provinces_by_country(
        &self,
        country_id: EntityId,
    ) -> ClientResult<Vec<Province>> {
        self.client
            .get(&endpoints::provinces_by_country(country_id))
            .await
    }

    pub async fn get_cities_by_province(&self, province_id: EntityId) -> ClientResult<Vec<City>> {
        self.client
            .get(&endpoints::cities_by_province(province_id))
            .await
    }

    /// 沿级联接口拉取完整的地点目录
    ///
    /// 每次调用都重新请求，不做缓存。任一层失败则整体失败。
    pub async fn load_directory(&self) -> ClientResult<LocationDirectory> {
        let countries = self.get_countries().await?;

        let provinces: Vec<Province> =
            try_join_all(countries.iter().map(|c| self.get_provinces_by_country(c.id)))
                .await?
                .into_iter()
                .flatten()
                .collect();

        let cities: Vec<City> =
            try_join_all(provinces.iter().map(|p| self.get_cities_by_province(p.id)))
                .await?
                .into_iter()
                .flatten()
                .collect();

        tracing::debug!(
            countries = countries.len(),
            provinces = provinces.len(),
            cities = cities.len(),
            "location directory loaded"
        );
        Ok(LocationDirectory::new(countries, provinces, cities))
    }

    /// 旧格式的自由文本地址先映射为 ID 再提交
    pub async fn create_normalized(&self, mut address: Address) -> ClientResult<Address> {
        if !address.is_normalized() {
            self.load_directory().await?.normalize(&mut address);
        }
        self.create_address(&address).await
    }
}
