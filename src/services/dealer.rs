use crate::api::ApiClient;
use crate::error::ClientResult;
use treadx_shared::{Dealer, DealerInput, EntityId, Page, PageRequest, endpoints};

pub struct DealerService<'a> {
    client: &'a ApiClient,
}

impl<'a> DealerService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_dealers(&self, page: &PageRequest) -> ClientResult<Page<Dealer>> {
        self.client
            .get_query(endpoints::DEALERS, page.query_pairs())
            .await
    }

    pub async fn get_dealer_by_id(&self, id: EntityId) -> ClientResult<Dealer> {
        self.client.get(&endpoints::dealer_by_id(id)).await
    }

    pub async fn create_dealer(&self, dealer: &DealerInput) -> ClientResult<Dealer> {
        self.client.post(endpoints::DEALERS, dealer).await
    }

    pub async fn update_dealer(&self, id: EntityId, dealer: &DealerInput) -> ClientResult<Dealer> {
        self.client.put(&endpoints::dealer_by_id(id), dealer).await
    }

    pub async fn delete_dealer(&self, id: EntityId) -> ClientResult<()> {
        self.client.delete(&endpoints::dealer_by_id(id)).await
    }
}
