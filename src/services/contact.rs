use crate::api::ApiClient;
use crate::error::ClientResult;
use treadx_shared::{
    Contact, ContactInput, Dealer, DealerInput, EntityId, Page, PageRequest, endpoints,
};

pub struct ContactService<'a> {
    client: &'a ApiClient,
}

impl<'a> ContactService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_contacts(&self, page: &PageRequest) -> ClientResult<Page<Contact>> {
        self.client
            .get_query(endpoints::CONTACTS, page.query_pairs())
            .await
    }

    pub async fn get_contact_by_id(&self, id: EntityId) -> ClientResult<Contact> {
        self.client.get(&endpoints::contact_by_id(id)).await
    }

    pub async fn create_contact(&self, contact: &ContactInput) -> ClientResult<Contact> {
        self.client.post(endpoints::CONTACTS, contact).await
    }

    pub async fn update_contact(
        &self,
        id: EntityId,
        contact: &ContactInput,
    ) -> ClientResult<Contact> {
        self.client.put(&endpoints::contact_by_id(id), contact).await
    }

    pub async fn delete_contact(&self, id: EntityId) -> ClientResult<()> {
        self.client.delete(&endpoints::contact_by_id(id)).await
    }

    pub async fn convert_contact_to_dealer(
        &self,
        id: EntityId,
        dealer: &DealerInput,
    ) -> ClientResult<Dealer> {
        self.client
            .post(&endpoints::convert_contact_to_dealer(id), dealer)
            .await
    }
}
