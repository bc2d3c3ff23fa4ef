use crate::api::ApiClient;
use crate::error::ClientResult;
use treadx_shared::{Contact, ContactInput, EntityId, Lead, LeadInput, Page, PageRequest, endpoints};

pub struct LeadService<'a> {
    client: &'a ApiClient,
}

impl<'a> LeadService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_leads(&self, page: &PageRequest) -> ClientResult<Page<Lead>> {
        self.client
            .get_query(endpoints::LEADS, page.query_pairs())
            .await
    }

    pub async fn get_lead_by_id(&self, id: EntityId) -> ClientResult<Lead> {
        self.client.get(&endpoints::lead_by_id(id)).await
    }

    pub async fn create_lead(&self, lead: &LeadInput) -> ClientResult<Lead> {
        self.client.post(endpoints::LEADS, lead).await
    }

    pub async fn update_lead(&self, id: EntityId, lead: &LeadInput) -> ClientResult<Lead> {
        self.client.put(&endpoints::lead_by_id(id), lead).await
    }

    pub async fn delete_lead(&self, id: EntityId) -> ClientResult<()> {
        self.client.delete(&endpoints::lead_by_id(id)).await
    }

    /// 返回新建的联系人；源线索的状态由后端负责更新
    pub async fn convert_lead_to_contact(
        &self,
        id: EntityId,
        contact: &ContactInput,
    ) -> ClientResult<Contact> {
        self.client
            .post(&endpoints::convert_lead_to_contact(id), contact)
            .await
    }
}
