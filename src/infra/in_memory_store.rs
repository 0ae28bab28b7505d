use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::app::ports::LeadStorePort;
use crate::domain::LeadPayload;
use crate::error::Result;

/// In-memory pending store for tests and embedding
#[derive(Default, Clone)]
pub struct InMemoryLeadStore {
    leads: Arc<Mutex<HashMap<Uuid, LeadPayload>>>,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadStorePort for InMemoryLeadStore {
    async fn save(&self, payload: &LeadPayload) -> Result<()> {
        let mut leads = self.leads.lock().unwrap_or_else(|e| e.into_inner());
        leads.insert(payload.submission_id(), payload.clone());
        Ok(())
    }

    async fn load(&self, submission_id: Uuid) -> Result<Option<LeadPayload>> {
        let leads = self.leads.lock().unwrap_or_else(|e| e.into_inner());
        Ok(leads.get(&submission_id).cloned())
    }

    async fn list(&self) -> Result<Vec<LeadPayload>> {
        let leads = self.leads.lock().unwrap_or_else(|e| e.into_inner());
        let mut all: Vec<LeadPayload> = leads.values().cloned().collect();
        all.sort_by_key(|lead| lead.submitted_at());
        Ok(all)
    }

    async fn remove(&self, submission_id: Uuid) -> Result<bool> {
        let mut leads = self.leads.lock().unwrap_or_else(|e| e.into_inner());
        Ok(leads.remove(&submission_id).is_some())
    }
}
