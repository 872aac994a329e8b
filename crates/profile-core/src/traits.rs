use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{CompanyProfile, FactRecord, ProfileError};

/// Trait for upstream filing-fact providers (EDGAR extractors, fixtures).
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch_facts(&self, company_id: &str) -> Result<Vec<FactRecord>, ProfileError>;
}

/// Trait for profile persistence backends. One document per company,
/// written whole on every rebuild.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load_profile(&self, company_id: &str)
        -> Result<Option<CompanyProfile>, ProfileError>;

    async fn store_profile(
        &self,
        company_id: &str,
        profile: &CompanyProfile,
    ) -> Result<(), ProfileError>;
}

/// Fact source backed by a fixed record set, for pre-extracted data and
/// tests.
#[derive(Debug, Clone, Default)]
pub struct StaticFactSource {
    records: Vec<FactRecord>,
}

impl StaticFactSource {
    pub fn new(records: Vec<FactRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl FactSource for StaticFactSource {
    async fn fetch_facts(&self, _company_id: &str) -> Result<Vec<FactRecord>, ProfileError> {
        Ok(self.records.clone())
    }
}

/// In-memory profile store.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<String, CompanyProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, CompanyProfile>>, ProfileError> {
        self.profiles
            .lock()
            .map_err(|_| ProfileError::Store("profile store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn load_profile(
        &self,
        company_id: &str,
    ) -> Result<Option<CompanyProfile>, ProfileError> {
        Ok(self.guard()?.get(company_id).cloned())
    }

    async fn store_profile(
        &self,
        company_id: &str,
        profile: &CompanyProfile,
    ) -> Result<(), ProfileError> {
        self.guard()?.insert(company_id.to_string(), profile.clone());
        Ok(())
    }
}
