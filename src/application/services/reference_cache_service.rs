use super::stored_json;
use crate::application::ports::KeyValueStore;
use crate::domain::entities::{CachedMember, CachedService};
use crate::shared::error::AppError;
use std::sync::Arc;

/// オフライン検索用のメンバー／サービス情報キャッシュ
pub struct ReferenceCacheService {
    store: Arc<dyn KeyValueStore>,
    members_key: String,
    services_key: String,
}

impl ReferenceCacheService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        members_key: impl Into<String>,
        services_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            members_key: members_key.into(),
            services_key: services_key.into(),
        }
    }

    pub async fn cache_members(&self, members: &[CachedMember]) -> Result<(), AppError> {
        stored_json::save(self.store.as_ref(), &self.members_key, members).await?;
        tracing::debug!(target: "offline::cache", count = members.len(), "members cached");
        Ok(())
    }

    pub async fn cache_services(&self, services: &[CachedService]) -> Result<(), AppError> {
        stored_json::save(self.store.as_ref(), &self.services_key, services).await?;
        tracing::debug!(target: "offline::cache", count = services.len(), "services cached");
        Ok(())
    }

    pub async fn get_cached_members(&self) -> Result<Vec<CachedMember>, AppError> {
        stored_json::load_or_default(self.store.as_ref(), &self.members_key).await
    }

    pub async fn get_cached_services(&self) -> Result<Vec<CachedService>, AppError> {
        stored_json::load_or_default(self.store.as_ref(), &self.services_key).await
    }

    pub async fn search_members(&self, query: &str) -> Result<Vec<CachedMember>, AppError> {
        let lowercase_query = query.to_lowercase();
        let members = self.get_cached_members().await?;
        Ok(members
            .into_iter()
            .filter(|member| member.matches(query, &lowercase_query))
            .collect())
    }

    pub async fn find_member(&self, member_id: i64) -> Result<Option<CachedMember>, AppError> {
        let members = self.get_cached_members().await?;
        Ok(members
            .into_iter()
            .find(|member| member.id == Some(member_id)))
    }

    pub async fn find_service(&self, service_id: i64) -> Result<Option<CachedService>, AppError> {
        let services = self.get_cached_services().await?;
        Ok(services
            .into_iter()
            .find(|service| service.id == Some(service_id)))
    }
}
