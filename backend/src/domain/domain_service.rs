use anyhow::Result;
use chrono::{Local, NaiveDate};
use shared::Domain;
use tracing::info;

use super::error::{validate_name, ValidationError};
use crate::storage::Storage;

/// Service for creating, sharing and deleting domains
#[derive(Clone)]
pub struct DomainService {
    storage: Storage,
}

impl DomainService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Create a domain owned by `owner`, starting its month today
    pub async fn create(&self, owner: i64, name: &str) -> Result<Domain> {
        self.create_as_of(owner, name, Local::now().date_naive()).await
    }

    pub async fn create_as_of(&self, owner: i64, name: &str, today: NaiveDate) -> Result<Domain> {
        let name = validate_name(name)?;
        self.require_minion(owner).await?;

        let domain = self.storage.domains.create_domain(owner, &name, today).await?;
        info!("Minion {} created domain {} ({})", owner, domain.id, domain.name);
        Ok(domain)
    }

    pub async fn get(&self, domain_id: i64) -> Result<Domain> {
        self.storage
            .domains
            .get_domain(domain_id)
            .await?
            .ok_or_else(|| ValidationError::DomainNotFound(domain_id).into())
    }

    /// Domains the minion owns or has joined
    pub async fn domains_for(&self, minion_id: i64) -> Result<Vec<Domain>> {
        self.storage.domains.domains_for_minion(minion_id).await
    }

    /// Delete a domain with all its tasks; only its owner may do this
    pub async fn delete(&self, minion_id: i64, domain_id: i64) -> Result<()> {
        let domain = self.get(domain_id).await?;
        if domain.owner != minion_id {
            return Err(ValidationError::NotDomainOwner { minion_id, domain_id }.into());
        }

        self.storage.domains.delete_domain(domain_id).await?;
        info!("Minion {} deleted domain {} ({})", minion_id, domain_id, domain.name);
        Ok(())
    }

    /// Make the minion a member of the domain
    pub async fn join(&self, minion_id: i64, domain_id: i64) -> Result<Domain> {
        self.require_minion(minion_id).await?;
        let domain = self.get(domain_id).await?;

        self.storage.domains.join_domain(domain_id, minion_id).await?;
        info!("Minion {} joined domain {}", minion_id, domain_id);
        Ok(domain)
    }

    async fn require_minion(&self, minion_id: i64) -> Result<()> {
        match self.storage.minions.get_minion(minion_id).await? {
            Some(_) => Ok(()),
            None => Err(ValidationError::MinionNotFound(minion_id).into()),
        }
    }
}
