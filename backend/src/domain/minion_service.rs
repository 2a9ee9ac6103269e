use anyhow::Result;
use shared::Minion;
use std::sync::Arc;
use tracing::{info, warn};

use super::error::{validate_name, ValidationError};
use crate::storage::{MinionStorage, Storage};

/// Service for the people chores are handed to
#[derive(Clone)]
pub struct MinionService {
    minions: Arc<dyn MinionStorage>,
}

impl MinionService {
    pub fn new(storage: &Storage) -> Self {
        Self {
            minions: storage.minions.clone(),
        }
    }

    /// Sign-in: look a minion up by email, creating it the first time
    pub async fn find_or_create(&self, email: &str, name: &str) -> Result<Minion> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::EmptyEmail.into());
        }
        let name = validate_name(name)?;

        let minion = self.minions.find_or_create_minion(email, &name).await?;
        info!("Minion {} signed in as {}", minion.id, minion.email);
        Ok(minion)
    }

    pub async fn get(&self, minion_id: i64) -> Result<Option<Minion>> {
        let minion = self.minions.get_minion(minion_id).await?;
        if minion.is_none() {
            warn!("Minion not found: {}", minion_id);
        }
        Ok(minion)
    }

    /// Like [`MinionService::get`] but a missing minion is an error
    pub async fn require(&self, minion_id: i64) -> Result<Minion> {
        self.get(minion_id)
            .await?
            .ok_or_else(|| ValidationError::MinionNotFound(minion_id).into())
    }

    pub async fn list(&self) -> Result<Vec<Minion>> {
        self.minions.list_minions().await
    }

    pub async fn rename(&self, minion_id: i64, name: &str) -> Result<Minion> {
        let name = validate_name(name)?;
        if !self.minions.rename_minion(minion_id, &name).await? {
            return Err(ValidationError::MinionNotFound(minion_id).into());
        }
        info!("Renamed minion {} to {}", minion_id, name);
        self.require(minion_id).await
    }
}
