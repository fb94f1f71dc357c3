use std::sync::Arc;

use uuid::Uuid;

use crate::domain::repositories::{PartyRepository, RepositoryError};

/// Disband party input
pub struct DisbandPartyInput {
    pub account_id: Uuid,
}

/// Disband party use case
pub struct DisbandParty<P: PartyRepository> {
    party_repo: Arc<P>,
}

impl<P: PartyRepository> DisbandParty<P> {
    pub fn new(party_repo: Arc<P>) -> Self {
        Self { party_repo }
    }

    pub async fn execute(&self, input: DisbandPartyInput) -> Result<(), DisbandPartyError> {
        let membership = self
            .party_repo
            .find_membership(input.account_id)
            .await?
            .ok_or(DisbandPartyError::NotInParty)?;

        if !membership.is_owner() {
            return Err(DisbandPartyError::NotOwner);
        }

        self.party_repo.disband(membership.party_id).await?;

        tracing::info!(party_id = %membership.party_id, "Party disbanded");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DisbandPartyError {
    #[error("Not in a party")]
    NotInParty,
    #[error("Only the party owner can disband")]
    NotOwner,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
