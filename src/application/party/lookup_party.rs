//! Read-only lookups for sibling services.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::Party;
use crate::domain::repositories::{PartyRepository, RepositoryError};

/// Get party by ID use case
pub struct GetPartyById<P: PartyRepository> {
    party_repo: Arc<P>,
}

impl<P: PartyRepository> GetPartyById<P> {
    pub fn new(party_repo: Arc<P>) -> Self {
        Self { party_repo }
    }

    pub async fn execute(&self, party_id: Uuid) -> Result<Party, LookupPartyError> {
        self.party_repo
            .find_with_members(party_id)
            .await?
            .ok_or(LookupPartyError::PartyNotFound)
    }
}

/// Get the party an arbitrary player belongs to
pub struct GetPlayerParty<P: PartyRepository> {
    party_repo: Arc<P>,
}

impl<P: PartyRepository> GetPlayerParty<P> {
    pub fn new(party_repo: Arc<P>) -> Self {
        Self { party_repo }
    }

    pub async fn execute(&self, account_id: Uuid) -> Result<Party, LookupPartyError> {
        let membership = self
            .party_repo
            .find_membership(account_id)
            .await?
            .ok_or(LookupPartyError::PlayerNotInParty)?;

        let party = self
            .party_repo
            .find_with_members(membership.party_id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("party {}", membership.party_id)))?;

        Ok(party)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupPartyError {
    #[error("Party not found")]
    PartyNotFound,
    #[error("Player is not in a party")]
    PlayerNotInParty,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
