use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::Party;
use crate::domain::repositories::{PartyRepository, RepositoryError};

/// Get my party input
pub struct GetMyPartyInput {
    pub account_id: Uuid,
}

/// Get my party use case
pub struct GetMyParty<P: PartyRepository> {
    party_repo: Arc<P>,
}

impl<P: PartyRepository> GetMyParty<P> {
    pub fn new(party_repo: Arc<P>) -> Self {
        Self { party_repo }
    }

    pub async fn execute(&self, input: GetMyPartyInput) -> Result<Party, GetMyPartyError> {
        let membership = self
            .party_repo
            .find_membership(input.account_id)
            .await?
            .ok_or(GetMyPartyError::NotInParty)?;

        let party = self
            .party_repo
            .find_with_members(membership.party_id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("party {}", membership.party_id)))?;

        Ok(party)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GetMyPartyError {
    #[error("Not in a party")]
    NotInParty,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
