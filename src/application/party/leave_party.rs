use std::sync::Arc;

use uuid::Uuid;

use crate::domain::repositories::{PartyRepository, RepositoryError};

/// Leave party input
pub struct LeavePartyInput {
    pub account_id: Uuid,
}

/// What leaving did to the party
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeavePartyOutput {
    /// A member left; the party lives on
    Left,
    /// The owner left, taking the whole party with them
    Disbanded,
}

/// Leave party use case
pub struct LeaveParty<P: PartyRepository> {
    party_repo: Arc<P>,
}

impl<P: PartyRepository> LeaveParty<P> {
    pub fn new(party_repo: Arc<P>) -> Self {
        Self { party_repo }
    }

    pub async fn execute(&self, input: LeavePartyInput) -> Result<LeavePartyOutput, LeavePartyError> {
        let membership = self
            .party_repo
            .find_membership(input.account_id)
            .await?
            .ok_or(LeavePartyError::NotInParty)?;

        if membership.is_owner() {
            self.party_repo
                .disband(membership.party_id)
                .await
                .map_err(LeavePartyError::Disband)?;
            tracing::info!(party_id = %membership.party_id, "Owner left, party disbanded");
            return Ok(LeavePartyOutput::Disbanded);
        }

        self.party_repo
            .remove_member(membership.party_id, input.account_id)
            .await?;
        tracing::info!(party_id = %membership.party_id, account_id = %input.account_id, "Left party");

        Ok(LeavePartyOutput::Left)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeavePartyError {
    #[error("Not in a party")]
    NotInParty,
    #[error("Failed to disband party: {0}")]
    Disband(RepositoryError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
