use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::Party;
use crate::domain::repositories::{PartyRepository, RepositoryError};

/// Transfer ownership input
pub struct TransferOwnershipInput {
    pub account_id: Uuid,
    pub target_id: Uuid,
}

/// Transfer ownership use case
pub struct TransferOwnership<P: PartyRepository> {
    party_repo: Arc<P>,
}

impl<P: PartyRepository> TransferOwnership<P> {
    pub fn new(party_repo: Arc<P>) -> Self {
        Self { party_repo }
    }

    /// Returns the party as seen after the transfer
    pub async fn execute(
        &self,
        input: TransferOwnershipInput,
    ) -> Result<Party, TransferOwnershipError> {
        if input.target_id == input.account_id {
            return Err(TransferOwnershipError::AlreadyOwner);
        }

        let membership = self
            .party_repo
            .find_membership(input.account_id)
            .await?
            .filter(|m| m.is_owner())
            .ok_or(TransferOwnershipError::NotOwner)?;

        self.party_repo
            .find_membership(input.target_id)
            .await?
            .filter(|t| t.party_id == membership.party_id)
            .ok_or(TransferOwnershipError::TargetNotInParty)?;

        match self
            .party_repo
            .transfer_ownership(membership.party_id, input.account_id, input.target_id)
            .await
        {
            Ok(()) => {}
            Err(RepositoryError::OwnerChanged) => return Err(TransferOwnershipError::NotOwner),
            Err(RepositoryError::NotFound(_)) => {
                return Err(TransferOwnershipError::TargetNotInParty)
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            party_id = %membership.party_id,
            from = %input.account_id,
            to = %input.target_id,
            "Ownership transferred"
        );

        let party = self
            .party_repo
            .find_with_members(membership.party_id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("party {}", membership.party_id)))?;

        Ok(party)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransferOwnershipError {
    #[error("You are already the owner")]
    AlreadyOwner,
    #[error("Only the party owner can transfer ownership")]
    NotOwner,
    #[error("That player is not in your party")]
    TargetNotInParty,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
