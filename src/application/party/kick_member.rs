use std::sync::Arc;

use uuid::Uuid;

use crate::domain::repositories::{PartyRepository, RepositoryError};

/// Kick member input
pub struct KickMemberInput {
    pub account_id: Uuid,
    pub target_id: Uuid,
}

/// Kick member use case
pub struct KickMember<P: PartyRepository> {
    party_repo: Arc<P>,
}

impl<P: PartyRepository> KickMember<P> {
    pub fn new(party_repo: Arc<P>) -> Self {
        Self { party_repo }
    }

    pub async fn execute(&self, input: KickMemberInput) -> Result<(), KickMemberError> {
        if input.target_id == input.account_id {
            return Err(KickMemberError::CannotKickSelf);
        }

        let membership = self
            .party_repo
            .find_membership(input.account_id)
            .await?
            .filter(|m| m.is_owner())
            .ok_or(KickMemberError::NotOwner)?;

        let target = self
            .party_repo
            .find_membership(input.target_id)
            .await?
            .filter(|t| t.party_id == membership.party_id)
            .ok_or(KickMemberError::TargetNotInParty)?;

        self.party_repo
            .remove_member(target.party_id, target.account_id)
            .await?;

        tracing::info!(party_id = %membership.party_id, target_id = %input.target_id, "Member kicked");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KickMemberError {
    #[error("Cannot kick yourself. Use leave.")]
    CannotKickSelf,
    #[error("Only the party owner can kick members")]
    NotOwner,
    #[error("That player is not in your party")]
    TargetNotInParty,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
