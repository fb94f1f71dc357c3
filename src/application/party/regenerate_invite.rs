use std::sync::Arc;

use uuid::Uuid;

use super::create_party::INVITE_CODE_ATTEMPTS;
use crate::domain::entities::generate_invite_code;
use crate::domain::repositories::{PartyRepository, RepositoryError};

/// Regenerate invite input
pub struct RegenerateInviteInput {
    pub account_id: Uuid,
}

/// Regenerate invite use case
pub struct RegenerateInvite<P: PartyRepository> {
    party_repo: Arc<P>,
}

impl<P: PartyRepository> RegenerateInvite<P> {
    pub fn new(party_repo: Arc<P>) -> Self {
        Self { party_repo }
    }

    /// Returns the new invite code
    pub async fn execute(
        &self,
        input: RegenerateInviteInput,
    ) -> Result<String, RegenerateInviteError> {
        let membership = self
            .party_repo
            .find_membership(input.account_id)
            .await?
            .ok_or(RegenerateInviteError::NotInParty)?;

        if !membership.is_owner() {
            return Err(RegenerateInviteError::NotOwner);
        }

        for attempt in 1..=INVITE_CODE_ATTEMPTS {
            let code = generate_invite_code();
            match self
                .party_repo
                .update_invite_code(membership.party_id, &code)
                .await
            {
                Ok(()) => {
                    tracing::info!(party_id = %membership.party_id, "Invite code regenerated");
                    return Ok(code);
                }
                Err(RepositoryError::InviteCodeTaken) => {
                    tracing::warn!(attempt, "Invite code collision while regenerating");
                }
                // Disbanded between the membership check and the update
                Err(RepositoryError::NotFound(_)) => return Err(RegenerateInviteError::NotInParty),
                Err(e) => return Err(e.into()),
            }
        }

        Err(RegenerateInviteError::InviteCodeExhausted)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegenerateInviteError {
    #[error("Not in a party")]
    NotInParty,
    #[error("Only the party owner can regenerate invites")]
    NotOwner,
    #[error("Could not allocate a unique invite code")]
    InviteCodeExhausted,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
