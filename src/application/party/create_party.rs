use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{generate_invite_code, MemberRole, Party, PartyMember};
use crate::domain::repositories::{PartyRepository, RepositoryError};

/// Fresh codes tried before giving up on a unique-index collision
pub(crate) const INVITE_CODE_ATTEMPTS: usize = 3;

/// Create party input
pub struct CreatePartyInput {
    pub account_id: Uuid,
}

/// Create party output
#[derive(Debug)]
pub struct CreatePartyOutput {
    /// The new party with its owner as the only member
    pub party: Party,
}

/// Create party use case
pub struct CreateParty<P: PartyRepository> {
    party_repo: Arc<P>,
}

impl<P: PartyRepository> CreateParty<P> {
    pub fn new(party_repo: Arc<P>) -> Self {
        Self { party_repo }
    }

    pub async fn execute(
        &self,
        input: CreatePartyInput,
    ) -> Result<CreatePartyOutput, CreatePartyError> {
        if self
            .party_repo
            .find_membership(input.account_id)
            .await?
            .is_some()
        {
            return Err(CreatePartyError::AlreadyInParty);
        }

        for attempt in 1..=INVITE_CODE_ATTEMPTS {
            let party = Party::new(input.account_id, generate_invite_code());
            let owner = PartyMember::new(party.id, input.account_id, MemberRole::Owner);

            match self.party_repo.create_with_owner(&party, &owner).await {
                Ok(()) => {
                    tracing::info!(party_id = %party.id, owner_id = %input.account_id, "Party created");
                    return Ok(CreatePartyOutput {
                        party: party.with_members(vec![owner]),
                    });
                }
                Err(RepositoryError::InviteCodeTaken) => {
                    tracing::warn!(attempt, "Invite code collision while creating party");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(CreatePartyError::InviteCodeExhausted)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CreatePartyError {
    #[error("Already in a party")]
    AlreadyInParty,
    #[error("Could not allocate a unique invite code")]
    InviteCodeExhausted,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
