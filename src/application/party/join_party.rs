use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{MemberRole, Party, PartyMember};
use crate::domain::repositories::{PartyRepository, RepositoryError};

/// Join party input
pub struct JoinPartyInput {
    pub account_id: Uuid,
    pub invite_code: String,
}

/// Join party use case
pub struct JoinParty<P: PartyRepository> {
    party_repo: Arc<P>,
}

impl<P: PartyRepository> JoinParty<P> {
    pub fn new(party_repo: Arc<P>) -> Self {
        Self { party_repo }
    }

    /// Returns the joined party with its updated member list
    pub async fn execute(&self, input: JoinPartyInput) -> Result<Party, JoinPartyError> {
        if input.invite_code.is_empty() {
            return Err(JoinPartyError::MissingInviteCode);
        }

        if self
            .party_repo
            .find_membership(input.account_id)
            .await?
            .is_some()
        {
            return Err(JoinPartyError::AlreadyInParty);
        }

        let party = self
            .party_repo
            .find_by_invite_code(&input.invite_code)
            .await?
            .ok_or(JoinPartyError::InvalidCode)?;

        let members = self.party_repo.get_members(party.id).await?;
        if party.is_full(members.len()) {
            return Err(JoinPartyError::PartyFull);
        }

        // A concurrent join may have taken the last slot since the count above
        let member = PartyMember::new(party.id, input.account_id, MemberRole::Member);
        if !self
            .party_repo
            .add_member_if_room(&member, party.max_size)
            .await?
        {
            return Err(JoinPartyError::PartyFull);
        }

        tracing::info!(party_id = %party.id, account_id = %input.account_id, "Joined party");

        let party = self
            .party_repo
            .find_with_members(party.id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("party {}", party.id)))?;

        Ok(party)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JoinPartyError {
    #[error("invite_code is required")]
    MissingInviteCode,
    #[error("Already in a party")]
    AlreadyInParty,
    #[error("Invalid invite code")]
    InvalidCode,
    #[error("Party is full")]
    PartyFull,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
