use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Party, PartyMember};

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Invite code already taken")]
    InviteCodeTaken,
    #[error("Owner role no longer held by the transferring member")]
    OwnerChanged,
    #[error("Database error: {0}")]
    Database(String),
}

/// Party repository trait
#[async_trait]
pub trait PartyRepository: Send + Sync {
    // ========== Lookups ==========

    /// Find the single membership held by an account
    async fn find_membership(&self, account_id: Uuid)
        -> Result<Option<PartyMember>, RepositoryError>;

    /// Find party by ID (members not loaded)
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Party>, RepositoryError>;

    /// Find party by invite code (members not loaded)
    async fn find_by_invite_code(&self, code: &str) -> Result<Option<Party>, RepositoryError>;

    /// Get party members ordered by join time
    async fn get_members(&self, party_id: Uuid) -> Result<Vec<PartyMember>, RepositoryError>;

    /// Find party by ID with its members loaded
    async fn find_with_members(&self, id: Uuid) -> Result<Option<Party>, RepositoryError> {
        match self.find_by_id(id).await? {
            Some(party) => {
                let members = self.get_members(id).await?;
                Ok(Some(party.with_members(members)))
            }
            None => Ok(None),
        }
    }

    // ========== Writes ==========

    /// Insert a party and its owner membership in one transaction
    async fn create_with_owner(
        &self,
        party: &Party,
        owner: &PartyMember,
    ) -> Result<(), RepositoryError>;

    /// Insert a member only while the party is below `max_size`.
    /// Returns false when the party was full.
    async fn add_member_if_room(
        &self,
        member: &PartyMember,
        max_size: u32,
    ) -> Result<bool, RepositoryError>;

    /// Remove a single membership
    async fn remove_member(&self, party_id: Uuid, account_id: Uuid)
        -> Result<(), RepositoryError>;

    /// Swap owner/member roles and update `owner_id` in one transaction.
    /// Fails with `OwnerChanged` when `from` no longer holds the owner role.
    async fn transfer_ownership(
        &self,
        party_id: Uuid,
        from: Uuid,
        to: Uuid,
    ) -> Result<(), RepositoryError>;

    /// Delete all memberships then the party, in one transaction
    async fn disband(&self, party_id: Uuid) -> Result<(), RepositoryError>;

    /// Replace the invite code; `NotFound` when the party is gone
    async fn update_invite_code(&self, party_id: Uuid, code: &str)
        -> Result<(), RepositoryError>;
}
