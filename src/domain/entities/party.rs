use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PartyMember;

/// Capacity assigned to every new party
pub const DEFAULT_MAX_SIZE: u32 = 8;

/// Party entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub invite_code: String,
    pub max_size: u32,
    /// Unix milliseconds, UTC
    pub created_at: i64,
    pub updated_at: i64,
    /// Loaded on demand; empty when only the party row was fetched
    #[serde(default)]
    pub members: Vec<PartyMember>,
}

impl Party {
    /// Create a new party owned by `owner_id`
    pub fn new(owner_id: Uuid, invite_code: String) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            invite_code,
            max_size: DEFAULT_MAX_SIZE,
            created_at: now,
            updated_at: now,
            members: Vec::new(),
        }
    }

    /// Check if party is full for the given member count
    pub fn is_full(&self, current_member_count: usize) -> bool {
        current_member_count >= self.max_size as usize
    }

    pub fn with_members(mut self, members: Vec<PartyMember>) -> Self {
        self.members = members;
        self
    }

    /// The member row holding the owner role, if loaded
    pub fn owner(&self) -> Option<&PartyMember> {
        self.members.iter().find(|m| m.is_owner())
    }
}

/// Generate an 8-character lowercase hex invite code from 4 OS-random bytes
pub fn generate_invite_code() -> String {
    let mut bytes = [0u8; 4];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
