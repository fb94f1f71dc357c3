use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of an account within its party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Member => "member",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(MemberRole::Owner),
            "member" => Some(MemberRole::Member),
            _ => None,
        }
    }
}

/// PartyMember entity - one account's membership in a party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyMember {
    pub party_id: Uuid,
    pub account_id: Uuid,
    pub role: MemberRole,
    /// Unix milliseconds, UTC
    pub joined_at: i64,
}

impl PartyMember {
    pub fn new(party_id: Uuid, account_id: Uuid, role: MemberRole) -> Self {
        Self {
            party_id,
            account_id,
            role,
            joined_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn is_owner(&self) -> bool {
        self.role == MemberRole::Owner
    }
}
