use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{MemberRole, Party, PartyMember};

/// Convert Unix milliseconds to an RFC 3339 string
pub fn timestamp_to_rfc3339(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        .unwrap_or_else(|| "1970-01-01T00:00:00.000Z".to_string())
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct JoinPartyRequest {
    pub invite_code: Option<String>,
}

/// Body of kick and transfer
#[derive(Debug, Deserialize)]
pub struct TargetAccountRequest {
    pub account_id: Option<Uuid>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub party_id: Uuid,
    pub account_id: Uuid,
    pub role: MemberRole,
    pub joined_at: String,
}

impl From<PartyMember> for MemberResponse {
    fn from(member: PartyMember) -> Self {
        Self {
            party_id: member.party_id,
            account_id: member.account_id,
            role: member.role,
            joined_at: timestamp_to_rfc3339(member.joined_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PartyResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub invite_code: String,
    pub max_size: u32,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberResponse>,
}

impl From<Party> for PartyResponse {
    fn from(party: Party) -> Self {
        Self {
            id: party.id,
            owner_id: party.owner_id,
            invite_code: party.invite_code,
            max_size: party.max_size,
            created_at: timestamp_to_rfc3339(party.created_at),
            updated_at: timestamp_to_rfc3339(party.updated_at),
            members: party.members.into_iter().map(MemberResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InviteCodeResponse {
    pub invite_code: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
