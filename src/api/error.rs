//! Maps use-case failures onto HTTP status codes and `{error, message}` bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::dto::ErrorResponse;
use crate::application::party::{
    CreatePartyError, DisbandPartyError, GetMyPartyError, JoinPartyError, KickMemberError,
    LeavePartyError, LookupPartyError, RegenerateInviteError, TransferOwnershipError,
};

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error,
            message: message.into(),
        }
    }

    pub fn bad_request(error: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    fn forbidden(error: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, error, message)
    }

    fn not_found(error: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error, message)
    }

    fn conflict(error: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, error, message)
    }

    /// Storage failure; details go to the log, not the client
    fn internal(error: &'static str, message: &str, cause: &dyn std::fmt::Display) -> Self {
        tracing::error!("{}: {}", error, cause);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.error.to_string(),
            message: self.message,
        });

        (self.status, body).into_response()
    }
}

const ALREADY_IN_PARTY: &str = "You are already in a party. Leave first.";
const SELF_NOT_IN_PARTY: &str = "You are not in a party";
const TARGET_NOT_IN_PARTY: &str = "That player is not in your party";

impl From<CreatePartyError> for ApiError {
    fn from(e: CreatePartyError) -> Self {
        match e {
            CreatePartyError::AlreadyInParty => Self::conflict("already_in_party", ALREADY_IN_PARTY),
            CreatePartyError::InviteCodeExhausted => {
                Self::internal("create_failed", "Failed to create party", &e)
            }
            CreatePartyError::Repository(ref cause) => {
                Self::internal("create_failed", "Failed to create party", cause)
            }
        }
    }
}

impl From<GetMyPartyError> for ApiError {
    fn from(e: GetMyPartyError) -> Self {
        match e {
            GetMyPartyError::NotInParty => Self::not_found("not_in_party", SELF_NOT_IN_PARTY),
            GetMyPartyError::Repository(cause) => {
                Self::internal("fetch_failed", "Failed to fetch party", &cause)
            }
        }
    }
}

impl From<JoinPartyError> for ApiError {
    fn from(e: JoinPartyError) -> Self {
        match e {
            JoinPartyError::MissingInviteCode => {
                Self::bad_request("invalid_request", "invite_code is required")
            }
            JoinPartyError::AlreadyInParty => Self::conflict("already_in_party", ALREADY_IN_PARTY),
            JoinPartyError::InvalidCode => Self::not_found("invalid_code", "Invalid invite code"),
            JoinPartyError::PartyFull => Self::conflict("party_full", "Party is full"),
            JoinPartyError::Repository(cause) => {
                Self::internal("join_failed", "Failed to join party", &cause)
            }
        }
    }
}

impl From<LeavePartyError> for ApiError {
    fn from(e: LeavePartyError) -> Self {
        match e {
            LeavePartyError::NotInParty => Self::not_found("not_in_party", SELF_NOT_IN_PARTY),
            LeavePartyError::Disband(cause) => {
                Self::internal("disband_failed", "Failed to disband party", &cause)
            }
            LeavePartyError::Repository(cause) => {
                Self::internal("leave_failed", "Failed to leave party", &cause)
            }
        }
    }
}

impl From<KickMemberError> for ApiError {
    fn from(e: KickMemberError) -> Self {
        match e {
            KickMemberError::CannotKickSelf => Self::bad_request("invalid_request", e.to_string()),
            KickMemberError::NotOwner => Self::forbidden("not_owner", e.to_string()),
            KickMemberError::TargetNotInParty => {
                Self::not_found("not_in_party", TARGET_NOT_IN_PARTY)
            }
            KickMemberError::Repository(cause) => {
                Self::internal("kick_failed", "Failed to kick member", &cause)
            }
        }
    }
}

impl From<TransferOwnershipError> for ApiError {
    fn from(e: TransferOwnershipError) -> Self {
        match e {
            TransferOwnershipError::AlreadyOwner => {
                Self::bad_request("invalid_request", e.to_string())
            }
            TransferOwnershipError::NotOwner => Self::forbidden("not_owner", e.to_string()),
            TransferOwnershipError::TargetNotInParty => {
                Self::not_found("not_in_party", TARGET_NOT_IN_PARTY)
            }
            TransferOwnershipError::Repository(cause) => {
                Self::internal("transfer_failed", "Failed to transfer ownership", &cause)
            }
        }
    }
}

impl From<DisbandPartyError> for ApiError {
    fn from(e: DisbandPartyError) -> Self {
        match e {
            DisbandPartyError::NotInParty => Self::not_found("not_in_party", SELF_NOT_IN_PARTY),
            DisbandPartyError::NotOwner => Self::forbidden("not_owner", e.to_string()),
            DisbandPartyError::Repository(cause) => {
                Self::internal("disband_failed", "Failed to disband party", &cause)
            }
        }
    }
}

impl From<RegenerateInviteError> for ApiError {
    fn from(e: RegenerateInviteError) -> Self {
        match e {
            RegenerateInviteError::NotInParty => {
                Self::not_found("not_in_party", SELF_NOT_IN_PARTY)
            }
            RegenerateInviteError::NotOwner => Self::forbidden("not_owner", e.to_string()),
            RegenerateInviteError::InviteCodeExhausted => {
                Self::internal("regenerate_failed", "Failed to regenerate invite code", &e)
            }
            RegenerateInviteError::Repository(ref cause) => {
                Self::internal("regenerate_failed", "Failed to regenerate invite code", cause)
            }
        }
    }
}

impl From<LookupPartyError> for ApiError {
    fn from(e: LookupPartyError) -> Self {
        match e {
            LookupPartyError::PartyNotFound => Self::not_found("not_found", "Party not found"),
            LookupPartyError::PlayerNotInParty => {
                Self::not_found("not_in_party", "Player is not in a party")
            }
            LookupPartyError::Repository(cause) => {
                Self::internal("fetch_failed", "Failed to fetch party", &cause)
            }
        }
    }
}
