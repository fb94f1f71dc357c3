use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json, Extension};
use uuid::Uuid;

use crate::api::dto::{
    InviteCodeResponse, JoinPartyRequest, MessageResponse, PartyResponse, TargetAccountRequest,
};
use crate::api::error::ApiError;
use crate::api::middleware::AuthAccount;
use crate::api::AppState;
use crate::application::party::{
    CreateParty, CreatePartyInput, DisbandParty, DisbandPartyInput, GetMyParty, GetMyPartyInput,
    JoinParty, JoinPartyInput, KickMember, KickMemberInput, LeaveParty, LeavePartyInput,
    LeavePartyOutput, RegenerateInvite, RegenerateInviteInput, TransferOwnership,
    TransferOwnershipInput,
};

/// Pull a non-nil `account_id` out of a kick/transfer body
fn target_account(body: Option<Json<TargetAccountRequest>>) -> Result<Uuid, ApiError> {
    body.and_then(|Json(b)| b.account_id)
        .filter(|id| !id.is_nil())
        .ok_or_else(|| ApiError::bad_request("invalid_request", "account_id is required"))
}

/// POST /parties - Create a party owned by the caller
pub async fn create_party(
    State(state): State<Arc<AppState>>,
    Extension(AuthAccount(account_id)): Extension<AuthAccount>,
) -> Result<(StatusCode, Json<PartyResponse>), ApiError> {
    let result = CreateParty::new(state.party_repo.clone())
        .execute(CreatePartyInput { account_id })
        .await?;

    Ok((StatusCode::CREATED, Json(result.party.into())))
}

/// GET /parties/mine - The caller's party with members
pub async fn get_my_party(
    State(state): State<Arc<AppState>>,
    Extension(AuthAccount(account_id)): Extension<AuthAccount>,
) -> Result<Json<PartyResponse>, ApiError> {
    let party = GetMyParty::new(state.party_repo.clone())
        .execute(GetMyPartyInput { account_id })
        .await?;

    Ok(Json(party.into()))
}

/// POST /parties/join - Join by invite code
pub async fn join_party(
    State(state): State<Arc<AppState>>,
    Extension(AuthAccount(account_id)): Extension<AuthAccount>,
    body: Option<Json<JoinPartyRequest>>,
) -> Result<Json<PartyResponse>, ApiError> {
    let invite_code = body
        .and_then(|Json(b)| b.invite_code)
        .unwrap_or_default();

    let party = JoinParty::new(state.party_repo.clone())
        .execute(JoinPartyInput {
            account_id,
            invite_code,
        })
        .await?;

    Ok(Json(party.into()))
}

/// POST /parties/leave - Leave; the owner leaving disbands the party
pub async fn leave_party(
    State(state): State<Arc<AppState>>,
    Extension(AuthAccount(account_id)): Extension<AuthAccount>,
) -> Result<Json<MessageResponse>, ApiError> {
    let outcome = LeaveParty::new(state.party_repo.clone())
        .execute(LeavePartyInput { account_id })
        .await?;

    let message = match outcome {
        LeavePartyOutput::Left => "Left party",
        LeavePartyOutput::Disbanded => "Party disbanded",
    };
    Ok(Json(MessageResponse::new(message)))
}

/// POST /parties/kick - Owner removes a member
pub async fn kick_member(
    State(state): State<Arc<AppState>>,
    Extension(AuthAccount(account_id)): Extension<AuthAccount>,
    body: Option<Json<TargetAccountRequest>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let target_id = target_account(body)?;

    KickMember::new(state.party_repo.clone())
        .execute(KickMemberInput {
            account_id,
            target_id,
        })
        .await?;

    Ok(Json(MessageResponse::new("Member kicked")))
}

/// POST /parties/transfer - Owner hands ownership to a member
pub async fn transfer_ownership(
    State(state): State<Arc<AppState>>,
    Extension(AuthAccount(account_id)): Extension<AuthAccount>,
    body: Option<Json<TargetAccountRequest>>,
) -> Result<Json<PartyResponse>, ApiError> {
    let target_id = target_account(body)?;

    let party = TransferOwnership::new(state.party_repo.clone())
        .execute(TransferOwnershipInput {
            account_id,
            target_id,
        })
        .await?;

    Ok(Json(party.into()))
}

/// DELETE /parties - Owner disbands the party
pub async fn disband_party(
    State(state): State<Arc<AppState>>,
    Extension(AuthAccount(account_id)): Extension<AuthAccount>,
) -> Result<Json<MessageResponse>, ApiError> {
    DisbandParty::new(state.party_repo.clone())
        .execute(DisbandPartyInput { account_id })
        .await?;

    Ok(Json(MessageResponse::new("Party disbanded")))
}

/// POST /parties/invite - Owner rotates the invite code
pub async fn regenerate_invite(
    State(state): State<Arc<AppState>>,
    Extension(AuthAccount(account_id)): Extension<AuthAccount>,
) -> Result<Json<InviteCodeResponse>, ApiError> {
    let invite_code = RegenerateInvite::new(state.party_repo.clone())
        .execute(RegenerateInviteInput { account_id })
        .await?;

    Ok(Json(InviteCodeResponse { invite_code }))
}
