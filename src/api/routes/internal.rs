//! Service-to-service lookups, guarded by the shared service token.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::api::dto::PartyResponse;
use crate::api::error::ApiError;
use crate::api::AppState;
use crate::application::party::{GetPartyById, GetPlayerParty};

/// GET /internal/parties/:partyId
pub async fn get_party_by_id(
    State(state): State<Arc<AppState>>,
    Path(party_id): Path<String>,
) -> Result<Json<PartyResponse>, ApiError> {
    let party_id = Uuid::parse_str(&party_id)
        .map_err(|_| ApiError::bad_request("invalid_id", "Invalid party ID"))?;

    let party = GetPartyById::new(state.party_repo.clone())
        .execute(party_id)
        .await?;

    Ok(Json(party.into()))
}

/// GET /internal/parties/player/:userId
pub async fn get_player_party(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<PartyResponse>, ApiError> {
    let user_id = Uuid::parse_str(&user_id)
        .map_err(|_| ApiError::bad_request("invalid_id", "Invalid user ID"))?;

    let party = GetPlayerParty::new(state.party_repo.clone())
        .execute(user_id)
        .await?;

    Ok(Json(party.into()))
}
