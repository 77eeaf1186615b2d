//! Club API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{
    AdmissionOutcome, Club, ClubCreate, ClubRoster, ClubSummary, ClubUpdate, RegistrationRequest,
};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::utils::validation::{
    MAX_IDENTIFIER_LEN, MAX_NAME_LEN, validate_phone, validate_required_text,
};
use crate::utils::{ApiResponse, AppResult};

/// GET /api/clubs - all clubs with live counts
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<ClubSummary>>> {
    let clubs = state.catalog.list_clubs().await?;
    Ok(ApiResponse::success(clubs))
}

/// GET /api/clubs/{id} - one club with counts and availability
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<ClubSummary>> {
    let club = state.catalog.get_club(id).await?;
    Ok(ApiResponse::success(club))
}

/// POST /api/clubs/{id}/registrations - registration attempt
///
/// A rejection is still a 200; the reason is in `data` and the envelope
/// message is the text to show the student.
pub async fn register(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RegistrationRequest>,
) -> AppResult<ApiResponse<AdmissionOutcome>> {
    validate_required_text(&payload.student_identifier, "studentIdentifier", MAX_IDENTIFIER_LEN)?;
    validate_required_text(&payload.student_name, "studentName", MAX_NAME_LEN)?;
    validate_phone(payload.guardian_phone.trim(), "guardianPhone")?;

    let outcome = state.admission.attempt(id, &payload).await?;
    Ok(ApiResponse::success_with_message(outcome.message(), outcome))
}

/// GET /api/admin/clubs
pub async fn admin_list(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
) -> AppResult<ApiResponse<Vec<ClubSummary>>> {
    let clubs = state.catalog.list_clubs().await?;
    Ok(ApiResponse::success(clubs))
}

/// POST /api/admin/clubs
pub async fn create(
    State(state): State<ServerState>,
    admin: CurrentAdmin,
    Json(payload): Json<ClubCreate>,
) -> AppResult<ApiResponse<Club>> {
    let club = state.catalog.create_club(payload).await?;
    tracing::info!(operator = %admin.username, club_id = club.id, "Admin created club");
    Ok(ApiResponse::success(club))
}

/// PUT /api/admin/clubs/{id}
pub async fn update(
    State(state): State<ServerState>,
    admin: CurrentAdmin,
    Path(id): Path<i64>,
    Json(payload): Json<ClubUpdate>,
) -> AppResult<ApiResponse<Club>> {
    let club = state.catalog.update_club(id, payload).await?;
    tracing::info!(operator = %admin.username, club_id = id, "Admin updated club");
    Ok(ApiResponse::success(club))
}

/// DELETE /api/admin/clubs/{id} - removes the club and its registrations
pub async fn delete(
    State(state): State<ServerState>,
    admin: CurrentAdmin,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.catalog.delete_club(id).await?;
    tracing::info!(operator = %admin.username, club_id = id, "Admin deleted club");
    Ok(ApiResponse::ok())
}

/// GET /api/admin/clubs/{id}/registrations - roster
pub async fn registrations(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<ClubRoster>> {
    let roster = state.catalog.list_registrations(id).await?;
    Ok(ApiResponse::success(roster))
}
