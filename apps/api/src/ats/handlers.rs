//! Axum route handlers for the ATS API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::ats::parameters;
use crate::ats::service::{
    self, ApplicantRankingResponse, OpportunityScoreResponse, RecommendationResponse,
    RubricScoreResponse,
};
use crate::auth::Caller;
use crate::errors::AppError;
use crate::models::rubric::{NewRubric, Rubric, RubricPatch};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricScoreRequest {
    pub resume_id: String,
    pub parameter_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityScoreRequest {
    pub resume_id: String,
    pub opportunity_id: String,
}

fn parse_id(raw: &str, field: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::Validation(format!("{field} is not a valid id")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/ats/parameters
pub async fn handle_list_parameters(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<Rubric>>, AppError> {
    let rubrics = parameters::list_rubrics(state.store.as_ref(), &caller).await?;
    Ok(Json(rubrics))
}

/// POST /api/ats/parameters
pub async fn handle_create_parameters(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<NewRubric>,
) -> Result<(StatusCode, Json<Rubric>), AppError> {
    let rubric = parameters::create_rubric(state.store.as_ref(), &caller, request).await?;
    Ok((StatusCode::CREATED, Json(rubric)))
}

/// PUT /api/ats/parameters/:id
pub async fn handle_update_parameters(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    Json(patch): Json<RubricPatch>,
) -> Result<Json<Rubric>, AppError> {
    let id = parse_id(&id, "id")?;
    let rubric = parameters::update_rubric(state.store.as_ref(), &caller, id, patch).await?;
    Ok(Json(rubric))
}

/// POST /api/ats/calculate-score
///
/// Scores a resume against a rubric and caches the score on the resume.
pub async fn handle_calculate_score(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<RubricScoreRequest>,
) -> Result<Json<RubricScoreResponse>, AppError> {
    let resume_id = parse_id(&request.resume_id, "resumeId")?;
    let rubric_id = parse_id(&request.parameter_id, "parameterId")?;

    let response =
        service::calculate_rubric_score(state.store.as_ref(), &caller, resume_id, rubric_id)
            .await?;
    Ok(Json(response))
}

/// POST /api/ats/calculate-opportunity-score
///
/// Scores a resume against an opportunity (plus the recruiter's active rubric).
pub async fn handle_calculate_opportunity_score(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<OpportunityScoreRequest>,
) -> Result<Json<OpportunityScoreResponse>, AppError> {
    let resume_id = parse_id(&request.resume_id, "resumeId")?;
    let opportunity_id = parse_id(&request.opportunity_id, "opportunityId")?;

    let response = service::calculate_opportunity_score(
        state.store.as_ref(),
        &caller,
        resume_id,
        opportunity_id,
        Utc::now(),
    )
    .await?;
    Ok(Json(response))
}

/// GET /api/ats/recommended-candidates/:opportunity_id
pub async fn handle_recommended_candidates(
    State(state): State<AppState>,
    caller: Caller,
    Path(opportunity_id): Path<String>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let opportunity_id = parse_id(&opportunity_id, "opportunityId")?;

    let response = service::recommended_candidates(
        state.store.as_ref(),
        &caller,
        opportunity_id,
        state.config.recommendation_threshold,
        state.config.recommendation_limit,
    )
    .await?;
    Ok(Json(response))
}

/// GET /api/candidates/opportunity/:opportunity_id
///
/// Quick-scores every applicant to the opportunity and returns them newest first.
pub async fn handle_opportunity_applicants(
    State(state): State<AppState>,
    caller: Caller,
    Path(opportunity_id): Path<String>,
) -> Result<Json<ApplicantRankingResponse>, AppError> {
    let opportunity_id = parse_id(&opportunity_id, "opportunityId")?;

    let response =
        service::rank_applicants(state.store.as_ref(), &caller, opportunity_id, Utc::now())
            .await?;
    Ok(Json(response))
}
