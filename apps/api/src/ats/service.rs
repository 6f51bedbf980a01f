//! ATS operations: load documents, check the caller, score, persist.
//!
//! Each scoring call is a single read-modify-write on one resume. Concurrent
//! scoring of the same resume is last-write-wins; the score is advisory.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::Caller;
use crate::errors::AppError;
use crate::models::opportunity::Opportunity;
use crate::models::resume::Resume;
use crate::scoring::applicant::quick_score;
use crate::scoring::opportunity::{score_against_opportunity, OpportunityStrategy};
use crate::scoring::recommend::recommend;
use crate::scoring::rubric::score_against_rubric;
use crate::store::AtsStore;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RubricScoreDetails {
    pub matched: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RubricScoreResponse {
    pub score: u32,
    pub details: RubricScoreDetails,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityScoreDetails {
    pub matched: u64,
    pub total: u64,
    pub opportunity_title: String,
    #[serde(rename = "hasATSParameters")]
    pub has_ats_parameters: bool,
    pub recommended_candidate: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpportunityScoreResponse {
    pub score: u32,
    pub details: OpportunityScoreDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpportunitySummary {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: Uuid,
    pub title: String,
    pub ats_score: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedCandidate {
    pub candidate_id: Uuid,
    pub resume: ResumeSummary,
    pub match_score: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub opportunity: OpportunitySummary,
    pub recommended_candidates: Vec<RecommendedCandidate>,
    pub total_recommended: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub id: Uuid,
    pub status: String,
    pub applied_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedApplicant {
    pub application: ApplicationSummary,
    pub candidate_id: Uuid,
    pub resume: Option<ResumeSummary>,
    pub ats_score: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRankingResponse {
    pub opportunity: Opportunity,
    pub applicants: Vec<RankedApplicant>,
}

// ────────────────────────────────────────────────────────────────────────────
// Lookups
// ────────────────────────────────────────────────────────────────────────────

async fn load_resume(store: &dyn AtsStore, id: Uuid) -> Result<Resume, AppError> {
    store
        .get_resume(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))
}

async fn load_opportunity(store: &dyn AtsStore, id: Uuid) -> Result<Opportunity, AppError> {
    store
        .get_opportunity(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Opportunity not found".to_string()))
}

/// Students may only score their own resumes. Recruiters and admins may
/// score any.
fn ensure_can_score(caller: &Caller, resume: &Resume) -> Result<(), AppError> {
    if caller.is_student() && resume.user_id != caller.id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Only the recruiter who posted an opportunity may browse its candidates.
fn ensure_owns_opportunity(caller: &Caller, opportunity: &Opportunity) -> Result<(), AppError> {
    if opportunity.organization_id != caller.id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// Scores a resume against a rubric and caches the result on the resume.
pub async fn calculate_rubric_score(
    store: &dyn AtsStore,
    caller: &Caller,
    resume_id: Uuid,
    rubric_id: Uuid,
) -> Result<RubricScoreResponse, AppError> {
    let resume = load_resume(store, resume_id).await?;
    ensure_can_score(caller, &resume)?;

    let rubric = store
        .get_rubric(rubric_id)
        .await?
        .ok_or_else(|| AppError::NotFound("ATS parameter not found".to_string()))?;

    let result = score_against_rubric(&resume, &rubric);
    store.set_resume_score(resume.id, result.score).await?;

    info!(
        "Scored resume {} against rubric {}: {} ({}/{})",
        resume.id, rubric.id, result.score, result.matched, result.total
    );

    Ok(RubricScoreResponse {
        score: result.score,
        details: RubricScoreDetails {
            matched: result.matched,
            total: result.total,
        },
    })
}

/// Scores a resume against an opportunity, using the owning recruiter's
/// active rubric when there is one, and caches the result.
pub async fn calculate_opportunity_score(
    store: &dyn AtsStore,
    caller: &Caller,
    resume_id: Uuid,
    opportunity_id: Uuid,
    now: DateTime<Utc>,
) -> Result<OpportunityScoreResponse, AppError> {
    let resume = load_resume(store, resume_id).await?;
    ensure_can_score(caller, &resume)?;

    let opportunity = load_opportunity(store, opportunity_id).await?;
    let rubric = store.get_active_rubric(opportunity.organization_id).await?;

    let outcome = score_against_opportunity(
        &resume,
        &opportunity,
        OpportunityStrategy::select(rubric.as_ref()),
        now,
    );
    store.set_resume_score(resume.id, outcome.result.score).await?;

    info!(
        "Scored resume {} against opportunity {}: {} (rubric: {})",
        resume.id, opportunity.id, outcome.result.score, outcome.used_rubric
    );

    Ok(OpportunityScoreResponse {
        score: outcome.result.score,
        details: OpportunityScoreDetails {
            matched: outcome.result.matched,
            total: outcome.result.total,
            opportunity_title: opportunity.title,
            has_ats_parameters: outcome.used_rubric,
            recommended_candidate: outcome.recommended,
        },
    })
}

/// Candidates whose latest cached score clears `threshold`, best first.
pub async fn recommended_candidates(
    store: &dyn AtsStore,
    caller: &Caller,
    opportunity_id: Uuid,
    threshold: u32,
    limit: usize,
) -> Result<RecommendationResponse, AppError> {
    caller.require_recruiter()?;
    let opportunity = load_opportunity(store, opportunity_id).await?;
    ensure_owns_opportunity(caller, &opportunity)?;

    let scored = store.scored_resumes().await?;
    let recommended_candidates: Vec<RecommendedCandidate> = recommend(&scored, threshold, limit)
        .into_iter()
        .map(|r| RecommendedCandidate {
            candidate_id: r.candidate_id,
            resume: ResumeSummary {
                id: r.resume_id,
                title: r.resume_title,
                ats_score: r.ats_score,
            },
            match_score: r.ats_score,
        })
        .collect();

    Ok(RecommendationResponse {
        opportunity: OpportunitySummary {
            id: opportunity.id,
            title: opportunity.title,
        },
        total_recommended: recommended_candidates.len(),
        recommended_candidates,
    })
}

/// Quick-scores every applicant's latest resume, persisting each score.
/// Applicants without a resume are listed with a score of 0. A failed score
/// write is logged and the listing still returns.
pub async fn rank_applicants(
    store: &dyn AtsStore,
    caller: &Caller,
    opportunity_id: Uuid,
    now: DateTime<Utc>,
) -> Result<ApplicantRankingResponse, AppError> {
    caller.require_recruiter()?;
    let opportunity = load_opportunity(store, opportunity_id).await?;
    ensure_owns_opportunity(caller, &opportunity)?;

    let applicants = store.applicants_for(opportunity.id).await?;
    info!(
        "Ranking {} applicants for opportunity {}",
        applicants.len(),
        opportunity.id
    );

    let mut ranked = Vec::with_capacity(applicants.len());
    for applicant in applicants {
        let (ats_score, resume) = match applicant.resume {
            Some(resume) => {
                let score = quick_score(&resume, &opportunity, now);
                if let Err(e) = store.set_resume_score(resume.id, score).await {
                    warn!("Could not cache score for resume {}: {e}", resume.id);
                }
                let summary = ResumeSummary {
                    id: resume.id,
                    title: resume.title,
                    ats_score: score,
                };
                (score, Some(summary))
            }
            None => (0, None),
        };

        ranked.push(RankedApplicant {
            application: ApplicationSummary {
                id: applicant.application.id,
                status: applicant.application.status,
                applied_date: applicant.application.applied_date,
            },
            candidate_id: applicant.application.student_id,
            resume,
            ats_score,
        });
    }

    Ok(ApplicantRankingResponse {
        opportunity,
        applicants: ranked,
    })
}
