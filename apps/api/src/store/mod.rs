//! Persistence seam for ATS. Handlers and services only see `AtsStore`;
//! `AppState` carries an `Arc<dyn AtsStore>` (Postgres in production).

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::opportunity::{Applicant, Opportunity};
use crate::models::resume::Resume;
use crate::models::rubric::Rubric;

#[async_trait]
pub trait AtsStore: Send + Sync {
    async fn get_resume(&self, id: Uuid) -> Result<Option<Resume>, AppError>;

    async fn get_rubric(&self, id: Uuid) -> Result<Option<Rubric>, AppError>;

    /// The recruiter's most recently updated active rubric, if any.
    async fn get_active_rubric(&self, recruiter_id: Uuid) -> Result<Option<Rubric>, AppError>;

    async fn get_opportunity(&self, id: Uuid) -> Result<Option<Opportunity>, AppError>;

    /// Overwrites the cached score and stamps the scoring time.
    async fn set_resume_score(&self, resume_id: Uuid, score: u32) -> Result<(), AppError>;

    async fn list_rubrics(&self, recruiter_id: Uuid) -> Result<Vec<Rubric>, AppError>;

    async fn insert_rubric(&self, rubric: &Rubric) -> Result<(), AppError>;

    async fn update_rubric(&self, rubric: &Rubric) -> Result<(), AppError>;

    /// Every resume that carries a cached score.
    async fn scored_resumes(&self) -> Result<Vec<Resume>, AppError>;

    /// Applications for an opportunity, newest first, each with the
    /// applicant's most recently updated resume.
    async fn applicants_for(&self, opportunity_id: Uuid) -> Result<Vec<Applicant>, AppError>;
}
