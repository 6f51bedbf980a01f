//! In-memory `AtsStore` for service and router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::opportunity::{Applicant, ApplicationRow, Opportunity};
use crate::models::resume::Resume;
use crate::models::rubric::Rubric;
use crate::store::AtsStore;

#[derive(Default)]
pub struct MemoryStore {
    resumes: Mutex<HashMap<Uuid, Resume>>,
    rubrics: Mutex<HashMap<Uuid, Rubric>>,
    opportunities: Mutex<HashMap<Uuid, Opportunity>>,
    applications: Mutex<Vec<ApplicationRow>>,
    fail_score_writes: AtomicBool,
}

impl MemoryStore {
    pub fn add_resume(&self, resume: Resume) {
        self.resumes.lock().unwrap().insert(resume.id, resume);
    }

    pub fn add_rubric(&self, rubric: Rubric) {
        self.rubrics.lock().unwrap().insert(rubric.id, rubric);
    }

    pub fn add_opportunity(&self, opportunity: Opportunity) {
        self.opportunities
            .lock()
            .unwrap()
            .insert(opportunity.id, opportunity);
    }

    pub fn add_application(&self, application: ApplicationRow) {
        self.applications.lock().unwrap().push(application);
    }

    /// Makes every subsequent `set_resume_score` fail like a lost connection.
    pub fn fail_score_writes(&self) {
        self.fail_score_writes.store(true, Ordering::SeqCst);
    }

    pub fn score_of(&self, resume_id: Uuid) -> Option<u32> {
        self.resumes
            .lock()
            .unwrap()
            .get(&resume_id)
            .and_then(|r| r.ats_score)
    }
}

#[async_trait]
impl AtsStore for MemoryStore {
    async fn get_resume(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        Ok(self.resumes.lock().unwrap().get(&id).cloned())
    }

    async fn get_rubric(&self, id: Uuid) -> Result<Option<Rubric>, AppError> {
        Ok(self.rubrics.lock().unwrap().get(&id).cloned())
    }

    async fn get_active_rubric(&self, recruiter_id: Uuid) -> Result<Option<Rubric>, AppError> {
        Ok(self
            .rubrics
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.recruiter_id == recruiter_id && r.active)
            .max_by_key(|r| r.updated_at)
            .cloned())
    }

    async fn get_opportunity(&self, id: Uuid) -> Result<Option<Opportunity>, AppError> {
        Ok(self.opportunities.lock().unwrap().get(&id).cloned())
    }

    async fn set_resume_score(&self, resume_id: Uuid, score: u32) -> Result<(), AppError> {
        if self.fail_score_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut resumes = self.resumes.lock().unwrap();
        let resume = resumes
            .get_mut(&resume_id)
            .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
        resume.ats_score = Some(score);
        resume.score_updated_at = Some(Utc::now());
        Ok(())
    }

    async fn list_rubrics(&self, recruiter_id: Uuid) -> Result<Vec<Rubric>, AppError> {
        let mut rubrics: Vec<Rubric> = self
            .rubrics
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.recruiter_id == recruiter_id)
            .cloned()
            .collect();
        rubrics.sort_by_key(|r| r.created_at);
        Ok(rubrics)
    }

    async fn insert_rubric(&self, rubric: &Rubric) -> Result<(), AppError> {
        self.add_rubric(rubric.clone());
        Ok(())
    }

    async fn update_rubric(&self, rubric: &Rubric) -> Result<(), AppError> {
        self.add_rubric(rubric.clone());
        Ok(())
    }

    async fn scored_resumes(&self) -> Result<Vec<Resume>, AppError> {
        Ok(self
            .resumes
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.ats_score.is_some())
            .cloned()
            .collect())
    }

    async fn applicants_for(&self, opportunity_id: Uuid) -> Result<Vec<Applicant>, AppError> {
        let mut applications: Vec<ApplicationRow> = self
            .applications
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.opportunity_id == opportunity_id)
            .cloned()
            .collect();
        applications.sort_by(|a, b| b.applied_date.cmp(&a.applied_date));

        let resumes = self.resumes.lock().unwrap();
        Ok(applications
            .into_iter()
            .map(|application| {
                let resume = resumes
                    .values()
                    .filter(|r| r.user_id == application.student_id)
                    .max_by_key(|r| r.last_updated)
                    .cloned();
                Applicant {
                    application,
                    resume,
                }
            })
            .collect())
    }
}
