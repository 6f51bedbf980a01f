use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::opportunity::{Applicant, ApplicationRow, Opportunity, OpportunityRow};
use crate::models::resume::{Resume, ResumeRow};
use crate::models::rubric::{Rubric, RubricRow};
use crate::store::AtsStore;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn latest_resume_for(&self, user_id: Uuid) -> Result<Option<Resume>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY last_updated DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Resume::from))
    }
}

#[async_trait]
impl AtsStore for PgStore {
    async fn get_resume(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Resume::from))
    }

    async fn get_rubric(&self, id: Uuid) -> Result<Option<Rubric>, AppError> {
        let row = sqlx::query_as::<_, RubricRow>("SELECT * FROM ats_rubrics WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Rubric::from))
    }

    async fn get_active_rubric(&self, recruiter_id: Uuid) -> Result<Option<Rubric>, AppError> {
        let row = sqlx::query_as::<_, RubricRow>(
            r#"
            SELECT * FROM ats_rubrics
            WHERE recruiter_id = $1 AND active
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .bind(recruiter_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Rubric::from))
    }

    async fn get_opportunity(&self, id: Uuid) -> Result<Option<Opportunity>, AppError> {
        let row = sqlx::query_as::<_, OpportunityRow>("SELECT * FROM opportunities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Opportunity::from))
    }

    async fn set_resume_score(&self, resume_id: Uuid, score: u32) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE resumes SET ats_score = $1, score_updated_at = now() WHERE id = $2",
        )
        .bind(score.min(100) as i32)
        .bind(resume_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
        }
        debug!("Stored ATS score {score} on resume {resume_id}");
        Ok(())
    }

    async fn list_rubrics(&self, recruiter_id: Uuid) -> Result<Vec<Rubric>, AppError> {
        let rows = sqlx::query_as::<_, RubricRow>(
            "SELECT * FROM ats_rubrics WHERE recruiter_id = $1 ORDER BY created_at ASC",
        )
        .bind(recruiter_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Rubric::from).collect())
    }

    async fn insert_rubric(&self, rubric: &Rubric) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO ats_rubrics
                (id, recruiter_id, name, required_skills, required_experience,
                 required_education, keywords, format_requirements, active,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(rubric.id)
        .bind(rubric.recruiter_id)
        .bind(&rubric.name)
        .bind(Json(&rubric.required_skills))
        .bind(experience_column(rubric)?)
        .bind(&rubric.required_education)
        .bind(Json(&rubric.keywords))
        .bind(Json(&rubric.format_requirements))
        .bind(rubric.active)
        .bind(rubric.created_at)
        .bind(rubric.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_rubric(&self, rubric: &Rubric) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE ats_rubrics
            SET name = $2, required_skills = $3, required_experience = $4,
                required_education = $5, keywords = $6, format_requirements = $7,
                active = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(rubric.id)
        .bind(&rubric.name)
        .bind(Json(&rubric.required_skills))
        .bind(experience_column(rubric)?)
        .bind(&rubric.required_education)
        .bind(Json(&rubric.keywords))
        .bind(Json(&rubric.format_requirements))
        .bind(rubric.active)
        .bind(rubric.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn scored_resumes(&self) -> Result<Vec<Resume>, AppError> {
        let rows =
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE ats_score IS NOT NULL")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Resume::from).collect())
    }

    async fn applicants_for(&self, opportunity_id: Uuid) -> Result<Vec<Applicant>, AppError> {
        let applications = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT id, opportunity_id, student_id, status, applied_date
            FROM applications
            WHERE opportunity_id = $1
            ORDER BY applied_date DESC
            "#,
        )
        .bind(opportunity_id)
        .fetch_all(&self.pool)
        .await?;

        let mut applicants = Vec::with_capacity(applications.len());
        for application in applications {
            let resume = self.latest_resume_for(application.student_id).await?;
            applicants.push(Applicant {
                application,
                resume,
            });
        }
        Ok(applicants)
    }
}

fn experience_column(rubric: &Rubric) -> Result<i32, AppError> {
    i32::try_from(rubric.required_experience).map_err(|_| {
        AppError::Validation(format!(
            "requiredExperience {} does not fit in storage",
            rubric.required_experience
        ))
    })
}
