//! Rubric ("ATS parameters") management for recruiters.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::Caller;
use crate::errors::AppError;
use crate::models::rubric::{NewRubric, Rubric, RubricPatch};
use crate::store::AtsStore;

pub async fn list_rubrics(store: &dyn AtsStore, caller: &Caller) -> Result<Vec<Rubric>, AppError> {
    caller.require_recruiter()?;
    store.list_rubrics(caller.id).await
}

pub async fn create_rubric(
    store: &dyn AtsStore,
    caller: &Caller,
    new: NewRubric,
) -> Result<Rubric, AppError> {
    caller.require_recruiter()?;
    if new.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    check_required_experience(new.required_experience)?;

    let rubric = Rubric::create(caller.id, new, Utc::now());
    store.insert_rubric(&rubric).await?;
    info!("Recruiter {} created rubric {}", caller.id, rubric.id);
    Ok(rubric)
}

pub async fn update_rubric(
    store: &dyn AtsStore,
    caller: &Caller,
    rubric_id: Uuid,
    patch: RubricPatch,
) -> Result<Rubric, AppError> {
    caller.require_recruiter()?;
    if let Some(years) = patch.required_experience {
        check_required_experience(years)?;
    }
    let mut rubric = store
        .get_rubric(rubric_id)
        .await?
        .ok_or_else(|| AppError::NotFound("ATS parameter not found".to_string()))?;
    if rubric.recruiter_id != caller.id {
        return Err(AppError::Forbidden);
    }

    rubric.apply(patch, Utc::now());
    store.update_rubric(&rubric).await?;
    info!("Recruiter {} updated rubric {}", caller.id, rubric.id);
    Ok(rubric)
}

/// `requiredExperience` is stored as a Postgres INTEGER.
fn check_required_experience(years: u32) -> Result<(), AppError> {
    if i32::try_from(years).is_err() {
        return Err(AppError::Validation(format!(
            "requiredExperience must be at most {}",
            i32::MAX
        )));
    }
    Ok(())
}
