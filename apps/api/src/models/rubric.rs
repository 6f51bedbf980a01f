use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillWeight {
    pub skill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordWeight {
    pub keyword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatRequirements {
    #[serde(default)]
    pub requires_contact_info: bool,
    #[serde(default)]
    pub requires_education: bool,
}

/// A recruiter-authored scoring rubric ("ATS parameters").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rubric {
    pub id: Uuid,
    #[serde(rename = "recruiter")]
    pub recruiter_id: Uuid,
    pub name: String,
    pub required_skills: Vec<SkillWeight>,
    /// Years, compared against the number of experience entries.
    pub required_experience: u32,
    pub required_education: String,
    pub keywords: Vec<KeywordWeight>,
    pub format_requirements: FormatRequirements,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/ats/parameters`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRubric {
    pub name: String,
    #[serde(default)]
    pub required_skills: Vec<SkillWeight>,
    #[serde(default)]
    pub required_experience: u32,
    #[serde(default)]
    pub required_education: String,
    #[serde(default)]
    pub keywords: Vec<KeywordWeight>,
    #[serde(default)]
    pub format_requirements: FormatRequirements,
}

/// Body of `PUT /api/ats/parameters/:id`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricPatch {
    pub name: Option<String>,
    pub required_skills: Option<Vec<SkillWeight>>,
    pub required_experience: Option<u32>,
    pub required_education: Option<String>,
    pub keywords: Option<Vec<KeywordWeight>>,
    pub format_requirements: Option<FormatRequirements>,
    pub active: Option<bool>,
}

impl Rubric {
    pub fn create(recruiter_id: Uuid, new: NewRubric, now: DateTime<Utc>) -> Self {
        Rubric {
            id: Uuid::new_v4(),
            recruiter_id,
            name: new.name,
            required_skills: new.required_skills,
            required_experience: new.required_experience,
            required_education: new.required_education,
            keywords: new.keywords,
            format_requirements: new.format_requirements,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update. Empty names and empty education strings are
    /// treated as "not provided".
    pub fn apply(&mut self, patch: RubricPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name.filter(|n| !n.trim().is_empty()) {
            self.name = name;
        }
        if let Some(skills) = patch.required_skills {
            self.required_skills = skills;
        }
        if let Some(years) = patch.required_experience {
            self.required_experience = years;
        }
        if let Some(education) = patch.required_education.filter(|e| !e.is_empty()) {
            self.required_education = education;
        }
        if let Some(keywords) = patch.keywords {
            self.keywords = keywords;
        }
        if let Some(format) = patch.format_requirements {
            self.format_requirements = format;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct RubricRow {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub name: String,
    pub required_skills: Json<Vec<SkillWeight>>,
    pub required_experience: i32,
    pub required_education: String,
    pub keywords: Json<Vec<KeywordWeight>>,
    pub format_requirements: Json<FormatRequirements>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RubricRow> for Rubric {
    fn from(row: RubricRow) -> Self {
        Rubric {
            id: row.id,
            recruiter_id: row.recruiter_id,
            name: row.name,
            required_skills: row.required_skills.0,
            required_experience: row.required_experience.max(0) as u32,
            required_education: row.required_education,
            keywords: row.keywords.0,
            format_requirements: row.format_requirements.0,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
