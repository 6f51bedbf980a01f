use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
}

/// A candidate's resume document as the scorers see it.
///
/// The serialized form doubles as the searchable text for keyword matching,
/// so field names and skipped `None`s matter: every key and value ends up in
/// the haystack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub title: String,
    pub personal_info: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ats_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_updated_at: Option<DateTime<Utc>>,
    pub last_updated: DateTime<Utc>,
}

impl Resume {
    pub fn has_email(&self) -> bool {
        is_present(&self.personal_info.email)
    }

    /// Email and phone both present and non-empty.
    pub fn has_contact_info(&self) -> bool {
        self.has_email() && is_present(&self.personal_info.phone)
    }

    pub fn has_education(&self) -> bool {
        !self.education.is_empty()
    }
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.is_empty())
}

#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub personal_info: Json<PersonalInfo>,
    pub education: Json<Vec<EducationEntry>>,
    pub experience: Json<Vec<ExperienceEntry>>,
    pub skills: Vec<String>,
    pub projects: Json<Vec<ProjectEntry>>,
    pub certifications: Json<Vec<CertificationEntry>>,
    pub ats_score: Option<i32>,
    pub score_updated_at: Option<DateTime<Utc>>,
    pub last_updated: DateTime<Utc>,
}

impl From<ResumeRow> for Resume {
    fn from(row: ResumeRow) -> Self {
        Resume {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            personal_info: row.personal_info.0,
            education: row.education.0,
            experience: row.experience.0,
            skills: row.skills,
            projects: row.projects.0,
            certifications: row.certifications.0,
            ats_score: row.ats_score.map(|s| s.clamp(0, 100) as u32),
            score_updated_at: row.score_updated_at,
            last_updated: row.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume_with(info: PersonalInfo) -> Resume {
        Resume {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Resume".to_string(),
            personal_info: info,
            education: vec![],
            experience: vec![],
            skills: vec![],
            projects: vec![],
            certifications: vec![],
            ats_score: None,
            score_updated_at: None,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_contact_info_requires_email_and_phone() {
        let resume = resume_with(PersonalInfo {
            name: "Ada".to_string(),
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        });
        assert!(resume.has_email());
        assert!(!resume.has_contact_info());
    }

    #[test]
    fn test_empty_strings_do_not_count_as_contact_info() {
        let resume = resume_with(PersonalInfo {
            name: "Ada".to_string(),
            email: Some(String::new()),
            phone: Some("555-0100".to_string()),
            ..Default::default()
        });
        assert!(!resume.has_email());
        assert!(!resume.has_contact_info());
    }

    #[test]
    fn test_serialized_form_omits_missing_fields() {
        let resume = resume_with(PersonalInfo {
            name: "Ada".to_string(),
            ..Default::default()
        });
        let json = serde_json::to_string(&resume).unwrap();
        assert!(!json.contains("null"));
        assert!(json.contains("\"personalInfo\""));
        assert!(json.contains("\"user\""));
    }
}
