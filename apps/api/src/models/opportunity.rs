use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use sqlx::FromRow;
use uuid::Uuid;

/// Seniority band an opportunity asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperienceLevel {
    EntryLevel,
    Intermediate,
    Advanced,
    /// A label outside the known bands; scored neutrally, kept verbatim.
    Unrecognized(String),
}

impl ExperienceLevel {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Entry-Level" => ExperienceLevel::EntryLevel,
            "Intermediate" => ExperienceLevel::Intermediate,
            "Advanced" => ExperienceLevel::Advanced,
            other => ExperienceLevel::Unrecognized(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ExperienceLevel::EntryLevel => "Entry-Level",
            ExperienceLevel::Intermediate => "Intermediate",
            ExperienceLevel::Advanced => "Advanced",
            ExperienceLevel::Unrecognized(label) => label,
        }
    }

    /// Inclusive year range `[lo, hi]` covered by the band.
    pub fn year_range(&self) -> Option<(f64, f64)> {
        match self {
            ExperienceLevel::EntryLevel => Some((0.0, 2.0)),
            ExperienceLevel::Intermediate => Some((2.0, 5.0)),
            ExperienceLevel::Advanced => Some((5.0, f64::INFINITY)),
            ExperienceLevel::Unrecognized(_) => None,
        }
    }
}

impl Serialize for ExperienceLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: Uuid,
    #[serde(rename = "organization")]
    pub organization_id: Uuid,
    pub title: String,
    pub description: String,
    pub skills_required: Vec<String>,
    pub experience_level: Option<ExperienceLevel>,
}

#[derive(Debug, Clone, FromRow)]
pub struct OpportunityRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub title: String,
    pub description: String,
    pub skills_required: Vec<String>,
    pub experience_level: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<OpportunityRow> for Opportunity {
    fn from(row: OpportunityRow) -> Self {
        Opportunity {
            id: row.id,
            organization_id: row.organization_id,
            title: row.title,
            description: row.description,
            skills_required: row.skills_required,
            experience_level: row
                .experience_level
                .as_deref()
                .filter(|l| !l.is_empty())
                .map(ExperienceLevel::from_label),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRow {
    pub id: Uuid,
    pub opportunity_id: Uuid,
    pub student_id: Uuid,
    pub status: String,
    pub applied_date: DateTime<Utc>,
}

/// An application joined with the applicant's most recently updated resume.
#[derive(Debug, Clone)]
pub struct Applicant {
    pub application: ApplicationRow,
    pub resume: Option<super::resume::Resume>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_labels() {
        assert_eq!(
            ExperienceLevel::from_label("Entry-Level"),
            ExperienceLevel::EntryLevel
        );
        assert_eq!(
            ExperienceLevel::from_label("Advanced"),
            ExperienceLevel::Advanced
        );
        assert_eq!(
            ExperienceLevel::from_label("Senior"),
            ExperienceLevel::Unrecognized("Senior".to_string())
        );
    }

    #[test]
    fn test_levels_serialize_as_their_labels() {
        assert_eq!(
            serde_json::to_value(ExperienceLevel::EntryLevel).unwrap(),
            "Entry-Level"
        );
        assert_eq!(
            serde_json::to_value(ExperienceLevel::from_label("Senior")).unwrap(),
            "Senior"
        );
    }

    #[test]
    fn test_blank_level_is_absent() {
        let row = OpportunityRow {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            title: "Intern".to_string(),
            description: String::new(),
            skills_required: vec![],
            experience_level: Some(String::new()),
            created_at: Utc::now(),
        };
        assert_eq!(Opportunity::from(row).experience_level, None);
    }
}
