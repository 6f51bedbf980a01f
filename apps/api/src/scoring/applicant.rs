//! Applicant quick-score: used when ranking everyone who applied to an
//! opportunity. Unlike the rubric and opportunity scorers this one works in
//! fractional points and does not use recruiter rubrics.
//!
//! | criterion        | points | rule                                          |
//! |------------------|--------|-----------------------------------------------|
//! | skills           | 40     | case-insensitive overlap / required count     |
//! | experience level | 25     | band fit of total years (only if level set)   |
//! | education        | 15     | only counted when the resume lists any        |
//! | completeness     | 20     | contact info, skills, experience present      |

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::opportunity::{ExperienceLevel, Opportunity};
use crate::models::resume::{ExperienceEntry, Resume};
use crate::scoring::years_between;

const SKILL_POINTS: f64 = 40.0;
const LEVEL_POINTS: f64 = 25.0;
const EDUCATION_POINTS: f64 = 15.0;
const COMPLETENESS_POINTS: f64 = 20.0;

/// Fit multiplier for an unrecognized experience level.
const NEUTRAL_LEVEL_MATCH: f64 = 0.5;
const BELOW_BAND_PENALTY: f64 = 0.2;
const ABOVE_BAND_PENALTY: f64 = 0.1;

pub fn quick_score(resume: &Resume, opportunity: &Opportunity, now: DateTime<Utc>) -> u32 {
    let mut score = 0.0;
    let mut max = 0.0;

    let required: HashSet<String> = opportunity
        .skills_required
        .iter()
        .map(|s| s.to_lowercase())
        .collect();
    let owned: HashSet<String> = resume.skills.iter().map(|s| s.to_lowercase()).collect();
    let overlap = required.intersection(&owned).count();
    score += overlap as f64 / required.len().max(1) as f64 * SKILL_POINTS;
    max += SKILL_POINTS;

    if let Some(level) = &opportunity.experience_level {
        let years = applicant_years(&resume.experience, now);
        score += level_match(level, years) * LEVEL_POINTS;
        max += LEVEL_POINTS;
    }

    if resume.has_education() {
        score += EDUCATION_POINTS;
        max += EDUCATION_POINTS;
    }

    let completed = [
        resume.has_contact_info(),
        !resume.skills.is_empty(),
        !resume.experience.is_empty(),
    ];
    let done = completed.iter().filter(|c| **c).count();
    score += done as f64 / completed.len() as f64 * COMPLETENESS_POINTS;
    max += COMPLETENESS_POINTS;

    ((score / max) * 100.0).round().min(100.0) as u32
}

/// Total years for quick-scoring. Entries without a start date are ignored;
/// open-ended entries run until `now`.
pub fn applicant_years(experience: &[ExperienceEntry], now: DateTime<Utc>) -> f64 {
    experience
        .iter()
        .filter_map(|exp| {
            let start = exp.start_date?;
            let end = if exp.current {
                now
            } else {
                exp.end_date.unwrap_or(now)
            };
            Some(years_between(start, end))
        })
        .sum()
}

/// How well `years` fits a level band, in `[0, 1]`.
pub fn level_match(level: &ExperienceLevel, years: f64) -> f64 {
    let Some((lo, hi)) = level.year_range() else {
        return NEUTRAL_LEVEL_MATCH;
    };
    if years >= lo && years <= hi {
        1.0
    } else if years < lo {
        (1.0 - (lo - years) * BELOW_BAND_PENALTY).max(0.0)
    } else {
        (1.0 - (years - hi) * ABOVE_BAND_PENALTY).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ExperienceEntry;
    use crate::scoring::fixtures;
    use chrono::Duration;

    #[test]
    fn test_level_match_inside_band() {
        assert_eq!(level_match(&ExperienceLevel::EntryLevel, 0.0), 1.0);
        assert_eq!(level_match(&ExperienceLevel::Intermediate, 3.5), 1.0);
        assert_eq!(level_match(&ExperienceLevel::Advanced, 20.0), 1.0);
    }

    #[test]
    fn test_level_match_below_and_above_band() {
        let below = level_match(&ExperienceLevel::Advanced, 3.0);
        assert!((below - 0.6).abs() < 1e-9, "got {below}");
        let above = level_match(&ExperienceLevel::EntryLevel, 4.0);
        assert!((above - 0.8).abs() < 1e-9, "got {above}");
        assert_eq!(level_match(&ExperienceLevel::Intermediate, 30.0), 0.0);
    }

    #[test]
    fn test_unrecognized_level_is_neutral() {
        let senior = ExperienceLevel::from_label("Senior");
        assert_eq!(level_match(&senior, 4.0), 0.5);
    }

    #[test]
    fn test_skills_and_completeness_only() {
        let resume = fixtures::resume(&["rust", "SQL"]);
        let opportunity = fixtures::opportunity("Dev", "", &["Rust", "sql", "Go", "Kafka"]);
        // skills 20/40, completeness 1/3 of 20 (skills only) → 26.67/60
        assert_eq!(quick_score(&resume, &opportunity, Utc::now()), 44);
    }

    #[test]
    fn test_no_required_skills_earns_no_skill_points() {
        let resume = fixtures::resume(&["Rust"]);
        let opportunity = fixtures::opportunity("Dev", "", &[]);
        // 0/40 skills, 1/3 completeness → 6.67/60
        assert_eq!(quick_score(&resume, &opportunity, Utc::now()), 11);
    }

    #[test]
    fn test_complete_matching_profile_scores_hundred() {
        let now = Utc::now();
        let mut resume = fixtures::resume(&["Rust"]);
        resume.personal_info.phone = Some("555-0100".to_string());
        resume.education.push(fixtures::education("BSc"));
        resume.experience.push(fixtures::job(now, 3.0));
        let mut opportunity = fixtures::opportunity("Dev", "", &["rust"]);
        opportunity.experience_level = Some(ExperienceLevel::Intermediate);

        assert_eq!(quick_score(&resume, &opportunity, now), 100);
    }

    #[test]
    fn test_applicant_years_counts_open_ended_entries() {
        let now = Utc::now();
        let entries = vec![
            ExperienceEntry {
                start_date: Some(now - Duration::days(365)),
                ..Default::default()
            },
            ExperienceEntry {
                start_date: None,
                end_date: Some(now),
                ..Default::default()
            },
        ];
        let years = applicant_years(&entries, now);
        assert!((years - 1.0).abs() < 1e-9, "got {years}");
    }
}
