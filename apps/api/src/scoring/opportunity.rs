//! Opportunity scorer: one resume against one opportunity.
//!
//! The opportunity's own skills, implicit title/description keywords and an
//! email check always apply. On top of that one of two strategies runs:
//! the owning recruiter's active rubric ([`OpportunityStrategy::Rubric`]) or
//! the built-in default ([`OpportunityStrategy::Default`]).
//!
//! The two strategies measure experience differently. The rubric strategy
//! counts experience entries against `required_experience`; the default
//! strategy sums the actual year spans. Both are kept as they are.

use chrono::{DateTime, Utc};

use crate::models::opportunity::Opportunity;
use crate::models::resume::{ExperienceEntry, Resume};
use crate::models::rubric::Rubric;
use crate::scoring::text::{flatten_resume, mentions, opportunity_keywords};
use crate::scoring::{weight_or, years_between, ScoreResult, Tally};

/// Scores at or above this flag the candidate as recommended.
pub const RECOMMENDATION_THRESHOLD: u32 = 85;

const SKILL_WEIGHT: u32 = 10;
const IMPLICIT_KEYWORD_WEIGHT: u32 = 1;
const EMAIL_WEIGHT: u32 = 2;
const FALLBACK_MATCHED: u32 = 3;

const RUBRIC_EXPERIENCE_WEIGHT: u32 = 8;
const RUBRIC_EDUCATION_WEIGHT: u32 = 6;
const RUBRIC_EDUCATION_PARTIAL: u32 = 3;
const RUBRIC_KEYWORD_DEFAULT_WEIGHT: u32 = 2;
const RUBRIC_FORMAT_WEIGHT: u32 = 3;

const DEFAULT_EXPERIENCE_WEIGHT: u32 = 5;
const DEFAULT_EDUCATION_WEIGHT: u32 = 3;

/// Which criteria supplement the opportunity's own requirements.
#[derive(Debug, Clone, Copy)]
pub enum OpportunityStrategy<'a> {
    Rubric(&'a Rubric),
    Default,
}

impl<'a> OpportunityStrategy<'a> {
    pub fn select(active_rubric: Option<&'a Rubric>) -> Self {
        match active_rubric {
            Some(rubric) => OpportunityStrategy::Rubric(rubric),
            None => OpportunityStrategy::Default,
        }
    }

    pub fn uses_rubric(&self) -> bool {
        matches!(self, OpportunityStrategy::Rubric(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpportunityScore {
    pub result: ScoreResult,
    pub used_rubric: bool,
    pub recommended: bool,
}

pub fn score_against_opportunity(
    resume: &Resume,
    opportunity: &Opportunity,
    strategy: OpportunityStrategy<'_>,
    now: DateTime<Utc>,
) -> OpportunityScore {
    let text = flatten_resume(resume);
    let mut tally = Tally::default();

    for skill in &opportunity.skills_required {
        tally.check(SKILL_WEIGHT, resume.skills.iter().any(|s| s == skill));
    }

    match strategy {
        OpportunityStrategy::Rubric(rubric) => apply_rubric(&mut tally, resume, rubric, &text),
        OpportunityStrategy::Default => apply_default(&mut tally, resume, now),
    }

    for keyword in opportunity_keywords(&opportunity.title, &opportunity.description) {
        tally.check(IMPLICIT_KEYWORD_WEIGHT, mentions(&text, &keyword));
    }

    tally.check(EMAIL_WEIGHT, resume.has_email());

    let mut result = tally.finish(FALLBACK_MATCHED);
    result.score = result.score.min(100);

    OpportunityScore {
        result,
        used_rubric: strategy.uses_rubric(),
        recommended: result.score >= RECOMMENDATION_THRESHOLD,
    }
}

fn apply_rubric(tally: &mut Tally, resume: &Resume, rubric: &Rubric, text: &str) {
    if rubric.required_experience > 0 {
        tally.credit(
            RUBRIC_EXPERIENCE_WEIGHT,
            entry_count_credit(resume.experience.len(), rubric.required_experience),
        );
    }

    if !rubric.required_education.is_empty() {
        tally.credit(
            RUBRIC_EDUCATION_WEIGHT,
            education_credit(resume, &rubric.required_education),
        );
    }

    for keyword in &rubric.keywords {
        tally.check(
            weight_or(keyword.weight, RUBRIC_KEYWORD_DEFAULT_WEIGHT),
            mentions(text, &keyword.keyword),
        );
    }

    let format = rubric.format_requirements;
    if format.requires_contact_info {
        tally.check(RUBRIC_FORMAT_WEIGHT, resume.has_contact_info());
    }
    if format.requires_education {
        tally.check(RUBRIC_FORMAT_WEIGHT, resume.has_education());
    }
}

fn apply_default(tally: &mut Tally, resume: &Resume, now: DateTime<Utc>) {
    let experience = if resume.experience.is_empty() {
        0
    } else {
        span_credit(total_experience_years(&resume.experience, now))
    };
    tally.credit(DEFAULT_EXPERIENCE_WEIGHT, experience);
    tally.check(DEFAULT_EDUCATION_WEIGHT, resume.has_education());
}

/// Rubric experience credit out of 8, treating each entry as one year.
pub fn entry_count_credit(entries: usize, required_years: u32) -> u32 {
    if required_years == 0 || entries as u32 >= required_years {
        return RUBRIC_EXPERIENCE_WEIGHT;
    }
    let ratio = entries as f64 / required_years as f64;
    (ratio * RUBRIC_EXPERIENCE_WEIGHT as f64).round() as u32
}

/// Rubric education credit out of 6: full for a degree naming the required
/// education, half for any education at all.
pub fn education_credit(resume: &Resume, required: &str) -> u32 {
    if resume.education.is_empty() {
        return 0;
    }
    let required = required.to_lowercase();
    let has_degree = resume
        .education
        .iter()
        .any(|e| e.degree.to_lowercase().contains(&required));
    if has_degree {
        RUBRIC_EDUCATION_WEIGHT
    } else {
        RUBRIC_EDUCATION_PARTIAL
    }
}

/// Summed experience in years. Current roles run until `now`; a finished role
/// missing either date spans nothing.
pub fn total_experience_years(experience: &[ExperienceEntry], now: DateTime<Utc>) -> f64 {
    experience
        .iter()
        .map(|exp| {
            let end = if exp.current { Some(now) } else { exp.end_date };
            match (exp.start_date, end) {
                (Some(start), Some(end)) => years_between(start, end),
                _ => 0.0,
            }
        })
        .sum()
}

/// Default experience credit out of 5 for a non-empty history.
pub fn span_credit(years: f64) -> u32 {
    if years >= 3.0 {
        5
    } else if years >= 1.0 {
        3
    } else {
        1
    }
}
