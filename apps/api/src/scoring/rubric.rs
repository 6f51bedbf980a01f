//! Rubric scorer: one resume against one recruiter rubric.
//!
//! Algorithm:
//! 1. Required skills: rubric weight (default 1), exact case-sensitive skill match
//! 2. Keywords: rubric weight (default 1), substring of the flattened resume
//! 3. Contact info (if required): 1 point, email and phone present
//! 4. Education (if required): 1 point, at least one entry
//! 5. Nothing to score → 5/10 baseline
//! 6. score = round(100 × matched / total)

use crate::models::resume::Resume;
use crate::models::rubric::Rubric;
use crate::scoring::text::{flatten_resume, mentions};
use crate::scoring::{weight_or, ScoreResult, Tally};

const DEFAULT_WEIGHT: u32 = 1;
const FORMAT_WEIGHT: u32 = 1;
const FALLBACK_MATCHED: u32 = 5;

pub fn score_against_rubric(resume: &Resume, rubric: &Rubric) -> ScoreResult {
    let mut tally = Tally::default();

    for required in &rubric.required_skills {
        let hit = resume.skills.iter().any(|s| s == &required.skill);
        tally.check(weight_or(required.weight, DEFAULT_WEIGHT), hit);
    }

    if !rubric.keywords.is_empty() {
        let text = flatten_resume(resume);
        for keyword in &rubric.keywords {
            tally.check(
                weight_or(keyword.weight, DEFAULT_WEIGHT),
                mentions(&text, &keyword.keyword),
            );
        }
    }

    let format = rubric.format_requirements;
    if format.requires_contact_info {
        tally.check(FORMAT_WEIGHT, resume.has_contact_info());
    }
    if format.requires_education {
        tally.check(FORMAT_WEIGHT, resume.has_education());
    }

    tally.finish(FALLBACK_MATCHED)
}
