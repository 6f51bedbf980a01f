//! Recommendation filter over cached ATS scores. Never re-scores.
//!
//! Each candidate is represented by their most recently scored resume. Ranking
//! is by score descending; ties go to the more recently scored resume, then to
//! the lower resume id, so equal scores order the same way on every call.

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::resume::Resume;

pub const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub candidate_id: Uuid,
    pub resume_id: Uuid,
    pub resume_title: String,
    pub ats_score: u32,
    pub scored_at: Option<DateTime<Utc>>,
}

pub fn recommend(resumes: &[Resume], threshold: u32, limit: usize) -> Vec<Recommendation> {
    let mut latest: HashMap<Uuid, &Resume> = HashMap::new();
    for resume in resumes.iter().filter(|r| r.ats_score.is_some()) {
        latest
            .entry(resume.user_id)
            .and_modify(|current| {
                if recency_key(resume) > recency_key(current) {
                    *current = resume;
                }
            })
            .or_insert(resume);
    }

    let mut picks: Vec<Recommendation> = latest
        .into_values()
        .filter_map(|resume| {
            let score = resume.ats_score?;
            (score >= threshold).then(|| Recommendation {
                candidate_id: resume.user_id,
                resume_id: resume.id,
                resume_title: resume.title.clone(),
                ats_score: score,
                scored_at: resume.score_updated_at,
            })
        })
        .collect();

    picks.sort_by_key(|r| (Reverse(r.ats_score), Reverse(r.scored_at), r.resume_id));
    picks.truncate(limit);
    picks
}

/// Orders a candidate's resumes by when they were last scored, falling back to
/// the last edit and then the id.
fn recency_key(resume: &Resume) -> (Option<DateTime<Utc>>, DateTime<Utc>, Reverse<Uuid>) {
    (resume.score_updated_at, resume.last_updated, Reverse(resume.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::fixtures;
    use chrono::Duration;

    fn scored(score: u32, at: DateTime<Utc>) -> Resume {
        let mut resume = fixtures::resume(&[]);
        resume.ats_score = Some(score);
        resume.score_updated_at = Some(at);
        resume
    }

    #[test]
    fn test_filters_and_sorts_descending() {
        let now = Utc::now();
        let resumes: Vec<Resume> = [92, 85, 84, 90].iter().map(|s| scored(*s, now)).collect();

        let picks = recommend(&resumes, 85, DEFAULT_LIMIT);
        let scores: Vec<u32> = picks.iter().map(|r| r.ats_score).collect();
        assert_eq!(scores, vec![92, 90, 85]);
    }

    #[test]
    fn test_caps_at_limit() {
        let now = Utc::now();
        let resumes: Vec<Resume> = (0..30).map(|_| scored(95, now)).collect();
        assert_eq!(recommend(&resumes, 85, DEFAULT_LIMIT).len(), 20);
    }

    #[test]
    fn test_unscored_resumes_are_ignored() {
        let resumes = vec![fixtures::resume(&["Rust"])];
        assert!(recommend(&resumes, 0, DEFAULT_LIMIT).is_empty());
    }

    #[test]
    fn test_uses_each_candidates_latest_score() {
        let now = Utc::now();
        let candidate = Uuid::new_v4();
        let mut old_high = scored(97, now - Duration::days(3));
        old_high.user_id = candidate;
        let mut new_low = scored(60, now);
        new_low.user_id = candidate;
        let other = scored(88, now);

        let picks = recommend(&[old_high, new_low, other.clone()], 85, DEFAULT_LIMIT);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].resume_id, other.id);
    }

    #[test]
    fn test_ties_prefer_most_recent_then_resume_id() {
        let now = Utc::now();
        let older = scored(90, now - Duration::hours(1));
        let newer = scored(90, now);
        let mut same_a = scored(90, now - Duration::hours(2));
        let mut same_b = scored(90, now - Duration::hours(2));
        same_a.id = Uuid::from_u128(1);
        same_b.id = Uuid::from_u128(2);

        let input = vec![same_b.clone(), older.clone(), same_a.clone(), newer.clone()];
        let ids: Vec<Uuid> = recommend(&input, 85, DEFAULT_LIMIT)
            .into_iter()
            .map(|r| r.resume_id)
            .collect();
        assert_eq!(ids, vec![newer.id, older.id, same_a.id, same_b.id]);

        let mut reversed = input.clone();
        reversed.reverse();
        let again: Vec<Uuid> = recommend(&reversed, 85, DEFAULT_LIMIT)
            .into_iter()
            .map(|r| r.resume_id)
            .collect();
        assert_eq!(again, ids);
    }
}
