// ATS API: rubric management, resume scoring, recommendations and applicant ranking.
// Scoring math lives in crate::scoring; this module handles lookups, access checks and persistence.

pub mod handlers;
pub mod parameters;
pub mod service;
