pub mod opportunity;
pub mod resume;
pub mod rubric;
pub mod user;
