pub mod batch;
pub mod candidate;
pub mod candidate_stage;
pub mod job;
pub mod note;
pub mod stage;
