//! Document model and the pipeline stages

pub mod document;
pub mod skills;
pub mod ats_matcher;
pub mod draft;
pub mod tone;
pub mod ats_optimizer;
pub mod tailoring;
pub mod gap_analyzer;
pub mod scorer;
pub mod strength;
pub mod pipeline;
pub mod cache;
