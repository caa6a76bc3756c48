//! Resume tailoring library: job analysis, bullet rewriting, ATS keyword
//! optimization, gap planning and match scoring

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod llm;
pub mod output;

pub use error::{Result, ResumeTailorError};
pub use config::Config;
pub use llm::analyzer::analyze_jd;
pub use llm::{LanguageModel, StubLanguageModel};
pub use processing::cache::CachedOrchestrator;
pub use processing::document::{
    Analysis, Bullet, JobPosting, MatchScore, PipelineResult, Profile, TailoredResume, ToneStyle,
};
pub use processing::pipeline::{orchestrate, OrchestratorOptions};
pub use processing::scorer::score_match;
