//! Language model capability and the stages that depend on it

pub mod client;
pub mod prompts;
pub mod analyzer;
pub mod rewriter;
pub mod stub;

pub use client::{CompletionConfig, Completion, LanguageModel, Message, Role};
pub use stub::StubLanguageModel;
