//! CLI interface for the resume tailor

use crate::config::OutputFormat;
use crate::processing::document::ToneStyle;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-tailor")]
#[command(about = "Tailor a resume profile to a job description and score the fit")]
#[command(long_about = "Analyze a job posting, rewrite and keyword-optimize resume bullets, plan skill gaps, and score the match")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full tailoring pipeline
    Tailor {
        /// Path to the candidate profile (JSON, TOML)
        #[arg(short, long)]
        profile: PathBuf,

        /// Path to the job posting (JSON, TOML, TXT, MD, PDF)
        #[arg(short, long)]
        job: PathBuf,

        /// Writing style: concise, executive, technical
        #[arg(long)]
        style: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include per-bullet detail and the full gap plan
        #[arg(short, long)]
        detailed: bool,
    },

    /// Analyze a job posting only
    Analyze {
        /// Path to the job posting
        #[arg(short, long)]
        job: PathBuf,

        /// Profile whose skills are compared against the requirements
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },

    /// Score a saved tailored resume against a saved analysis (both JSON)
    Score {
        #[arg(short, long)]
        tailored: PathBuf,

        #[arg(short, long)]
        analysis: PathBuf,
    },

    /// Rate the strength of individual bullets
    Strength {
        /// Bullet texts
        #[arg(required = true)]
        bullets: Vec<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

pub fn parse_style(style: &str) -> Result<ToneStyle, String> {
    style.parse()
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
