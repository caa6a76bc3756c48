//! Resume tailor: tailor a candidate profile to a job posting and score the fit

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_tailor::cli::{self, Cli, Commands, ConfigAction};
use resume_tailor::input::InputManager;
use resume_tailor::llm::stub::STUB_MODEL_ID;
use resume_tailor::output::{
    save_report_to_file, suggest_filename, ReportGenerator, ReportMetadata, TailoringReport,
};
use resume_tailor::processing::strength::{analyze_bullet_strength, enhance_bullet, overall_strength, StrengthRating};
use resume_tailor::{
    analyze_jd, orchestrate, score_match, Analysis, Config, Result, ResumeTailorError,
    StubLanguageModel, TailoredResume,
};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Tailor {
            profile,
            job,
            style,
            output,
            save,
            detailed,
        } => {
            cli::validate_file_extension(&profile, &["json", "toml"])
                .map_err(|e| ResumeTailorError::InvalidInput(format!("Profile file: {}", e)))?;
            cli::validate_file_extension(&job, &["json", "toml", "txt", "md", "pdf"])
                .map_err(|e| ResumeTailorError::InvalidInput(format!("Job file: {}", e)))?;

            let output_format = match output.as_deref() {
                Some(format) => cli::parse_output_format(format).map_err(ResumeTailorError::InvalidInput)?,
                None => config.output.format,
            };
            let style = style
                .as_deref()
                .map(cli::parse_style)
                .transpose()
                .map_err(ResumeTailorError::InvalidInput)?;

            let options = config.orchestrator_options(style);
            println!("🚀 Resume tailoring");
            println!("👤 Profile: {}", profile.display());
            println!("💼 Job: {}", job.display());
            println!("✍️  Style: {}", options.style);

            let mut input_manager = InputManager::new();
            let candidate = input_manager.load_profile(&profile).await?;
            let posting = input_manager.load_job(&job).await?;

            let spinner = spinner("Analyzing posting and rewriting bullets...");
            let start = Instant::now();
            let style = options.style;
            let result = orchestrate(&candidate, &posting, options).await;
            spinner.finish_and_clear();
            let result = result?;
            let elapsed = start.elapsed().as_millis() as u64;
            info!("Tailoring finished in {}ms", elapsed);

            let metadata = ReportMetadata::new(
                &profile.to_string_lossy(),
                &job.to_string_lossy(),
                STUB_MODEL_ID,
                style,
            )
            .with_processing_time(elapsed);
            let report = TailoringReport::build(&candidate, &posting, result, metadata);

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
                true,
            );
            let content = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    let target = if path.is_dir() {
                        path.join(suggest_filename(output_format, &job.to_string_lossy(), true))
                    } else {
                        path
                    };
                    save_report_to_file(&content, &target)?;
                    println!("\n💾 Report saved to {}", target.display());
                    println!("🎯 Match score: {}/100", report.summary.score);
                }
                None => println!("{}", content),
            }
        }

        Commands::Analyze { job, profile } => {
            let mut input_manager = InputManager::new();
            let posting = input_manager.load_job(&job).await?;
            let skills: Vec<String> = match profile {
                Some(path) => input_manager
                    .load_profile(&path)
                    .await?
                    .skills
                    .into_iter()
                    .map(|s| s.name)
                    .collect(),
                None => Vec::new(),
            };

            let model = StubLanguageModel::new()?;
            let analysis = analyze_jd(&posting, &skills, &model).await?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }

        Commands::Score { tailored, analysis } => {
            let tailored: TailoredResume = read_json(&tailored)?;
            let analysis: Analysis = read_json(&analysis)?;
            let score = score_match(&tailored, &analysis);

            println!("🎯 Match score: {}/100\n", score.score.to_string().bold());
            for line in &score.rationale {
                println!("  {}", line);
            }
            if !score.strengths.is_empty() {
                println!("\n✅ Strengths: {}", score.strengths.join(", ").green());
            }
            if !score.gaps.is_empty() {
                println!("⚠️  Gaps: {}", score.gaps.join(", ").yellow());
            }
        }

        Commands::Strength { bullets } => {
            for bullet in &bullets {
                let strength = analyze_bullet_strength(bullet);
                println!("• {}", bullet);
                println!("  Score: {}/100 ({})", strength.overall, strength.rating);
                for suggestion in &strength.suggestions {
                    println!("  💡 {}", suggestion);
                }
                if strength.rating <= StrengthRating::Fair {
                    println!("  ✨ Try: {}", enhance_bullet(bullet, &strength).green());
                }
                println!();
            }

            let overall = overall_strength(&bullets);
            println!(
                "📊 Average: {}/100 | strong: {} | weak: {} | improvement potential: {}",
                overall.average_score, overall.strong_bullets, overall.weak_bullets, overall.improvement_potential
            );
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ResumeTailorError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("{}", content);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ResumeTailorError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&content)?)
}
