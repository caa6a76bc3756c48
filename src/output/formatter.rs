//! Output formatters for tailoring reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeTailorError};
use crate::output::report::TailoringReport;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a tailoring report in one output format
pub trait OutputFormatter {
    fn format_report(&self, report: &TailoringReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Standalone HTML page
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Tailored Resume: {{ job_title }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section { margin: 25px 0; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .bullet { background: #f8f9fa; padding: 12px; margin: 10px 0; border-radius: 6px; border-left: 4px solid #17a2b8; }
        .bullet .original { color: #6c757d; font-size: 0.9em; }
        .strengths, .gaps { background: #f8f9fa; padding: 15px; border-radius: 6px; margin: 10px 0; }
        .strengths { border-left: 4px solid #28a745; }
        .gaps { border-left: 4px solid #ffc107; }
        .warning { color: #b36b00; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🎯 {{ candidate }} for {{ job_title }}</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <div class="section">
            <h2>Match Summary</h2>
            <h3>Match Score: {{ score }}/100 <span class="score-badge {{ score_class }}">{{ score_label }}</span></h3>
            <p><strong>Verdict:</strong> {{ verdict }}</p>
            <ul>
                {% for line in rationale %}<li>{{ line }}</li>{% endfor %}
            </ul>
        </div>

        <div class="section">
            <h2>✅ Strengths</h2>
            <div class="strengths">
                <ul>{% for item in strengths %}<li>{{ item }}</li>{% endfor %}</ul>
            </div>
            {% if has_gaps %}
            <h2>⚠️ Gaps</h2>
            <div class="gaps">
                <ul>{% for item in gaps %}<li>{{ item }}</li>{% endfor %}</ul>
            </div>
            {% endif %}
        </div>

        <div class="section">
            <h2>📝 Summary</h2>
            <p>{{ summary }}</p>
            <h2>🧰 Skills</h2>
            {% for group in skill_groups %}
            <p><strong>{{ group.category }}:</strong> {{ group.skills }}</p>
            {% endfor %}
        </div>

        <div class="section">
            <h2>✍️ Tailored Bullets</h2>
            <p>Average strength: {{ strength_before }} → {{ strength_after }}</p>
            {% for bullet in bullets %}
            <div class="bullet">
                <div>{{ bullet.tailored }}</div>
                <div class="original">Original: {{ bullet.original }} ({{ bullet.score_before }} → {{ bullet.score_after }})</div>
            </div>
            {% endfor %}
        </div>

        {% if has_warnings %}
        <div class="section">
            <h2>🚧 Warnings</h2>
            <ul>{% for warning in warnings %}<li class="warning">{{ warning }}</li>{% endfor %}</ul>
        </div>
        {% endif %}

        {% if has_gap_plan %}
        <div class="section">
            <h2>🚀 Gap Plan</h2>
            {{ gap_plan_html | safe }}
        </div>
        {% endif %}

        <div class="metadata">
            <p><strong>ℹ️ Generated by Resume Tailor v{{ version }}</strong></p>
            <p><strong>Model:</strong> {{ model }} | <strong>Style:</strong> {{ style }}</p>
            <p><strong>Profile:</strong> {{ profile_file }} | <strong>Job:</strong> {{ job_file }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    candidate: String,
    job_title: String,
    generated_at: String,
    processing_time: u64,
    score: u8,
    score_class: &'static str,
    score_label: &'static str,
    verdict: String,
    rationale: Vec<String>,
    strengths: Vec<String>,
    gaps: Vec<String>,
    has_gaps: bool,
    summary: String,
    skill_groups: Vec<HtmlSkillGroup>,
    strength_before: u8,
    strength_after: u8,
    bullets: Vec<HtmlBullet>,
    warnings: Vec<String>,
    has_warnings: bool,
    gap_plan_html: String,
    has_gap_plan: bool,
    version: String,
    model: String,
    style: String,
    profile_file: String,
    job_file: String,
}

struct HtmlSkillGroup {
    category: String,
    skills: String,
}

struct HtmlBullet {
    original: String,
    tailored: String,
    score_before: u8,
    score_after: u8,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_gap_plan(&self, report: &TailoringReport, output: &mut String) {
        let gaps = &report.result.gaps;
        if gaps.missing_experience.is_empty() {
            return;
        }

        output.push_str(&self.format_header("🚀 Gap Plan", 2));
        for item in &gaps.missing_experience {
            output.push_str(&format!("• {}\n", self.colorize(&item.area, Color::Red)));
            for task in &item.example_tasks {
                output.push_str(&format!("    task: {}\n", task));
            }
            for idea in &item.proof_ideas {
                output.push_str(&format!("    proof: {}\n", idea));
            }
        }

        if !gaps.micro_projects.is_empty() {
            output.push_str(&self.format_header("Micro-projects", 3));
            for (i, project) in gaps.micro_projects.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, self.colorize(&project.title, Color::Cyan)));
                output.push_str(&format!("   Goal: {}\n", project.goal));
                output.push_str(&format!("   Steps: {}\n", project.steps.join(" → ")));
                output.push_str(&format!("   Deliverables: {}\n", project.deliverables.join(", ")));
            }
        }

        if !gaps.filler_bullets.is_empty() {
            output.push_str(&self.format_header("Filler bullet ideas", 3));
            for bullet in &gaps.filler_bullets {
                output.push_str(&format!("  • {}\n", bullet.text()));
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &TailoringReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.summary;
        let score = &report.result.score;

        output.push_str(&self.format_header("🎯 RESUME TAILORING REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Match Summary", 2));
        let target = match &summary.company {
            Some(company) => format!("{} @ {}", summary.job_title, company),
            None => summary.job_title.clone(),
        };
        output.push_str(&format!("{} → {}\n", summary.candidate, self.colorize(&target, Color::Cyan)));
        output.push_str(&format!(
            "Match Score: {}/100 {}\n",
            summary.score,
            self.format_score_badge(summary.score)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&summary.verdict, Color::Cyan)));
        output.push_str(&format!(
            "Required skills held: {}/{} | Keyword coverage: {:.0}%\n",
            summary.required_matched,
            summary.required_total,
            score.keyword_coverage * 100.0
        ));

        if !score.rationale.is_empty() {
            output.push_str(&self.format_header("Score Rationale", 3));
            for line in &score.rationale {
                output.push_str(&format!("  {}\n", line));
            }
        }

        if !score.strengths.is_empty() {
            output.push_str(&self.format_header("✅ Strengths", 3));
            for strength in &score.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        if !score.gaps.is_empty() {
            output.push_str(&self.format_header("⚠️ Gaps", 3));
            for gap in &score.gaps {
                output.push_str(&format!("  • {}\n", self.colorize(gap, Color::Yellow)));
            }
        }

        output.push_str(&self.format_header("📝 Tailored Summary", 2));
        output.push_str(&format!("{}\n", report.result.tailored.summary));

        if !report.skills_by_category.is_empty() {
            output.push_str(&self.format_header("🧰 Skills", 2));
            for group in &report.skills_by_category {
                output.push_str(&format!(
                    "{}: {}\n",
                    self.colorize(&group.category, Color::BrightBlack),
                    group.skills.join(", ")
                ));
            }
        }

        output.push_str(&self.format_header("✍️ Tailored Bullets", 2));
        for bullet in &report.strength.bullets {
            output.push_str(&format!("  • {}\n", bullet.tailored));
            if self.detailed {
                output.push_str(&format!(
                    "    {} {} ({} → {}, {})\n",
                    self.colorize("was:", Color::BrightBlack),
                    bullet.original,
                    bullet.score_before,
                    bullet.score_after,
                    bullet.rating_after
                ));
            }
        }
        output.push_str(&format!(
            "📈 Average bullet strength: {} → {}\n",
            report.strength.before.average_score,
            self.colorize(&report.strength.after.average_score.to_string(), Color::Green)
        ));

        let tailored = &report.result.tailored;
        if !tailored.ats_keywords_added.is_empty() {
            output.push_str(&format!(
                "🔑 ATS keywords added: {}\n",
                tailored.ats_keywords_added.join(", ")
            ));
        }

        if !tailored.warnings.is_empty() {
            output.push_str(&self.format_header("🚧 Warnings", 3));
            for warning in &tailored.warnings {
                output.push_str(&format!("  • {}\n", self.colorize(warning, Color::Yellow)));
            }
        }

        if self.detailed {
            self.format_gap_plan(report, &mut output);

            let analysis = &report.result.analysis;
            if !analysis.hidden_signals.is_empty() || !analysis.risks.is_empty() {
                output.push_str(&self.format_header("🔍 Job Signals", 2));
                for signal in &analysis.hidden_signals {
                    output.push_str(&format!("  • {:?}: {} ({})\n", signal.kind, signal.signal, signal.evidence));
                }
                for risk in &analysis.risks {
                    output.push_str(&format!("  • Risk: {}\n", self.colorize(risk, Color::Red)));
                }
            }
        }

        output.push_str(&format!(
            "\n{} Generated by Resume Tailor v{} | Model: {} | Style: {}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.tool_version,
            report.metadata.model,
            report.metadata.style
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &TailoringReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &TailoringReport) -> HtmlTemplate {
        let (score_class, score_label) = match report.summary.score {
            90..=100 => ("score-excellent", "Excellent"),
            80..=89 => ("score-good", "Very Good"),
            70..=79 => ("score-good", "Good"),
            60..=69 => ("score-fair", "Fair"),
            _ => ("score-poor", "Poor"),
        };

        let result = &report.result;
        let gap_plan_html = gap_plan_html(report);

        HtmlTemplate {
            include_styles: self.include_styles,
            candidate: report.summary.candidate.clone(),
            job_title: report.summary.job_title.clone(),
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            processing_time: report.metadata.processing_time_ms,
            score: report.summary.score,
            score_class,
            score_label,
            verdict: report.summary.verdict.clone(),
            rationale: result.score.rationale.clone(),
            strengths: result.score.strengths.clone(),
            gaps: result.score.gaps.clone(),
            has_gaps: !result.score.gaps.is_empty(),
            summary: result.tailored.summary.clone(),
            skill_groups: report
                .skills_by_category
                .iter()
                .map(|g| HtmlSkillGroup {
                    category: g.category.clone(),
                    skills: g.skills.join(", "),
                })
                .collect(),
            strength_before: report.strength.before.average_score,
            strength_after: report.strength.after.average_score,
            bullets: report
                .strength
                .bullets
                .iter()
                .map(|b| HtmlBullet {
                    original: b.original.clone(),
                    tailored: b.tailored.clone(),
                    score_before: b.score_before,
                    score_after: b.score_after,
                })
                .collect(),
            warnings: result.tailored.warnings.clone(),
            has_warnings: !result.tailored.warnings.is_empty(),
            has_gap_plan: !gap_plan_html.is_empty(),
            gap_plan_html,
            version: report.metadata.tool_version.clone(),
            model: report.metadata.model.clone(),
            style: report.metadata.style.to_string(),
            profile_file: report.metadata.profile_file.clone(),
            job_file: report.metadata.job_file.clone(),
        }
    }
}

/// Pre-rendered gap plan; every interpolated value is escaped here
fn gap_plan_html(report: &TailoringReport) -> String {
    let gaps = &report.result.gaps;
    let mut html = String::new();

    for item in &gaps.missing_experience {
        html.push_str(&format!("<h3>{}</h3>\n<ul>\n", escape_html(&item.area)));
        for task in item.example_tasks.iter().chain(item.proof_ideas.iter()) {
            html.push_str(&format!("<li>{}</li>\n", escape_html(task)));
        }
        html.push_str("</ul>\n");
    }

    for project in &gaps.micro_projects {
        html.push_str(&format!(
            "<h4>{}</h4>\n<p>{}</p>\n<ol>\n",
            escape_html(&project.title),
            escape_html(&project.goal)
        ));
        for step in &project.steps {
            html.push_str(&format!("<li>{}</li>\n", escape_html(step)));
        }
        html.push_str("</ol>\n");
    }

    html
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &TailoringReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeTailorError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: u8) -> &'static str {
        match score {
            90..=100 => "🟢 Excellent",
            80..=89 => "🟡 Very Good",
            70..=79 => "🟠 Good",
            60..=69 => "🔴 Fair",
            50..=59 => "🔴 Below Average",
            _ => "🔴 Poor",
        }
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &TailoringReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.summary;
        let result = &report.result;

        output.push_str(&format!(
            "# 🎯 {} for {}\n\n",
            summary.candidate, summary.job_title
        ));

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Profile:** `{}` | **Job:** `{}` | **Style:** {}\n\n",
                file_name(&report.metadata.profile_file),
                file_name(&report.metadata.job_file),
                report.metadata.style
            ));
        }

        output.push_str("## Match Summary\n\n");
        output.push_str(&format!(
            "**Match Score:** {}/100 {}\n\n",
            summary.score,
            Self::markdown_score_badge(summary.score)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", summary.verdict));
        for line in &result.score.rationale {
            output.push_str(&format!("- {}\n", line));
        }
        output.push('\n');

        if !result.score.strengths.is_empty() {
            output.push_str("### ✅ Strengths\n\n");
            for strength in &result.score.strengths {
                output.push_str(&format!("- {}\n", strength));
            }
            output.push('\n');
        }

        if !result.score.gaps.is_empty() {
            output.push_str("### ⚠️ Gaps\n\n");
            for gap in &result.score.gaps {
                output.push_str(&format!("- {}\n", gap));
            }
            output.push('\n');
        }

        output.push_str("## Tailored Resume\n\n");
        output.push_str(&format!("{}\n\n", result.tailored.summary));

        if !report.skills_by_category.is_empty() {
            output.push_str("### Skills\n\n");
            for group in &report.skills_by_category {
                output.push_str(&format!("- **{}:** {}\n", group.category, group.skills.join(", ")));
            }
            output.push('\n');
        }

        output.push_str("### Experience Bullets\n\n");
        for bullet in &result.tailored.bullets {
            output.push_str(&format!("- {}\n", bullet.text()));
        }
        output.push('\n');

        output.push_str("### Bullet Strength\n\n");
        output.push_str("| | Before | After |\n|---|---|---|\n");
        output.push_str(&format!(
            "| Average score | {} | {} |\n| Strong bullets | {} | {} |\n| Weak bullets | {} | {} |\n\n",
            report.strength.before.average_score,
            report.strength.after.average_score,
            report.strength.before.strong_bullets,
            report.strength.after.strong_bullets,
            report.strength.before.weak_bullets,
            report.strength.after.weak_bullets
        ));

        if !result.tailored.ats_keywords_added.is_empty() {
            output.push_str(&format!(
                "**ATS keywords added:** {}\n\n",
                result.tailored.ats_keywords_added.join(", ")
            ));
        }

        if !result.tailored.warnings.is_empty() {
            output.push_str("### 🚧 Warnings\n\n");
            for warning in &result.tailored.warnings {
                output.push_str(&format!("- {}\n", warning));
            }
            output.push('\n');
        }

        if !result.gaps.missing_experience.is_empty() {
            output.push_str("## 🚀 Gap Plan\n\n");
            for item in &result.gaps.missing_experience {
                output.push_str(&format!("### {}\n\n", item.area));
                for task in &item.example_tasks {
                    output.push_str(&format!("- Task: {}\n", task));
                }
                for idea in &item.proof_ideas {
                    output.push_str(&format!("- Proof: {}\n", idea));
                }
                output.push('\n');
            }

            for project in &result.gaps.micro_projects {
                output.push_str(&format!("#### {}\n\n{}\n\n", project.title, project.goal));
                for (i, step) in project.steps.iter().enumerate() {
                    output.push_str(&format!("{}. {}\n", i + 1, step));
                }
                output.push_str(&format!("\n**Deliverables:** {}\n\n", project.deliverables.join(", ")));
            }
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by Resume Tailor v{} using {}*\n",
                report.metadata.tool_version, report.metadata.model
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &TailoringReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// `{stem}_tailored[_timestamp].{ext}` for the given input file name
pub fn suggest_filename(format: OutputFormat, source_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_tailored{}.{}", base_name, timestamp_suffix, extension)
}
