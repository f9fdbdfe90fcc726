//! Output formatters: console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::matching::explainer::Recommendation;
use crate::matching::similarity::SimilarityMethod;
use crate::output::report::{ExplainReport, RankReport};
use colored::Colorize;

/// Trait for rendering reports into a given output format
pub trait OutputFormatter {
    fn format_explain(&self, report: &ExplainReport) -> Result<String>;
    fn format_rank(&self, report: &RankReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for documentation and reports
pub struct MarkdownFormatter;

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn recommendation_label(&self, recommendation: Recommendation) -> String {
        if !self.use_colors {
            return recommendation.to_string();
        }
        match recommendation {
            Recommendation::Hire => recommendation.to_string().green().bold().to_string(),
            Recommendation::Consider => recommendation.to_string().yellow().bold().to_string(),
            Recommendation::Pass => recommendation.to_string().red().bold().to_string(),
        }
    }

    fn method_label(method: SimilarityMethod) -> &'static str {
        match method {
            SimilarityMethod::Semantic => "semantic",
            SimilarityMethod::KeywordFallback => "keyword fallback",
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_explain(&self, report: &ExplainReport) -> Result<String> {
        let e = &report.explanation;
        let mut out = String::new();

        out.push_str(&format!(
            "Similarity: {:.2} ({})\n",
            e.similarity.score,
            Self::method_label(e.similarity.method)
        ));
        out.push_str(&format!(
            "Skill match: {:.0}% ({} of {} requirements)\n",
            e.gap.match_ratio * 100.0,
            e.gap.matches.len(),
            e.gap.matches.len() + e.gap.gaps.len()
        ));
        out.push_str(&format!(
            "Recommendation: {}\n",
            self.recommendation_label(e.recommendation)
        ));
        out.push_str(&format!("{}\n", e.summary_text));

        if self.detailed {
            if !e.gap.matches.is_empty() {
                out.push_str(&format!("  Matched: {}\n", e.gap.matches.join(", ")));
            }
            if !e.gap.gaps.is_empty() {
                out.push_str(&format!("  Missing: {}\n", e.gap.gaps.join(", ")));
            }
            if let Some(note) = &e.similarity.note {
                out.push_str(&format!("  Note: {}\n", note));
            }
            out.push_str(&format!(
                "  Processed in {}ms\n",
                report.metadata.processing_time_ms
            ));
        }

        Ok(out)
    }

    fn format_rank(&self, report: &RankReport) -> Result<String> {
        let mut out = String::new();

        out.push_str(&format!(
            "Ranked {} of {} candidates ({})\n\n",
            report.candidates.len(),
            report.total_candidates,
            Self::method_label(report.metadata.similarity_method)
        ));

        for candidate in &report.candidates {
            let skills_preview = if candidate.profile.skills.is_empty() {
                "(no skills listed)".to_string()
            } else {
                candidate.profile.skills.join(", ")
            };
            out.push_str(&format!(
                "{:>3}. {:>6.2}  {}\n",
                candidate.rank, candidate.score, skills_preview
            ));
        }

        if self.detailed {
            out.push_str(&format!(
                "\nProcessed in {}ms\n",
                report.metadata.processing_time_ms
            ));
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn serialize<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_explain(&self, report: &ExplainReport) -> Result<String> {
        self.serialize(report)
    }

    fn format_rank(&self, report: &RankReport) -> Result<String> {
        self.serialize(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_explain(&self, report: &ExplainReport) -> Result<String> {
        let e = &report.explanation;
        let mut out = String::new();

        out.push_str("# Match Explanation\n\n");
        out.push_str(&format!(
            "- **Similarity score:** {:.2} ({:?})\n",
            e.similarity.score, e.similarity.method
        ));
        out.push_str(&format!(
            "- **Skill match ratio:** {:.2}\n",
            e.gap.match_ratio
        ));
        out.push_str(&format!("- **Recommendation:** {}\n\n", e.recommendation));
        out.push_str(&format!("{}\n\n", e.summary_text));

        if !e.gap.matches.is_empty() {
            out.push_str("## Matched requirements\n\n");
            for skill in &e.gap.matches {
                out.push_str(&format!("- {}\n", skill));
            }
            out.push('\n');
        }

        if !e.gap.gaps.is_empty() {
            out.push_str("## Missing requirements\n\n");
            for skill in &e.gap.gaps {
                out.push_str(&format!("- {}\n", skill));
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "---\n*Generated by cv-match {} at {}*\n",
            report.metadata.tool_version, report.metadata.generated_at
        ));

        Ok(out)
    }

    fn format_rank(&self, report: &RankReport) -> Result<String> {
        let mut out = String::new();

        out.push_str("# Candidate Ranking\n\n");
        out.push_str("| Rank | Score | Skills |\n");
        out.push_str("|------|-------|--------|\n");

        for candidate in &report.candidates {
            out.push_str(&format!(
                "| {} | {:.2} | {} |\n",
                candidate.rank,
                candidate.score,
                candidate.profile.skills.join(", ")
            ));
        }

        out.push_str(&format!(
            "\n---\n*Generated by cv-match {} at {}*\n",
            report.metadata.tool_version, report.metadata.generated_at
        ));

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Pick a formatter for the requested output format.
pub fn formatter_for(
    format: &OutputFormat,
    use_colors: bool,
    detailed: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors, detailed)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}
