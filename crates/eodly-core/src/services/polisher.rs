//! Text polisher service for refining EOD reports
//!
//! Wraps the Generative Language `generateContent` API. Strictly best-effort:
//! every failure path degrades to the caller's original text, never an error.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{BreakInterval, FileMeta, Report, WorkHours};

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Shown instead of a team summary when the API call fails
pub const SUMMARY_UNAVAILABLE: &str =
    "AI summary is currently unavailable. Please check your configuration.";

#[derive(Debug, Clone)]
pub struct PolisherConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for PolisherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl PolisherConfig {
    /// Read configuration from the environment
    ///
    /// `GEMINI_API_KEY` supplies the credential; `EODLY_POLISH_MODEL` and
    /// `EODLY_POLISH_BASE_URL` override the defaults (the latter mainly for
    /// tests).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: std::env::var("EODLY_POLISH_MODEL").unwrap_or(defaults.model),
            base_url: std::env::var("EODLY_POLISH_BASE_URL").unwrap_or(defaults.base_url),
        }
    }
}

/// Everything the polisher sees about a report being drafted
#[derive(Debug, Clone)]
pub struct PolishInput {
    pub content: String,
    pub blockers: String,
    pub plan: String,
    pub user_name: String,
    pub shift: WorkHours,
    pub breaks: Vec<BreakInterval>,
    pub date: NaiveDate,
    pub links: Vec<String>,
    pub files: Vec<FileMeta>,
}

/// External text-polisher port
///
/// Both operations are infallible from the caller's perspective: failures map
/// to the fallback rendering or a fixed notice.
#[async_trait]
pub trait TextPolisher: Send + Sync {
    /// Produce a polished prose version of a report being drafted
    async fn polish_report(&self, input: &PolishInput) -> String;

    /// Two-sentence executive summary of a day's submitted reports
    async fn summarize_team(&self, reports: &[&Report]) -> String;
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<ContentBlock>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentBlock {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    #[serde(default)]
    content: Option<ContentBlock>,
}

// ============================================================================
// GeminiPolisher
// ============================================================================

pub struct GeminiPolisher {
    config: PolisherConfig,
    client: reqwest::Client,
}

impl GeminiPolisher {
    pub fn new(config: PolisherConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Whether an API key is present
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| Error::config("GEMINI_API_KEY is not configured in the environment"))?;

        let request = GenerateContentRequest {
            contents: vec![ContentBlock {
                parts: vec![ContentPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::internal(format!("API error {}: {}", status, text)));
        }

        let result: GenerateContentResponse = response.json().await?;

        let text: String = result
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::internal("Model returned no text content"));
        }

        Ok(text)
    }
}

#[async_trait]
impl TextPolisher for GeminiPolisher {
    async fn polish_report(&self, input: &PolishInput) -> String {
        let break_log = render_break_log(&input.breaks);
        let file_names: Vec<&str> = input.files.iter().map(|f| f.name.as_str()).collect();

        let prompt = format!(
            r#"Draft a professional EOD email using the following components.
IMPORTANT: You MUST include the links and files provided at the end of the summary if they are present.

Subject: EOD Report | {name} – {date}

Details provided:
Shift Schedule: {start} – {end}
Breaks: {breaks}
Achievements: {content}
Blockers: {blockers}
Plan: {plan}
Links: {links}
Files: {files}

Please produce a refined, professional version of this report."#,
            name = input.user_name,
            date = input.date,
            start = input.shift.start,
            end = input.shift.end,
            breaks = break_log,
            content = input.content,
            blockers = input.blockers,
            plan = input.plan,
            links = input.links.join(", "),
            files = file_names.join(", "),
        );

        match self.generate(&prompt).await {
            Ok(text) => ensure_sections(text, &input.links, &input.files),
            Err(e) => {
                log::warn!("[polisher] Falling back to raw content: {}", e);
                fallback_content(input)
            }
        }
    }

    async fn summarize_team(&self, reports: &[&Report]) -> String {
        let lines: Vec<String> = reports
            .iter()
            .map(|r| format!("- {} ({}): {}", r.user_name, r.status.as_str(), r.content))
            .collect();

        let prompt = format!(
            "Based on the following team daily reports, provide a concise 2-sentence \
             executive summary of today's progress and main blockers.\n\nReports:\n{}",
            lines.join("\n")
        );

        match self.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("[polisher] Team summary failed: {}", e);
                SUMMARY_UNAVAILABLE.to_string()
            }
        }
    }
}

// ============================================================================
// Fallback rendering
// ============================================================================

fn render_break_log(breaks: &[BreakInterval]) -> String {
    if breaks.is_empty() {
        return "None".to_string();
    }
    breaks
        .iter()
        .map(|b| format!("{} – {}", b.start, b.end))
        .collect::<Vec<_>>()
        .join(", ")
}

fn links_section(links: &[String]) -> String {
    if links.is_empty() {
        return String::new();
    }
    let items: Vec<String> = links.iter().map(|l| format!("* {}", l)).collect();
    format!("\n\n### **Related Links**\n{}", items.join("\n"))
}

fn files_section(files: &[FileMeta]) -> String {
    if files.is_empty() {
        return String::new();
    }
    let items: Vec<String> = files.iter().map(|f| format!("* {}", f.name)).collect();
    format!("\n\n### **Attachments**\n{}", items.join("\n"))
}

/// Append the links/attachments sections when the polished text omits them
fn ensure_sections(mut text: String, links: &[String], files: &[FileMeta]) -> String {
    if let Some(first) = links.first() {
        if !text.contains(first.as_str()) {
            text.push_str(&links_section(links));
        }
    }
    if let Some(first) = files.first() {
        if !text.contains(first.name.as_str()) {
            text.push_str(&files_section(files));
        }
    }
    text
}

/// The rendering used whenever the API call cannot be made or fails
pub fn fallback_content(input: &PolishInput) -> String {
    format!(
        "{}{}{}",
        input.content,
        links_section(&input.links),
        files_section(&input.files)
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PolishInput {
        PolishInput {
            content: "Shipped the export flow".to_string(),
            blockers: String::new(),
            plan: "Start on stats".to_string(),
            user_name: "Ada".to_string(),
            shift: WorkHours {
                start: "09:00 AM".to_string(),
                end: "05:30 PM".to_string(),
            },
            breaks: vec![BreakInterval::new("12:00 PM", "12:45 PM")],
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            links: vec!["https://example.com/pr/7".to_string()],
            files: vec![FileMeta {
                name: "screenshot.png".to_string(),
                mime_type: "image/png".to_string(),
            }],
        }
    }

    #[test]
    fn test_fallback_contains_content_links_and_files() {
        let text = fallback_content(&input());
        assert!(text.starts_with("Shipped the export flow"));
        assert!(text.contains("### **Related Links**"));
        assert!(text.contains("* https://example.com/pr/7"));
        assert!(text.contains("### **Attachments**"));
        assert!(text.contains("* screenshot.png"));
    }

    #[test]
    fn test_fallback_omits_empty_sections() {
        let mut bare = input();
        bare.links.clear();
        bare.files.clear();
        assert_eq!(fallback_content(&bare), "Shipped the export flow");
    }

    #[test]
    fn test_ensure_sections_appends_missing_links() {
        let polished = "A refined report.".to_string();
        let out = ensure_sections(polished, &input().links, &input().files);
        assert!(out.contains("https://example.com/pr/7"));
        assert!(out.contains("screenshot.png"));
    }

    #[test]
    fn test_ensure_sections_keeps_present_links_untouched() {
        let polished =
            "A refined report citing https://example.com/pr/7 and screenshot.png.".to_string();
        let out = ensure_sections(polished.clone(), &input().links, &input().files);
        assert_eq!(out, polished);
    }

    #[test]
    fn test_render_break_log() {
        assert_eq!(render_break_log(&[]), "None");
        let breaks = vec![
            BreakInterval::new("12:00 PM", "12:30 PM"),
            BreakInterval::new("03:00 PM", "03:15 PM"),
        ];
        assert_eq!(
            render_break_log(&breaks),
            "12:00 PM – 12:30 PM, 03:00 PM – 03:15 PM"
        );
    }

    #[test]
    fn test_unconfigured_polisher_reports_missing_key() {
        let polisher = GeminiPolisher::new(PolisherConfig::default());
        assert!(!polisher.is_configured());
    }

    #[tokio::test]
    async fn test_polish_without_key_falls_back() {
        let polisher = GeminiPolisher::new(PolisherConfig::default());
        let text = polisher.polish_report(&input()).await;
        assert_eq!(text, fallback_content(&input()));
    }

    #[tokio::test]
    async fn test_summarize_without_key_returns_notice() {
        let polisher = GeminiPolisher::new(PolisherConfig::default());
        let summary = polisher.summarize_team(&[]).await;
        assert_eq!(summary, SUMMARY_UNAVAILABLE);
    }
}
