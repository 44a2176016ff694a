//! Data models for the EODly application

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder label for a shift time the user never set
pub const UNSET_TIME_LABEL: &str = "--:-- --";

/// The 16 recognised MBTI personality-type codes
pub const MBTI_TYPES: [&str; 16] = [
    "INTJ", "INTP", "ENTJ", "ENTP", "INFJ", "INFP", "ENFJ", "ENFP", "ISTJ", "ISFJ", "ESTJ",
    "ESFJ", "ISTP", "ISFP", "ESTP", "ESFP",
];

/// Report status enum
///
/// Only `Done` is ever assigned by the creation path; the richer variants are
/// modeled for records produced elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Done,
    Pending,
    Blocked,
    InProgress,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Done => "DONE",
            ReportStatus::Pending => "PENDING",
            ReportStatus::Blocked => "BLOCKED",
            ReportStatus::InProgress => "IN_PROGRESS",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "PENDING" => ReportStatus::Pending,
            "BLOCKED" => ReportStatus::Blocked,
            "IN_PROGRESS" => ReportStatus::InProgress,
            _ => ReportStatus::Done,
        }
    }
}

/// A single break taken during a shift, as time labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakInterval {
    pub id: String,
    pub start: String,
    pub end: String,
}

impl BreakInterval {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Attached file metadata (no binary content is ever persisted)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Shift start/end as time labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHours {
    pub start: String,
    pub end: String,
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            start: UNSET_TIME_LABEL.to_string(),
            end: UNSET_TIME_LABEL.to_string(),
        }
    }
}

/// User model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mbti: Option<String>,
    pub email: String,
}

impl User {
    /// Generated avatar URL used when a user has no explicit avatar
    pub fn default_avatar(name: &str) -> String {
        format!(
            "https://ui-avatars.com/api/?name={}&background=001d3d&color=fff",
            urlencoding::encode(name)
        )
    }
}

/// EOD report model
///
/// Persisted as camelCase JSON; owner display fields are denormalized at
/// creation time and never re-synced with the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_mbti: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub status: ReportStatus,
    pub content: String,
    #[serde(default)]
    pub blockers: String,
    #[serde(default)]
    pub plan_for_tomorrow: String,
    #[serde(default)]
    pub breaks: Vec<BreakInterval>,
    #[serde(default)]
    pub files: Vec<FileMeta>,
    #[serde(default)]
    pub links: Vec<String>,
    pub department: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub work_hours: WorkHours,
    #[serde(default)]
    pub optimized_summary: String,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Form input for a new report
///
/// The exhaustively-typed boundary struct: unset fields default to blank
/// strings and empty lists here, before they ever reach the journal.
#[derive(Debug, Clone, Default)]
pub struct ReportDraft {
    pub content: String,
    pub blockers: String,
    pub plan_for_tomorrow: String,
    pub date: Option<NaiveDate>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub breaks: Vec<BreakInterval>,
    pub links: Vec<String>,
    pub files: Vec<FileMeta>,
    pub optimized_summary: String,
}

/// Theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_status_as_str() {
        assert_eq!(ReportStatus::Done.as_str(), "DONE");
        assert_eq!(ReportStatus::Pending.as_str(), "PENDING");
        assert_eq!(ReportStatus::Blocked.as_str(), "BLOCKED");
        assert_eq!(ReportStatus::InProgress.as_str(), "IN_PROGRESS");
    }

    #[test]
    fn test_report_status_from_str_unknown_defaults_to_done() {
        assert_eq!(ReportStatus::from_str("unknown"), ReportStatus::Done);
        assert_eq!(ReportStatus::from_str(""), ReportStatus::Done);
        assert_eq!(ReportStatus::from_str("done"), ReportStatus::Done); // Case sensitive
    }

    #[test]
    fn test_report_status_roundtrip() {
        let statuses = [
            ReportStatus::Done,
            ReportStatus::Pending,
            ReportStatus::Blocked,
            ReportStatus::InProgress,
        ];
        for status in statuses {
            assert_eq!(ReportStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn test_report_status_serialization() {
        let json = serde_json::to_string(&ReportStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");

        let back: ReportStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ReportStatus::InProgress);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = Report {
            id: "r-1700000000000".to_string(),
            user_id: "u-1".to_string(),
            user_name: "Ada".to_string(),
            user_avatar: String::new(),
            user_mbti: Some("INTJ".to_string()),
            timestamp: Utc::now(),
            status: ReportStatus::Done,
            content: "Shipped X".to_string(),
            blockers: String::new(),
            plan_for_tomorrow: "Ship Y".to_string(),
            breaks: vec![],
            files: vec![],
            links: vec![],
            department: "Engineering".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            work_hours: WorkHours::default(),
            optimized_summary: String::new(),
            is_draft: false,
            is_deleted: false,
            deleted_at: None,
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"userId\":\"u-1\""));
        assert!(json.contains("\"planForTomorrow\""));
        assert!(json.contains("\"isDraft\":false"));
        assert!(json.contains("\"workHours\""));
        assert!(json.contains("\"status\":\"DONE\""));
        // Cleared soft-delete timestamps are omitted entirely
        assert!(!json.contains("deletedAt"));
    }

    #[test]
    fn test_report_tolerates_missing_optional_fields() {
        // A record written by an older version: no breaks/files/links/flags
        let json = r#"{
            "id": "r-1",
            "userId": "u-1",
            "userName": "Ada",
            "userAvatar": "",
            "timestamp": "2024-01-01T18:00:00Z",
            "status": "DONE",
            "content": "Shipped X",
            "department": "Engineering",
            "date": "2024-01-01"
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();
        assert!(report.breaks.is_empty());
        assert!(report.links.is_empty());
        assert!(!report.is_draft);
        assert!(!report.is_deleted);
        assert!(report.deleted_at.is_none());
        assert_eq!(report.work_hours.start, UNSET_TIME_LABEL);
    }

    #[test]
    fn test_file_meta_uses_type_key() {
        let file = FileMeta {
            name: "notes.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
        };
        let json = serde_json::to_string(&file).unwrap();
        assert!(json.contains("\"type\":\"application/pdf\""));
    }

    #[test]
    fn test_break_interval_new_assigns_id() {
        let a = BreakInterval::new("12:00 PM", "12:30 PM");
        let b = BreakInterval::new("12:00 PM", "12:30 PM");
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_default_avatar_encodes_name() {
        let url = User::default_avatar("Grace Hopper");
        assert!(url.contains("name=Grace%20Hopper"));
        assert!(url.starts_with("https://ui-avatars.com/api/"));
    }

    #[test]
    fn test_theme_roundtrip() {
        assert_eq!(Theme::from_str("dark"), Theme::Dark);
        assert_eq!(Theme::from_str("light"), Theme::Light);
        assert_eq!(Theme::from_str("anything-else"), Theme::Light);
        assert_eq!(Theme::Dark.as_str(), "dark");
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
