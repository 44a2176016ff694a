//! # eodly-core
//!
//! Core business logic for EODly - an end-of-day report journal.
//!
//! This crate provides:
//! - Local key-value persistence (`store` module)
//! - Data models (`models` module)
//! - Report lifecycle, directory, export and polisher services (`services` module)
//! - View routing (`view` module)
//! - Unified error handling (`error` module)

pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod view;

// Re-exports for convenience
pub use error::{Error, Result};

// Re-export commonly used types from models
pub use models::{
    BreakInterval, FileMeta, Report, ReportDraft, ReportStatus, Theme, User, WorkHours,
    MBTI_TYPES, UNSET_TIME_LABEL,
};

// Re-export commonly used types from services
pub use services::{
    bundle_document, bundle_filename, compose_url, csv_document, csv_filename, daily_tallies,
    fallback_content, filter_reports, mail_body, overview, set_theme, summary_document,
    summary_filename, theme, DailyTally, ExportFilter, GeminiPolisher, PolishInput,
    PolisherConfig, ReportJournal, StatsOverview, TextPolisher, UserDirectory, DEFAULT_MODEL,
    SUMMARY_UNAVAILABLE, TRASH_RETENTION_MS,
};

// Re-export the store surface
pub use store::{JsonFileStore, MemoryStore, StorageArea, DATA_DIR_ENV};

// Re-export view routing
pub use view::{initial_view, navigate, View};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_version_format() {
        let v = version();
        // Should be semver format: x.y.z
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "Version should be in x.y.z format");
    }
}
