//! Business logic services
//!
//! Report lifecycle, session/user directory, export rendering, the text
//! polisher, and the small preference/compose helpers.

pub mod compose;
pub mod directory;
pub mod export;
pub mod journal;
pub mod polisher;
pub mod prefs;
pub mod stats;

pub use compose::{compose_url, mail_body};
pub use directory::UserDirectory;
pub use export::{
    bundle_document, bundle_filename, csv_document, csv_filename, filter_reports,
    summary_document, summary_filename, ExportFilter,
};
pub use journal::{ReportJournal, TRASH_RETENTION_MS};
pub use polisher::{
    fallback_content, GeminiPolisher, PolishInput, PolisherConfig, TextPolisher, DEFAULT_MODEL,
    SUMMARY_UNAVAILABLE,
};
pub use prefs::{set_theme, theme};
pub use stats::{daily_tallies, overview, DailyTally, StatsOverview};
