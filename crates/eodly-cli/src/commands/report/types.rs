//! Report command types

use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use eodly_core::Report;

use super::super::helpers::truncate;

#[derive(Subcommand)]
pub enum ReportAction {
    /// Compose and dispatch a report (or save it as a draft)
    Add {
        /// What was accomplished
        #[arg(short, long)]
        content: String,

        /// Current blockers
        #[arg(short, long)]
        blockers: Option<String>,

        /// Plan for tomorrow
        #[arg(short, long)]
        plan: Option<String>,

        /// Report date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Shift start label, e.g. "09:00 AM"
        #[arg(long)]
        start: Option<String>,

        /// Shift end label, e.g. "05:30 PM"
        #[arg(long)]
        end: Option<String>,

        /// Break interval START-END, repeatable
        #[arg(long = "break", value_name = "START-END")]
        breaks: Vec<String>,

        /// Related link, repeatable
        #[arg(short, long = "link", value_name = "URL")]
        links: Vec<String>,

        /// Attachment metadata NAME or NAME:MIME, repeatable
        #[arg(short, long = "file", value_name = "NAME[:MIME]")]
        files: Vec<String>,

        /// Save as a draft instead of dispatching
        #[arg(long)]
        draft: bool,

        /// Polish the report via the external text service
        #[arg(long)]
        polish: bool,
    },

    /// List your submitted reports, optionally filtered
    List {
        /// Case-insensitive match against date, content, or blockers
        #[arg(long)]
        query: Option<String>,
    },

    /// List your unsent drafts
    Drafts,

    /// Show one of your reports in full
    Show {
        /// Report ID
        id: String,
    },

    /// Dispatch a draft as a fresh report
    Promote {
        /// Draft ID
        id: String,
    },

    /// Move one of your reports to the trash bin
    Trash {
        /// Report ID
        id: String,
    },
}

/// Report row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct ReportRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Achievements")]
    pub content: String,
    #[tabled(rename = "Blockers")]
    pub blockers: String,
}

impl From<&Report> for ReportRow {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.clone(),
            date: report.date.to_string(),
            status: report.status.as_str().to_string(),
            content: truncate(&report.content, 40),
            blockers: truncate(&report.blockers, 24),
        }
    }
}

/// Draft row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct DraftRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Content")]
    pub content: String,
    #[tabled(rename = "Saved")]
    pub saved: String,
}

impl From<&Report> for DraftRow {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.clone(),
            date: report.date.to_string(),
            content: truncate(&report.content, 40),
            saved: report.timestamp.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}
