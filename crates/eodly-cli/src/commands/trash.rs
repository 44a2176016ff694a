//! Trash bin commands
//!
//! Soft-deleted reports stay recoverable for 30 days, then the journal purges
//! them at load time. `empty` is the irreversible path.

use anyhow::{bail, Context as _, Result};
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use eodly_core::{Report, View};

use super::helpers::truncate;
use crate::commands::Context;
use crate::output::{print_error, print_info, print_output, print_success};

#[derive(Subcommand)]
pub enum TrashAction {
    /// List your trashed reports
    List,

    /// Restore a trashed report
    Restore {
        /// Report ID
        id: String,
    },

    /// Permanently delete everything in your trash
    Empty {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Trash row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct TrashRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Content")]
    pub content: String,
    #[tabled(rename = "Deleted")]
    pub deleted: String,
}

impl From<&Report> for TrashRow {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.clone(),
            date: report.date.to_string(),
            content: truncate(&report.content, 40),
            deleted: report
                .deleted_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub async fn execute(ctx: &Context, action: TrashAction) -> Result<()> {
    let directory = ctx.directory();
    ctx.enter(View::Trash, &directory)?;
    let user = directory
        .current_user()
        .cloned()
        .context("Session is missing")?;

    let mut journal = ctx.journal();

    match action {
        TrashAction::List => {
            let rows: Vec<TrashRow> = journal
                .trash_reports(&user.id)
                .into_iter()
                .map(TrashRow::from)
                .collect();
            print_output(&rows, ctx.format)?;
            if !rows.is_empty() {
                print_info(
                    "Deleted records stay here for 30 days unless restored.",
                    ctx.quiet,
                );
            }
            Ok(())
        }

        TrashAction::Restore { id } => {
            let owned = journal
                .get(&id)
                .is_some_and(|r| r.user_id == user.id && r.is_deleted);
            if !owned {
                bail!("No report {} in your trash", id);
            }
            journal.restore(&id)?;
            print_success("Report restored successfully.", ctx.quiet);
            Ok(())
        }

        TrashAction::Empty { force } => {
            let count = journal.trash_reports(&user.id).len();
            if count == 0 {
                print_info("Trash is already empty.", ctx.quiet);
                return Ok(());
            }
            if !force {
                print_info(
                    &format!("{} report(s) would be permanently deleted.", count),
                    ctx.quiet,
                );
                print_error("Use --force to confirm. This cannot be undone.");
                return Ok(());
            }
            let removed = journal.empty_trash(&user.id)?;
            print_success(
                &format!("Trash emptied permanently. ({} removed)", removed),
                ctx.quiet,
            );
            Ok(())
        }
    }
}
