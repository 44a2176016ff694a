//! Report commands
//!
//! Compose, browse, trash, and promote reports.

mod mutations;
mod queries;
mod types;

use anyhow::Result;

use crate::commands::Context;

// Re-export public types
pub use types::{DraftRow, ReportAction, ReportRow};

pub async fn execute(ctx: &Context, action: ReportAction) -> Result<()> {
    match action {
        ReportAction::Add {
            content,
            blockers,
            plan,
            date,
            start,
            end,
            breaks,
            links,
            files,
            draft,
            polish,
        } => {
            mutations::add_report(
                ctx, content, blockers, plan, date, start, end, breaks, links, files, draft,
                polish,
            )
            .await
        }
        ReportAction::List { query } => queries::list_history(ctx, query).await,
        ReportAction::Drafts => queries::list_drafts(ctx).await,
        ReportAction::Show { id } => queries::show_report(ctx, id).await,
        ReportAction::Promote { id } => mutations::promote_draft(ctx, id).await,
        ReportAction::Trash { id } => mutations::trash_report(ctx, id).await,
    }
}
