//! Report query commands

use anyhow::{bail, Context as _, Result};
use eodly_core::View;

use super::types::{DraftRow, ReportRow};
use crate::commands::Context;
use crate::output::{print_info, print_output, print_single};

pub async fn list_history(ctx: &Context, query: Option<String>) -> Result<()> {
    let directory = ctx.directory();
    ctx.enter(View::History, &directory)?;
    let user = directory
        .current_user()
        .context("Session is missing")?;

    let journal = ctx.journal();
    let rows: Vec<ReportRow> = journal
        .history(&user.id, query.as_deref())
        .into_iter()
        .map(ReportRow::from)
        .collect();

    print_output(&rows, ctx.format)
}

pub async fn list_drafts(ctx: &Context) -> Result<()> {
    let directory = ctx.directory();
    ctx.enter(View::Create, &directory)?;
    let user = directory
        .current_user()
        .context("Session is missing")?;

    let journal = ctx.journal();
    let rows: Vec<DraftRow> = journal
        .drafts(&user.id)
        .into_iter()
        .map(DraftRow::from)
        .collect();

    print_output(&rows, ctx.format)
}

pub async fn show_report(ctx: &Context, id: String) -> Result<()> {
    let directory = ctx.directory();
    ctx.enter(View::History, &directory)?;
    let user = directory
        .current_user()
        .context("Session is missing")?;

    let journal = ctx.journal();
    let Some(report) = journal.get(&id).filter(|r| r.user_id == user.id) else {
        bail!("No report {} in your reports", id);
    };

    print_single(&ReportRow::from(report), ctx.format)?;

    if !ctx.quiet {
        print_info(
            &format!(
                "Shift: {} - {}",
                report.work_hours.start, report.work_hours.end
            ),
            ctx.quiet,
        );
        if !report.breaks.is_empty() {
            let log: Vec<String> = report
                .breaks
                .iter()
                .map(|b| format!("{}-{}", b.start, b.end))
                .collect();
            print_info(&format!("Breaks: {}", log.join(", ")), ctx.quiet);
        }
        if !report.plan_for_tomorrow.is_empty() {
            print_info(&format!("Plan: {}", report.plan_for_tomorrow), ctx.quiet);
        }
        if !report.links.is_empty() {
            print_info(&format!("Links: {}", report.links.join(", ")), ctx.quiet);
        }
        if !report.files.is_empty() {
            let names: Vec<&str> = report.files.iter().map(|f| f.name.as_str()).collect();
            print_info(&format!("Files: {}", names.join(", ")), ctx.quiet);
        }
        if !report.optimized_summary.is_empty() {
            print_info("", ctx.quiet);
            print_info(&report.optimized_summary, ctx.quiet);
        }
    }

    Ok(())
}
