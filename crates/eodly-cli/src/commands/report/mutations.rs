//! Report mutation commands
//!
//! Compose, trash, and promote operations.

use anyhow::{bail, Context as _, Result};
use eodly_core::{
    fallback_content, GeminiPolisher, PolishInput, PolisherConfig, ReportDraft, TextPolisher,
    View, WorkHours, UNSET_TIME_LABEL,
};

use super::super::helpers::{parse_break, parse_date, parse_file};
use super::types::ReportRow;
use crate::commands::Context;
use crate::output::{print_info, print_single, print_success, print_warning};

#[allow(clippy::too_many_arguments)]
pub async fn add_report(
    ctx: &Context,
    content: String,
    blockers: Option<String>,
    plan: Option<String>,
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    breaks: Vec<String>,
    links: Vec<String>,
    files: Vec<String>,
    draft: bool,
    polish: bool,
) -> Result<()> {
    let directory = ctx.directory();
    ctx.enter(View::Create, &directory)?;
    let user = directory
        .current_user()
        .cloned()
        .context("Session is missing")?;

    let date = date.as_deref().map(parse_date).transpose()?;
    let breaks = breaks
        .iter()
        .map(|s| parse_break(s))
        .collect::<Result<Vec<_>>>()?;
    let files = files
        .iter()
        .map(|s| parse_file(s))
        .collect::<Result<Vec<_>>>()?;

    let mut input = ReportDraft {
        content,
        blockers: blockers.unwrap_or_default(),
        plan_for_tomorrow: plan.unwrap_or_default(),
        date,
        start,
        end,
        breaks,
        links,
        files,
        optimized_summary: String::new(),
    };

    if polish {
        print_info("Polishing report...", ctx.quiet);
        let polisher = GeminiPolisher::new(PolisherConfig::from_env());
        let polish_input = PolishInput {
            content: input.content.clone(),
            blockers: input.blockers.clone(),
            plan: input.plan_for_tomorrow.clone(),
            user_name: user.name.clone(),
            shift: WorkHours {
                start: input
                    .start
                    .clone()
                    .unwrap_or_else(|| UNSET_TIME_LABEL.to_string()),
                end: input
                    .end
                    .clone()
                    .unwrap_or_else(|| UNSET_TIME_LABEL.to_string()),
            },
            breaks: input.breaks.clone(),
            date: input.date.unwrap_or_else(|| chrono::Utc::now().date_naive()),
            links: input.links.clone(),
            files: input.files.clone(),
        };

        let polished = polisher.polish_report(&polish_input).await;
        if polished == fallback_content(&polish_input) {
            // Informational only; never blocks submission
            print_info("AI polish unavailable; keeping the raw content.", ctx.quiet);
        }
        input.optimized_summary = polished;
    }

    let mut journal = ctx.journal();
    if let Some(report) = journal.add_report(Some(&user), input, draft)? {
        print_success(
            if draft { "Draft Saved" } else { "EOD Dispatched!" },
            ctx.quiet,
        );
        if !ctx.quiet {
            print_single(&ReportRow::from(&report), ctx.format)?;
        }
    }

    Ok(())
}

pub async fn trash_report(ctx: &Context, id: String) -> Result<()> {
    let directory = ctx.directory();
    ctx.enter(View::History, &directory)?;
    let user = directory
        .current_user()
        .cloned()
        .context("Session is missing")?;

    let mut journal = ctx.journal();
    let owned = journal
        .get(&id)
        .is_some_and(|r| r.user_id == user.id && !r.is_deleted);
    if !owned {
        bail!("No report {} in your reports", id);
    }

    journal.move_to_trash(&id)?;
    print_success("Report moved to Trash Bin.", ctx.quiet);
    print_warning(
        &format!("Undo with `eodly trash restore {}`", id),
        ctx.quiet,
    );
    Ok(())
}

pub async fn promote_draft(ctx: &Context, id: String) -> Result<()> {
    let directory = ctx.directory();
    ctx.enter(View::Create, &directory)?;
    let user = directory
        .current_user()
        .cloned()
        .context("Session is missing")?;

    let mut journal = ctx.journal();
    let owned = journal
        .get(&id)
        .is_some_and(|r| r.user_id == user.id);
    if !owned {
        bail!("No draft {} in your reports", id);
    }

    match journal.promote(&id)? {
        Some(report) => {
            print_success("EOD Dispatched!", ctx.quiet);
            if !ctx.quiet {
                print_single(&ReportRow::from(&report), ctx.format)?;
            }
            Ok(())
        }
        None => bail!("Report {} is not an unsent draft", id),
    }
}
