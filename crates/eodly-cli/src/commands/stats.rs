//! Stats commands
//!
//! Activity counters over the whole team's submitted reports, plus an
//! optional AI digest of a single day.

use anyhow::{Context as _, Result};
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use eodly_core::{
    daily_tallies, filter_reports, overview, ExportFilter, GeminiPolisher, PolisherConfig,
    TextPolisher, View,
};

use super::helpers::parse_date;
use crate::commands::Context;
use crate::output::{print_info, print_output, print_single};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Headline counters
    Overview,

    /// Per-date completed/blocked tallies
    Daily,

    /// AI-generated executive summary of one day's reports
    Digest {
        /// Day to summarize (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Overview row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct OverviewRow {
    #[tabled(rename = "Total Logs")]
    pub total: usize,
    #[tabled(rename = "Done")]
    pub done: usize,
    #[tabled(rename = "Blocked")]
    pub blocked: usize,
}

/// Daily tally row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct DailyRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Completed")]
    pub completed: usize,
    #[tabled(rename = "Blocked")]
    pub blocked: usize,
}

pub async fn execute(ctx: &Context, action: StatsAction) -> Result<()> {
    let directory = ctx.directory();
    ctx.enter(View::Stats, &directory)?;

    let journal = ctx.journal();
    let submitted = journal.submitted();

    match action {
        StatsAction::Overview => {
            let stats = overview(&submitted);
            print_single(
                &OverviewRow {
                    total: stats.total,
                    done: stats.done,
                    blocked: stats.blocked,
                },
                ctx.format,
            )
        }

        StatsAction::Daily => {
            let rows: Vec<DailyRow> = daily_tallies(&submitted)
                .into_iter()
                .map(|t| DailyRow {
                    date: t.date.to_string(),
                    completed: t.completed,
                    blocked: t.blocked,
                })
                .collect();
            print_output(&rows, ctx.format)
        }

        StatsAction::Digest { date } => {
            let day = match date.as_deref() {
                Some(d) => parse_date(d)?,
                None => chrono::Local::now().date_naive(),
            };
            let filter = ExportFilter::single(day, None);
            let selected = filter_reports(&submitted, &filter);
            if selected.is_empty() {
                print_info(&format!("No submitted reports for {}.", day), ctx.quiet);
                return Ok(());
            }

            let polisher = GeminiPolisher::new(PolisherConfig::from_env());
            let summary = polisher.summarize_team(&selected).await;
            println!("{}", summary);
            Ok(())
        }
    }
}
