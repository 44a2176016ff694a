//! Export commands
//!
//! Derived documents over submitted reports, written to disk, plus the mail
//! compose deep-link.

use anyhow::{bail, Context as _, Result};
use clap::Subcommand;

use eodly_core::{
    bundle_document, bundle_filename, compose_url, csv_document, csv_filename, filter_reports,
    mail_body, summary_document, summary_filename, ExportFilter, UserDirectory, View,
};

use super::helpers::parse_date;
use crate::commands::Context;
use crate::output::print_success;

#[derive(Subcommand)]
pub enum ExportAction {
    /// Export a CSV sheet (UTF-8 with BOM)
    Csv {
        #[command(flatten)]
        selection: Selection,
    },

    /// Export the printable report bundle (HTML)
    Bundle {
        #[command(flatten)]
        selection: Selection,
    },

    /// Export the shareable team summary (HTML)
    Summary {
        #[command(flatten)]
        selection: Selection,
    },

    /// Print a mail compose link for one of your reports
    Mail {
        /// Report ID
        id: String,
    },
}

/// Date-or-range plus optional member selection, shared by all formats
#[derive(Debug, clap::Args)]
pub struct Selection {
    /// Single report date (YYYY-MM-DD), defaults to today
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    date: Option<String>,

    /// Range start (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    start: Option<String>,

    /// Range end (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    end: Option<String>,

    /// Restrict to one member, by email or user ID
    #[arg(short, long)]
    user: Option<String>,

    /// Output path, defaults to the standard filename in the current directory
    #[arg(short, long)]
    out: Option<String>,
}

impl Selection {
    fn filter(&self, directory: &UserDirectory) -> Result<ExportFilter> {
        let user_id = match self.user.as_deref() {
            None | Some("all") => None,
            Some(key) => {
                let user = directory
                    .users()
                    .iter()
                    .find(|u| u.email == key || u.id == key)
                    .with_context(|| format!("Unknown member: {}", key))?;
                Some(user.id.clone())
            }
        };

        match (&self.date, &self.start, &self.end) {
            (Some(date), _, _) => Ok(ExportFilter::single(parse_date(date)?, user_id)),
            (None, Some(start), Some(end)) => Ok(ExportFilter::range(
                parse_date(start)?,
                parse_date(end)?,
                user_id,
            )),
            _ => Ok(ExportFilter::single(
                chrono::Local::now().date_naive(),
                user_id,
            )),
        }
    }
}

enum Format {
    Csv,
    Bundle,
    Summary,
}

fn run_export(ctx: &Context, selection: Selection, format: Format) -> Result<()> {
    let directory = ctx.directory();
    ctx.enter(View::Export, &directory)?;

    let filter = selection.filter(&directory)?;
    let journal = ctx.journal();
    let submitted = journal.submitted();
    let selected = filter_reports(&submitted, &filter);

    if selected.is_empty() {
        bail!("No submitted EOD records found for the selected date(s).");
    }

    let today = chrono::Local::now().date_naive();
    let (document, filename) = match format {
        Format::Csv => (csv_document(&selected), csv_filename(&filter)),
        Format::Bundle => (
            bundle_document(&selected, &filter, today),
            bundle_filename(&filter),
        ),
        Format::Summary => (
            summary_document(&selected, today),
            summary_filename(&filter),
        ),
    };

    let path = selection.out.unwrap_or(filename);
    std::fs::write(&path, document)
        .with_context(|| format!("Failed to write export to {}", path))?;

    print_success(
        &format!("Exported {} record(s) to {}", selected.len(), path),
        ctx.quiet,
    );
    Ok(())
}

pub async fn execute(ctx: &Context, action: ExportAction) -> Result<()> {
    match action {
        ExportAction::Csv { selection } => run_export(ctx, selection, Format::Csv),
        ExportAction::Bundle { selection } => run_export(ctx, selection, Format::Bundle),
        ExportAction::Summary { selection } => run_export(ctx, selection, Format::Summary),
        ExportAction::Mail { id } => {
            let directory = ctx.directory();
            ctx.enter(View::Export, &directory)?;
            let user = directory
                .current_user()
                .context("Session is missing")?;

            let journal = ctx.journal();
            let Some(report) = journal.get(&id).filter(|r| r.user_id == user.id) else {
                bail!("No report {} in your reports", id);
            };

            // Bare URL on stdout
            println!(
                "{}",
                compose_url(&report.user_name, report.date, mail_body(report))
            );
            Ok(())
        }
    }
}
