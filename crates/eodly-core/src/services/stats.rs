//! Activity statistics over submitted reports

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Report, ReportStatus};

/// Headline counters
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatsOverview {
    pub total: usize,
    pub done: usize,
    pub blocked: usize,
}

/// Per-date completed/blocked tally
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyTally {
    pub date: NaiveDate,
    pub completed: usize,
    pub blocked: usize,
}

pub fn overview(reports: &[&Report]) -> StatsOverview {
    StatsOverview {
        total: reports.len(),
        done: reports
            .iter()
            .filter(|r| r.status == ReportStatus::Done)
            .count(),
        blocked: reports
            .iter()
            .filter(|r| r.status == ReportStatus::Blocked)
            .count(),
    }
}

/// Tallies ordered by date ascending
pub fn daily_tallies(reports: &[&Report]) -> Vec<DailyTally> {
    let mut days: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for r in reports {
        let entry = days.entry(r.date).or_default();
        match r.status {
            ReportStatus::Done => entry.0 += 1,
            ReportStatus::Blocked => entry.1 += 1,
            _ => {}
        }
    }

    days.into_iter()
        .map(|(date, (completed, blocked))| DailyTally {
            date,
            completed,
            blocked,
        })
        .collect()
}
