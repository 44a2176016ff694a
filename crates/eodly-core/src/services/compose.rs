//! Mail compose deep-link
//!
//! Builds the provider compose URL for sending a report by mail. A navigation
//! side effect only; nothing is posted anywhere.

use chrono::NaiveDate;

use crate::models::Report;

const COMPOSE_BASE: &str = "https://mail.google.com/mail/?view=cm&fs=1&to=";

/// Compose URL with subject `EOD Report | <name> – <date>` and the given body
pub fn compose_url(user_name: &str, date: NaiveDate, body: &str) -> String {
    let subject = format!("EOD Report | {} – {}", user_name, date);
    format!(
        "{}&su={}&body={}",
        COMPOSE_BASE,
        urlencoding::encode(&subject),
        urlencoding::encode(body)
    )
}

/// The mail body for a report: the cached polished text when present,
/// otherwise the raw content
pub fn mail_body(report: &Report) -> &str {
    if report.optimized_summary.is_empty() {
        &report.content
    } else {
        &report.optimized_summary
    }
}
