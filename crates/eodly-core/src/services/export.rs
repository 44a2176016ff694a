//! Export rendering
//!
//! Derived, read-only documents over the submitted reports: a CSV sheet, a
//! printable report bundle, and a shareable team summary. Selection is a
//! single date or an inclusive range, optionally narrowed to one member.

use chrono::NaiveDate;

use crate::models::Report;

/// Report selection for an export run
#[derive(Debug, Clone)]
pub struct ExportFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub user_id: Option<String>,
}

impl ExportFilter {
    /// Select a single day
    pub fn single(date: NaiveDate, user_id: Option<String>) -> Self {
        Self {
            start: date,
            end: date,
            user_id,
        }
    }

    /// Select an inclusive range; endpoints are reordered if reversed
    pub fn range(start: NaiveDate, end: NaiveDate, user_id: Option<String>) -> Self {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        Self {
            start,
            end,
            user_id,
        }
    }

    /// Label used in export filenames: `<start>` or `<start>_to_<end>`
    pub fn label(&self) -> String {
        if self.start == self.end {
            self.start.to_string()
        } else {
            format!("{}_to_{}", self.start, self.end)
        }
    }

    pub fn matches(&self, report: &Report) -> bool {
        if report.is_draft || report.is_deleted {
            return false;
        }
        if let Some(user_id) = &self.user_id {
            if &report.user_id != user_id {
                return false;
            }
        }
        report.date >= self.start && report.date <= self.end
    }
}

/// Apply the filter over a submitted-report slice
pub fn filter_reports<'a>(reports: &[&'a Report], filter: &ExportFilter) -> Vec<&'a Report> {
    reports
        .iter()
        .filter(|r| filter.matches(r))
        .copied()
        .collect()
}

pub fn csv_filename(filter: &ExportFilter) -> String {
    format!("EODly_Report_{}.csv", filter.label())
}

pub fn bundle_filename(filter: &ExportFilter) -> String {
    format!("EODly_PDF_Report_{}.html", filter.label())
}

pub fn summary_filename(filter: &ExportFilter) -> String {
    format!("EODly_GoogleDoc_{}.html", filter.label())
}

// ============================================================================
// CSV
// ============================================================================

const CSV_HEADERS: [&str; 11] = [
    "Date",
    "Member",
    "MBTI",
    "Shift Start",
    "Shift End",
    "Break Log",
    "Achievements",
    "Blockers",
    "Plan for Tomorrow",
    "Links",
    "Files",
];

/// Double-quote a field, doubling embedded quotes
fn escape_csv_field(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Render the CSV document, UTF-8 BOM included
pub fn csv_document(reports: &[&Report]) -> String {
    let mut rows = vec![CSV_HEADERS.join(",")];

    for r in reports {
        let break_log = if r.breaks.is_empty() {
            "None".to_string()
        } else {
            r.breaks
                .iter()
                .map(|b| format!("{}-{}", b.start, b.end))
                .collect::<Vec<_>>()
                .join(" | ")
        };
        let links = if r.links.is_empty() {
            "None".to_string()
        } else {
            r.links.join(" | ")
        };
        let files = if r.files.is_empty() {
            "None".to_string()
        } else {
            r.files
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(" | ")
        };

        rows.push(
            [
                r.date.to_string(),
                escape_csv_field(&r.user_name),
                r.user_mbti.clone().unwrap_or_else(|| "N/A".to_string()),
                r.work_hours.start.clone(),
                r.work_hours.end.clone(),
                escape_csv_field(&break_log),
                escape_csv_field(&r.content),
                escape_csv_field(&r.blockers),
                escape_csv_field(&r.plan_for_tomorrow),
                escape_csv_field(&links),
                escape_csv_field(&files),
            ]
            .join(","),
        );
    }

    // UTF-8 BOM for Excel compatibility
    format!("\u{feff}{}", rows.join("\n"))
}

// ============================================================================
// HTML
// ============================================================================

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Links entered without a scheme are treated as https
fn ensure_scheme(link: &str) -> String {
    if link.starts_with("http") {
        link.to_string()
    } else {
        format!("https://{}", link)
    }
}

fn mbti_label(report: &Report) -> String {
    report.user_mbti.clone().unwrap_or_else(|| "N/A".to_string())
}

/// Render the printable report bundle
pub fn bundle_document(
    reports: &[&Report],
    filter: &ExportFilter,
    exported_on: NaiveDate,
) -> String {
    let period = if filter.start == filter.end {
        filter.start.to_string()
    } else {
        format!("{} to {}", filter.start, filter.end)
    };

    let mut cards = String::new();
    for r in reports {
        cards.push_str(&format!(
            r#"<div class="report-card">
  <div class="meta-row">
    <span class="pill">{date}</span>
    <span class="pill">{member}</span>
    <span class="pill">MBTI: {mbti}</span>
    <span class="pill">Shift: {start} - {end}</span>
  </div>
  <div class="section-title">Key Accomplishments</div>
  <div class="content">{content}</div>
"#,
            date = r.date,
            member = escape_html(&r.user_name),
            mbti = escape_html(&mbti_label(r)),
            start = escape_html(&r.work_hours.start),
            end = escape_html(&r.work_hours.end),
            content = escape_html(&r.content),
        ));

        if !r.blockers.is_empty() {
            cards.push_str(&format!(
                "  <div class=\"section-title blockers\">Current Blockers</div>\n  <div class=\"content blockers\">{}</div>\n",
                escape_html(&r.blockers)
            ));
        }
        if !r.plan_for_tomorrow.is_empty() {
            cards.push_str(&format!(
                "  <div class=\"section-title plan\">Plan for Tomorrow</div>\n  <div class=\"content plan\">{}</div>\n",
                escape_html(&r.plan_for_tomorrow)
            ));
        }

        let links: Vec<&String> = r.links.iter().filter(|l| !l.trim().is_empty()).collect();
        if !links.is_empty() {
            let anchors: Vec<String> = links
                .iter()
                .map(|l| {
                    format!(
                        "<a href=\"{}\">{}</a>",
                        escape_html(&ensure_scheme(l)),
                        escape_html(l)
                    )
                })
                .collect();
            cards.push_str(&format!(
                "  <div class=\"section-title\">Reference Links</div>\n  <div class=\"content\">{}</div>\n",
                anchors.join("<br/>")
            ));
        }
        if !r.files.is_empty() {
            let names: Vec<String> = r.files.iter().map(|f| escape_html(&f.name)).collect();
            cards.push_str(&format!(
                "  <div class=\"section-title\">Attachments</div>\n  <div class=\"content\">{}</div>\n",
                names.join(", ")
            ));
        }
        cards.push_str("</div>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="UTF-8">
    <title>EODly Export - {period}</title>
    <style>
      body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; padding: 40px; color: #1a202c; line-height: 1.5; background: #f8fafc; }}
      .container {{ max-width: 900px; margin: 0 auto; background: white; padding: 50px; border-radius: 30px; }}
      .header {{ border-bottom: 4px solid #001d3d; padding-bottom: 20px; margin-bottom: 40px; display: flex; justify-content: space-between; align-items: flex-end; }}
      .header h2 {{ margin: 0; color: #001d3d; font-size: 32px; font-weight: 900; }}
      .header .range {{ font-weight: 800; font-size: 14px; color: #5e888d; text-transform: uppercase; }}
      .report-card {{ border: 1px solid #e2e8f0; border-radius: 20px; padding: 30px; margin-bottom: 30px; background: #ffffff; }}
      .meta-row {{ display: flex; gap: 10px; margin-bottom: 20px; flex-wrap: wrap; }}
      .pill {{ background: #f1f5f9; color: #001d3d; padding: 6px 14px; border-radius: 99px; font-size: 11px; font-weight: 800; text-transform: uppercase; border: 1px solid #e2e8f0; }}
      .section-title {{ font-size: 10px; font-weight: 900; color: #94a3b8; text-transform: uppercase; letter-spacing: 1.5px; margin: 20px 0 8px 0; }}
      .section-title.blockers {{ color: #ef4444; }}
      .section-title.plan {{ color: #10b981; }}
      .content {{ font-size: 14px; color: #334155; white-space: pre-wrap; background: #fcfcfc; padding: 15px; border-radius: 12px; border: 1px solid #f1f5f9; }}
      .content.blockers {{ color: #b91c1c; background: #fff5f5; }}
      .content.plan {{ color: #065f46; background: #f0fdf4; }}
      .footer {{ text-align: center; color: #94a3b8; font-size: 10px; font-weight: 800; margin-top: 50px; text-transform: uppercase; letter-spacing: 2px; }}
      @media print {{
        body {{ background: white; padding: 0; }}
        .container {{ border-radius: 0; padding: 0; }}
        .report-card {{ page-break-inside: avoid; border: 1px solid #eee; }}
      }}
    </style>
  </head>
  <body>
    <div class="container">
      <div class="header">
        <h2>EODly Export</h2>
        <div class="range">Period: {period}</div>
      </div>
{cards}      <div class="footer">Generated by EODly Dashboard &bull; {exported_on}</div>
    </div>
  </body>
</html>
"#,
        period = period,
        cards = cards,
        exported_on = exported_on,
    )
}

/// Render the shareable team summary document
pub fn summary_document(reports: &[&Report], exported_on: NaiveDate) -> String {
    let mut blocks = String::new();
    for r in reports {
        blocks.push_str(&format!(
            r#"<div style="margin-bottom: 40px; border: 1px solid #eee; padding: 25px; border-radius: 12px; background: #fafafa;">
<h2 style="color: #001d3d; margin-top: 0;">{member} ({mbti})</h2>
<p><strong>Date:</strong> {date} | <strong>Shift:</strong> {start} - {end}</p>
<h3 style="border-left: 4px solid #001d3d; padding-left: 10px;">Achievements</h3><p>{content}</p>
"#,
            member = escape_html(&r.user_name),
            mbti = escape_html(&mbti_label(r)),
            date = r.date,
            start = escape_html(&r.work_hours.start),
            end = escape_html(&r.work_hours.end),
            content = escape_html(&r.content),
        ));

        if !r.blockers.is_empty() {
            blocks.push_str(&format!(
                "<h3 style=\"border-left: 4px solid #ef4444; padding-left: 10px; color: #ef4444;\">Blockers</h3><p>{}</p>\n",
                escape_html(&r.blockers)
            ));
        }
        if !r.plan_for_tomorrow.is_empty() {
            blocks.push_str(&format!(
                "<h3 style=\"border-left: 4px solid #10b981; padding-left: 10px; color: #10b981;\">Plan for Tomorrow</h3><p>{}</p>\n",
                escape_html(&r.plan_for_tomorrow)
            ));
        }
        if !r.links.is_empty() {
            let anchors: Vec<String> = r
                .links
                .iter()
                .map(|l| {
                    format!(
                        "<a href=\"{}\">{}</a>",
                        escape_html(&ensure_scheme(l)),
                        escape_html(l)
                    )
                })
                .collect();
            blocks.push_str(&format!("<h3>Links</h3><p>{}</p>\n", anchors.join("<br/>")));
        }
        if !r.files.is_empty() {
            let names: Vec<String> = r.files.iter().map(|f| escape_html(&f.name)).collect();
            blocks.push_str(&format!(
                "<h3>Attachments</h3><p>{}</p>\n",
                names.join(", ")
            ));
        }
        blocks.push_str("</div>\n");
    }

    format!(
        r#"<html><body style="font-family: Arial, sans-serif; padding: 40px; line-height: 1.6; max-width: 800px; margin: 0 auto;">
<h1 style="color: #001d3d; text-align: center; border-bottom: 2px solid #001d3d; padding-bottom: 10px;">EODly Team Summary</h1>
<p style="text-align: right; color: #666;"><strong>Export Date:</strong> {exported_on}</p>
{blocks}</body></html>
"#,
        exported_on = exported_on,
        blocks = blocks,
    )
}

// ============================================================================
// Tests
// ============================================================================
