//! Shared command helpers

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use eodly_core::{BreakInterval, FileMeta};

/// Truncate a string for table display
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date: {}. Use YYYY-MM-DD", s))
}

/// Parse a break argument of the form `START-END`, e.g. `12:00-12:30`
pub fn parse_break(s: &str) -> Result<BreakInterval> {
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| anyhow!("Invalid break: {}. Use START-END, e.g. 12:00-12:30", s))?;
    if start.trim().is_empty() || end.trim().is_empty() {
        return Err(anyhow!("Invalid break: {}. Use START-END, e.g. 12:00-12:30", s));
    }
    Ok(BreakInterval::new(start.trim(), end.trim()))
}

/// Parse a file argument of the form `NAME` or `NAME:MIME`
pub fn parse_file(s: &str) -> Result<FileMeta> {
    let (name, mime) = match s.split_once(':') {
        Some((name, mime)) => (name, mime),
        None => (s, "application/octet-stream"),
    };
    if name.trim().is_empty() {
        return Err(anyhow!("Invalid file: {}. Use NAME or NAME:MIME", s));
    }
    Ok(FileMeta {
        name: name.trim().to_string(),
        mime_type: mime.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer sentence", 10), "a much ...");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(parse_date("15/01/2024").is_err());
    }

    #[test]
    fn test_parse_break() {
        let b = parse_break("12:00-12:30").unwrap();
        assert_eq!(b.start, "12:00");
        assert_eq!(b.end, "12:30");
        assert!(parse_break("12:00").is_err());
        assert!(parse_break("-12:30").is_err());
    }

    #[test]
    fn test_parse_file() {
        let f = parse_file("notes.pdf:application/pdf").unwrap();
        assert_eq!(f.name, "notes.pdf");
        assert_eq!(f.mime_type, "application/pdf");

        let bare = parse_file("photo.png").unwrap();
        assert_eq!(bare.name, "photo.png");
        assert_eq!(bare.mime_type, "application/octet-stream");
    }
}
