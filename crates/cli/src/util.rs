//! Shared formatting helpers for CLI commands

use chrono::{DateTime, NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Spinner on stderr while a request is in flight
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Whole-dollar amount with thousands separators ("$45,000")
pub fn format_currency(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("${}", out)
}

/// Price with cents ("$549.00")
pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

/// Calendar date ("Jan 15, 2024")
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Timestamp without the year ("Jan 15, 2:30 PM")
pub fn format_date_time(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %-I:%M %p").to_string()
}

/// Cut `text` to at most `max` characters, marking the cut with "…"
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", keep)
}

/// Red boxed error message, as printed on command failure
pub fn error_panel(message: &str) -> String {
    let width = message.lines().map(|l| l.chars().count()).max().unwrap_or(0) + 2;
    let mut out = String::new();
    out.push_str(&format!("┌{}┐\n", "─".repeat(width)));
    for line in message.lines() {
        let pad = width - 1 - line.chars().count();
        out.push_str(&format!("│ {}{}│\n", line, " ".repeat(pad)));
    }
    out.push_str(&format!("└{}┘", "─".repeat(width)));
    out.red().to_string()
}
