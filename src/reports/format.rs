//! Value formatting shared by the text and HTML exports.

use chrono::{DateTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Groups digits in threes with commas: `1234567` becomes `1,234,567`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_date(at: DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub fn tri_state(flag: Option<bool>) -> &'static str {
    match flag {
        Some(flag) => yes_no(flag),
        None => "Unknown",
    }
}

/// Trait bar width in percent. The bar never leaves its track, whatever the score.
pub fn bar_width(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    (score * 10.0).clamp(0.0, 100.0)
}

/// File-system safe form of a handle for export file names.
pub fn file_stem(handle: &str) -> String {
    let stem: String = handle
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "persona".into()
    } else {
        stem
    }
}

pub fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
