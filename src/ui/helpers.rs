//! Helper functions and constants for UI rendering
//!
//! Contains formatting, truncation, and common layout utilities.

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::booking::{parse_date, parse_time, MAX_RATING};

/// Spinner frames for loading animation
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner frame for the given tick. Advances every other tick.
pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[((tick / 2) % SPINNER_FRAMES.len() as u64) as usize]
}

/// Short date, e.g. "Tue, Mar 4, 2025". Unparseable input is returned as is.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%a, %b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Long date, e.g. "Tuesday, March 4, 2025".
pub fn format_long_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%A, %B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// 12-hour time, e.g. "9:30 AM".
pub fn format_time(raw: &str) -> String {
    match parse_time(raw) {
        Some(time) => time.format("%-I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

/// "9:00 AM - 9:30 AM", or just the start when there is no end.
pub fn format_time_range(start: &str, end: &str) -> String {
    if end.is_empty() {
        format_time(start)
    } else {
        format!("{} - {}", format_time(start), format_time(end))
    }
}

/// Filled and empty stars for `rating` out of the maximum.
pub fn star_line(rating: u8) -> String {
    let filled = rating.min(MAX_RATING) as usize;
    let empty = MAX_RATING as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

/// "12 years experience", dropping a zero fraction.
pub fn experience_text(years: Option<f64>) -> Option<String> {
    let years = years.filter(|y| y.is_finite() && *y >= 0.0)?;
    let shown = if years.fract() == 0.0 {
        format!("{}", years as u64)
    } else {
        format!("{:.1}", years)
    };
    let unit = if years == 1.0 { "year" } else { "years" };
    Some(format!("{} {} experience", shown, unit))
}

/// Truncate to at most `max_width` display columns, ending in "…" when cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Get inner rect with margin
pub fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}
