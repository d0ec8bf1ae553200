//! Report formatting utilities for terminal output
//!
//! Shared helpers for the analysis and settlement reports. Widths are counted
//! in characters so participant names outside ASCII line up.

use crate::models::Amount;

/// Format a balance with color hints: green for surplus, red for deficit
pub fn format_balance_colored(amount: Amount) -> String {
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", amount)
    } else if amount.is_positive() {
        format!("\x1b[32m+{}\x1b[0m", amount)
    } else {
        amount.to_string()
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Format a share of a total (`0.0..=1.0`); no share renders as "-"
pub fn format_share(share: Option<f64>) -> String {
    match share {
        Some(fraction) => format_percentage(fraction * 100.0),
        None => "-".to_string(),
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
