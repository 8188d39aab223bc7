//! Display formatting for prices and durations
//!
//! Negative amounts render with an en dash ("–$41"), matching the site's
//! typography, and ranges join with " – ". Keep these in sync with the
//! static copy in the page templates.

/// Format a currency amount: rounded to whole dollars, thousands grouped.
pub fn money(amount: f64) -> String {
    let rounded = amount.abs().round() as u64;
    if amount < 0.0 {
        format!("–${}", group_thousands(rounded))
    } else {
        format!("${}", group_thousands(rounded))
    }
}

/// "low – high" with both bounds money-formatted.
pub fn money_range(low: f64, high: f64) -> String {
    format!("{} – {}", money(low), money(high))
}

/// Display-only multiplier, e.g. "×1.08".
pub fn factor(value: f64) -> String {
    format!("×{}", value)
}

/// Crew time for people: under two hours keeps one decimal ("1.8 hours"),
/// anything longer rounds to whole hours ("3 hours").
pub fn duration_hours(hours: f64) -> String {
    if hours < 2.0 {
        format!("{:.1} hours", hours)
    } else {
        format!("{} hours", hours.round() as u64)
    }
}

/// Thousands-grouped digits, e.g. 1450 -> "1,450".
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
