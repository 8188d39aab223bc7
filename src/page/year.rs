//! Footer year

use chrono::{Datelike, Local};

/// Current calendar year for the footer. The host sets it once at page
/// initialization.
pub fn footer_year() -> String {
    Local::now().year().to_string()
}
