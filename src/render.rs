//! Rendering estimates into page text
//!
//! Everything user-controlled (labels, notes, allergies) passes through
//! [`escape_html`] before it touches markup; values are formatted by
//! [`crate::format`] and contain nothing to escape.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format;
use crate::models::{EstimateResult, LineValue};

/// Text for the three display regions, plus the clamped footage for the
/// optional input write-back. This is the full output of one refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateUpdate {
    /// e.g. "$257 – $289"
    pub price_range: String,
    /// e.g. "2 hours"
    pub duration: String,
    pub line_items_html: String,
    pub sqft_used: u32,
}

impl EstimateUpdate {
    /// Serialize for a host page that applies updates from JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Push this update into a display surface.
    pub fn apply_to(&self, panel: &mut dyn EstimatePanel) {
        panel.set_price_range(&self.price_range);
        panel.set_duration(&self.duration);
        panel.set_line_items(&self.line_items_html);
        panel.set_sqft_field(self.sqft_used);
    }
}

/// Display surface for one estimate panel. Hosts adapt this to their DOM
/// layer; `set_sqft_field` is the optional write-back of the clamped
/// footage and defaults to a no-op.
pub trait EstimatePanel {
    fn set_price_range(&mut self, text: &str);
    fn set_duration(&mut self, text: &str);
    fn set_line_items(&mut self, html: &str);
    fn set_sqft_field(&mut self, _sqft: u32) {}
}

/// Render a computed estimate into region text.
pub fn render_update(result: &EstimateResult, sqft_used: u32) -> EstimateUpdate {
    EstimateUpdate {
        price_range: format::money_range(result.low, result.high),
        duration: format::duration_hours(result.hours),
        line_items_html: render_line_items(result),
        sqft_used,
    }
}

/// Breakdown rows followed by the notes/allergies chips.
pub fn render_line_items(result: &EstimateResult) -> String {
    let mut html = String::new();
    for item in &result.items {
        let value = match item.value {
            LineValue::Amount(amount) => format::money(amount),
            LineValue::Factor(factor) => format::factor(factor),
            LineValue::Blank => String::new(),
        };
        html.push_str(&format!(
            "<div class=\"li\"><span>{}</span><em>{}</em></div>",
            escape_html(&item.label),
            value
        ));
    }
    for chip in &result.chips {
        html.push_str(&format!(
            "<div class=\"li chip\"><span>{}:</span><span>{}</span></div>",
            escape_html(&chip.label),
            escape_html(&chip.text)
        ));
    }
    html
}

/// Entity-encode the five HTML metacharacters. The single escape point for
/// everything rendered into markup.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}
