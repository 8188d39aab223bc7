//! Broken-image placeholders
//!
//! When a photo fails to load (error event or a zero natural width), the
//! page swaps in a generated SVG: a tinted card with the image's alt text
//! centered on it. The tint hue derives from a hash of the label, and equal
//! labels give byte-identical artwork.

use std::collections::HashSet;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::render::escape_html;

const MAX_LABEL_CHARS: usize = 24;
const FALLBACK_LABEL: &str = "LuxyNest";

/// Whether an image element needs the placeholder swap.
pub fn needs_fallback(load_failed: bool, natural_width: u32) -> bool {
    load_failed || natural_width == 0
}

/// Placeholder label from an image's alt text: whitespace collapsed,
/// truncated to a display-friendly length, branded fallback when empty.
pub fn label_from_alt(alt: Option<&str>) -> String {
    let collapsed = match alt {
        Some(text) => text.split_whitespace().collect::<Vec<_>>().join(" "),
        None => String::new(),
    };
    if collapsed.is_empty() {
        return FALLBACK_LABEL.to_string();
    }
    let mut chars = collapsed.chars();
    let truncated: String = chars.by_ref().take(MAX_LABEL_CHARS).collect();
    if chars.next().is_some() {
        truncated + "…"
    } else {
        truncated
    }
}

/// Placeholder SVG for a label. Deterministic: equal labels give equal
/// bytes.
pub fn placeholder_svg(label: &str) -> String {
    let hue = label_hue(label);
    let text = escape_html(label);
    format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"600\" ",
            "viewBox=\"0 0 800 600\">",
            "<rect width=\"800\" height=\"600\" fill=\"hsl({hue}, 45%, 84%)\"/>",
            "<text x=\"400\" y=\"300\" text-anchor=\"middle\" dominant-baseline=\"middle\" ",
            "font-family=\"system-ui, sans-serif\" font-size=\"40\" ",
            "fill=\"hsl({hue}, 35%, 32%)\">{text}</text>",
            "</svg>"
        ),
        hue = hue,
        text = text
    )
}

/// The SVG as a `data:` URI, ready for an `img src` swap.
pub fn placeholder_data_uri(label: &str) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(placeholder_svg(label))
    )
}

fn label_hue(label: &str) -> u32 {
    let digest = Sha256::digest(label.as_bytes());
    ((u32::from(digest[0]) << 8) | u32::from(digest[1])) % 360
}

/// Remembers which image elements already got the placeholder, so the swap
/// runs at most once per element even if error events keep firing.
#[derive(Debug, Default, Clone)]
pub struct FallbackTracker {
    applied: HashSet<String>,
}

impl FallbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True exactly once per element; false means it was already replaced.
    pub fn mark_applied(&mut self, element: impl Into<String>) -> bool {
        self.applied.insert(element.into())
    }

    pub fn is_applied(&self, element: &str) -> bool {
        self.applied.contains(element)
    }
}
