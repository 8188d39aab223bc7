//! LuxyNest Site Behavior Library
//!
//! Client-side behavior for the LuxyNest Cleaning marketing site:
//! - Instant estimate engine: form snapshot -> normalized request ->
//!   priced breakdown -> rendered panel text
//! - Configurable pricing model with partial TOML overrides
//! - Mobile drawer state machine
//! - One-shot reveal-on-scroll tracking
//! - Deterministic placeholders for broken images
//! - Footer year

pub mod config;
pub mod error;
pub mod estimate;
pub mod format;
pub mod models;
pub mod page;
pub mod render;

pub use config::{
    FrequencyAdjustment, IntakeRules, PriceRules, PricingConfig, ServiceRates, TimeRules,
};
pub use error::{Error, Result};
pub use estimate::{compute_estimate, Estimator};
pub use models::{
    AddonSelection, AddonState, Chip, EstimateRequest, EstimateResult, FormSnapshot, Frequency,
    HomeType, LineItem, LineValue, ServiceType,
};
pub use page::{Drawer, DrawerEffects, DrawerEvent, FallbackTracker, RevealObserver};
pub use render::{escape_html, render_line_items, render_update, EstimatePanel, EstimateUpdate};
