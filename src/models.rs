//! Domain models for the LuxyNest site behavior engine

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Cleaning service tier offered on the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Standard,
    Deep,
    /// Move-out / move-in clean
    Move,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Deep => "deep",
            Self::Move => "move",
        }
    }
}

impl std::str::FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "deep" => Ok(Self::Deep),
            "move" | "move-out" | "moveout" | "move-in" | "movein" => Ok(Self::Move),
            _ => Err(format!("Unknown service type: {}", s)),
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Home type selected on the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeType {
    #[serde(rename = "apt")]
    Apartment,
    House,
}

impl HomeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apartment => "apt",
            Self::House => "house",
        }
    }

    /// Short human label used in line items ("apartment" / "house")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
        }
    }
}

impl std::str::FromStr for HomeType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apt" | "apartment" => Ok(Self::Apartment),
            "house" | "home" => Ok(Self::House),
            _ => Err(format!("Unknown home type: {}", s)),
        }
    }
}

impl std::fmt::Display for HomeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cleaning frequency selected on the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    OneTime,
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "one-time",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            // "oneTime" was the legacy form-control value; lowercasing folds
            // it into "onetime".
            "one-time" | "onetime" | "one_time" | "once" => Ok(Self::OneTime),
            "weekly" => Ok(Self::Weekly),
            "biweekly" | "bi-weekly" | "bi_weekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State of one add-on checkbox as read from the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonState {
    /// Checkbox value attribute; keys into the configured price table
    #[serde(default)]
    pub id: String,
    /// Raw label text, possibly carrying a price marker ("Fridge +$35")
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub checked: bool,
}

/// Raw form state, exactly as the page read it.
///
/// `None` on a select/input field means the control is absent from the
/// document (the estimator no-ops); `Some` holds the raw value however
/// malformed. Built fresh on every recomputation and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub home_type: Option<String>,
    #[serde(default)]
    pub beds: Option<String>,
    #[serde(default)]
    pub baths: Option<String>,
    #[serde(default)]
    pub sqft: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    /// All add-on checkboxes in document order, checked or not
    #[serde(default)]
    pub addons: Vec<AddonState>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
}

impl FormSnapshot {
    /// Decode a snapshot the host page serialized as JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether every control the estimator reads is present in the document.
    /// Values may still be arbitrary garbage; presence is all that matters
    /// here.
    pub fn required_controls_present(&self) -> bool {
        self.service_type.is_some()
            && self.home_type.is_some()
            && self.beds.is_some()
            && self.baths.is_some()
            && self.sqft.is_some()
            && self.frequency.is_some()
    }
}

/// A checked add-on that survived normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonSelection {
    pub id: String,
    /// Display label with any price marker stripped
    pub label: String,
}

/// Normalized, validated estimate inputs.
///
/// Every field is guaranteed in range: counts are clamped, unknown
/// enumeration values have been replaced by the configured defaults, and
/// `addons` only holds ids present in the price table, in selection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub service: ServiceType,
    pub home: HomeType,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub sqft: u32,
    pub frequency: Frequency,
    pub addons: Vec<AddonSelection>,
    pub notes: Option<String>,
    pub allergies: Option<String>,
}

/// Value column of a line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineValue {
    /// A currency amount; negative for discounts
    Amount(f64),
    /// A display-only multiplier, rendered as "×1.08"
    Factor(f64),
    /// Label-only row
    Blank,
}

/// One row of the estimate breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub value: LineValue,
}

impl LineItem {
    pub fn amount(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            value: LineValue::Amount(amount),
        }
    }

    pub fn factor(label: impl Into<String>, factor: f64) -> Self {
        Self {
            label: label.into(),
            value: LineValue::Factor(factor),
        }
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: LineValue::Blank,
        }
    }
}

/// Free-text detail rendered after the priced rows; carries no price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub label: String,
    pub text: String,
}

/// Computed estimate: price bounds, crew time, and the breakdown rows.
///
/// Derived purely from an [`EstimateRequest`] and a pricing config; carries
/// no state and is fully recomputed on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Low display bound, pre-rounding (floor already applied)
    pub low: f64,
    /// High display bound, pre-rounding
    pub high: f64,
    /// Adjusted total the range spreads around
    pub total: f64,
    /// Estimated crew hours, clamped to the configured range
    pub hours: f64,
    /// Priced rows in fixed order: base, size, rooms, add-ons, adjustments
    pub items: Vec<LineItem>,
    /// Notes/allergies chips, appended after the priced rows
    pub chips: Vec<Chip>,
}
