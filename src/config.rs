//! Pricing model configuration
//!
//! The built-in defaults (`PricingConfig::default()`) are the source of
//! truth and match `config/pricing.toml`. Override files are partial TOML:
//! every key is optional and merges over the defaults, so a deployment can
//! retune a single minimum charge without restating the whole table.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Frequency, HomeType, ServiceType};

/// Rates for one service tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceRates {
    pub base: f64,
    pub per_sqft: f64,
    pub per_bedroom: f64,
    pub per_bathroom: f64,
    /// Lowest charge after the home factor, before add-ons
    pub minimum: f64,
    /// Scales the crew-time model for this tier
    pub time_multiplier: f64,
}

impl Default for ServiceRates {
    /// Standard-tier rates; also the seed when an override introduces a tier
    fn default() -> Self {
        Self {
            base: 110.0,
            per_sqft: 0.11,
            per_bedroom: 18.0,
            per_bathroom: 28.0,
            minimum: 140.0,
            time_multiplier: 1.0,
        }
    }
}

/// How a cleaning frequency changes the price.
///
/// Config entries pick a strategy per frequency: `{ discount = 0.15 }`
/// takes 15% off, `{ factor = 0.85 }` multiplies outright.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyAdjustment {
    Discount(f64),
    Factor(f64),
}

impl FrequencyAdjustment {
    pub fn apply(&self, amount: f64) -> f64 {
        match self {
            Self::Discount(d) => amount * (1.0 - d),
            Self::Factor(f) => amount * f,
        }
    }

    /// Signed price effect on `amount`; negative for a discount
    pub fn effect(&self, amount: f64) -> f64 {
        self.apply(amount) - amount
    }

    pub fn is_neutral(&self) -> bool {
        match self {
            Self::Discount(d) => *d == 0.0,
            Self::Factor(f) => *f == 1.0,
        }
    }
}

/// Defaults and clamp ranges applied while normalizing form input
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeRules {
    pub default_service: ServiceType,
    pub default_home: HomeType,
    pub default_frequency: Frequency,
    pub default_bedrooms: u32,
    pub default_bathrooms: u32,
    pub default_sqft: u32,
    pub min_bedrooms: u32,
    pub max_bedrooms: u32,
    pub min_bathrooms: u32,
    pub max_bathrooms: u32,
    pub min_sqft: u32,
    pub max_sqft: u32,
}

impl Default for IntakeRules {
    fn default() -> Self {
        Self {
            default_service: ServiceType::Standard,
            default_home: HomeType::Apartment,
            default_frequency: Frequency::OneTime,
            default_bedrooms: 1,
            default_bathrooms: 1,
            default_sqft: 900,
            min_bedrooms: 0,
            max_bedrooms: 10,
            min_bathrooms: 1,
            max_bathrooms: 10,
            min_sqft: 300,
            max_sqft: 12000,
        }
    }
}

/// Price shaping knobs
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRules {
    /// Footage charged at zero before per-sqft rates kick in
    pub free_sqft: u32,
    /// Whether the frequency adjustment also covers add-on costs
    pub frequency_covers_addons: bool,
    /// Half-width of the displayed range, as a fraction of the total
    pub range_spread: f64,
    /// Lowest low bound ever displayed
    pub floor: f64,
}

impl Default for PriceRules {
    fn default() -> Self {
        Self {
            free_sqft: 0,
            frequency_covers_addons: true,
            range_spread: 0.06,
            floor: 99.0,
        }
    }
}

/// Crew-time model, in minutes, before the per-service multiplier
#[derive(Debug, Clone, PartialEq)]
pub struct TimeRules {
    pub base_minutes: f64,
    pub minutes_per_100_sqft: f64,
    /// Footage excluded from the per-100-sqft term
    pub free_sqft: u32,
    pub minutes_per_bedroom: f64,
    pub minutes_per_bathroom: f64,
    pub minutes_per_addon: f64,
    pub min_hours: f64,
    pub max_hours: f64,
}

impl Default for TimeRules {
    fn default() -> Self {
        Self {
            base_minutes: 60.0,
            minutes_per_100_sqft: 5.0,
            free_sqft: 0,
            minutes_per_bedroom: 9.0,
            minutes_per_bathroom: 16.0,
            minutes_per_addon: 12.0,
            min_hours: 1.5,
            max_hours: 10.0,
        }
    }
}

/// The full pricing model. Immutable during computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    pub services: HashMap<ServiceType, ServiceRates>,
    pub home_factors: HashMap<HomeType, f64>,
    pub frequencies: HashMap<Frequency, FrequencyAdjustment>,
    /// Flat add-on prices keyed by checkbox value
    pub addons: HashMap<String, f64>,
    pub intake: IntakeRules,
    pub price: PriceRules,
    pub time: TimeRules,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let mut services = HashMap::new();
        services.insert(ServiceType::Standard, ServiceRates::default());
        services.insert(
            ServiceType::Deep,
            ServiceRates {
                base: 150.0,
                per_sqft: 0.14,
                per_bedroom: 22.0,
                per_bathroom: 38.0,
                minimum: 190.0,
                time_multiplier: 1.22,
            },
        );
        services.insert(
            ServiceType::Move,
            ServiceRates {
                base: 175.0,
                per_sqft: 0.16,
                per_bedroom: 24.0,
                per_bathroom: 42.0,
                minimum: 220.0,
                time_multiplier: 1.32,
            },
        );

        let mut home_factors = HashMap::new();
        home_factors.insert(HomeType::Apartment, 1.0);
        home_factors.insert(HomeType::House, 1.08);

        let mut frequencies = HashMap::new();
        frequencies.insert(Frequency::OneTime, FrequencyAdjustment::Discount(0.0));
        frequencies.insert(Frequency::Weekly, FrequencyAdjustment::Discount(0.15));
        frequencies.insert(Frequency::Biweekly, FrequencyAdjustment::Discount(0.10));
        frequencies.insert(Frequency::Monthly, FrequencyAdjustment::Discount(0.05));

        let mut addons = HashMap::new();
        for (id, price) in [
            ("fridge", 35.0),
            ("oven", 35.0),
            ("windows", 45.0),
            ("cabinets", 55.0),
            ("laundry", 25.0),
            ("pet", 20.0),
        ] {
            addons.insert(id.to_string(), price);
        }

        Self {
            services,
            home_factors,
            frequencies,
            addons,
            intake: IntakeRules::default(),
            price: PriceRules::default(),
            time: TimeRules::default(),
        }
    }
}

impl PricingConfig {
    /// Parse a partial TOML override and merge it over the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)?;
        let mut config = Self::default();
        config.merge_raw(raw);
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading pricing config");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Rates for a service, falling back to the configured default tier.
    pub fn service_rates(&self, service: ServiceType) -> ServiceRates {
        self.services
            .get(&service)
            .or_else(|| self.services.get(&self.intake.default_service))
            .copied()
            .unwrap_or_default()
    }

    /// Multiplier for a home type; an unconfigured type prices neutrally.
    pub fn home_factor(&self, home: HomeType) -> f64 {
        self.home_factors.get(&home).copied().unwrap_or(1.0)
    }

    /// `None` means the frequency carries no price adjustment.
    pub fn frequency_adjustment(&self, frequency: Frequency) -> Option<FrequencyAdjustment> {
        self.frequencies.get(&frequency).copied()
    }

    /// Price for an add-on id; `None` drops the add-on at normalization.
    pub fn addon_price(&self, id: &str) -> Option<f64> {
        self.addons.get(id).copied()
    }

    fn merge_raw(&mut self, raw: RawConfig) {
        for (key, rates) in raw.services {
            let service = match key.parse::<ServiceType>() {
                Ok(service) => service,
                Err(_) => {
                    warn!(service = %key, "skipping unknown service in pricing override");
                    continue;
                }
            };
            let entry = self.services.entry(service).or_default();
            if let Some(v) = rates.base {
                entry.base = v;
            }
            if let Some(v) = rates.per_sqft {
                entry.per_sqft = v;
            }
            if let Some(v) = rates.per_bedroom {
                entry.per_bedroom = v;
            }
            if let Some(v) = rates.per_bathroom {
                entry.per_bathroom = v;
            }
            if let Some(v) = rates.minimum {
                entry.minimum = v;
            }
            if let Some(v) = rates.time_multiplier {
                entry.time_multiplier = v;
            }
        }

        for (key, factor) in raw.home_factors {
            match key.parse::<HomeType>() {
                Ok(home) => {
                    self.home_factors.insert(home, factor);
                }
                Err(_) => warn!(home = %key, "skipping unknown home type in pricing override"),
            }
        }

        for (key, adjustment) in raw.frequencies {
            match key.parse::<Frequency>() {
                Ok(frequency) => {
                    self.frequencies.insert(frequency, adjustment);
                }
                Err(_) => warn!(frequency = %key, "skipping unknown frequency in pricing override"),
            }
        }

        // Add-on ids are an open set: entries merge in, nothing is removed.
        for (id, price) in raw.addons {
            self.addons.insert(id, price);
        }

        if let Some(intake) = raw.intake {
            self.merge_intake(intake);
        }
        if let Some(price) = raw.price {
            self.merge_price(price);
        }
        if let Some(time) = raw.time {
            self.merge_time(time);
        }
    }

    fn merge_intake(&mut self, raw: RawIntake) {
        if let Some(s) = raw.default_service {
            match s.parse() {
                Ok(service) => self.intake.default_service = service,
                Err(_) => warn!(service = %s, "skipping unknown default service"),
            }
        }
        if let Some(s) = raw.default_home {
            match s.parse() {
                Ok(home) => self.intake.default_home = home,
                Err(_) => warn!(home = %s, "skipping unknown default home type"),
            }
        }
        if let Some(s) = raw.default_frequency {
            match s.parse() {
                Ok(frequency) => self.intake.default_frequency = frequency,
                Err(_) => warn!(frequency = %s, "skipping unknown default frequency"),
            }
        }
        if let Some(v) = raw.default_bedrooms {
            self.intake.default_bedrooms = v;
        }
        if let Some(v) = raw.default_bathrooms {
            self.intake.default_bathrooms = v;
        }
        if let Some(v) = raw.default_sqft {
            self.intake.default_sqft = v;
        }
        if let Some(v) = raw.min_bedrooms {
            self.intake.min_bedrooms = v;
        }
        if let Some(v) = raw.max_bedrooms {
            self.intake.max_bedrooms = v;
        }
        if let Some(v) = raw.min_bathrooms {
            self.intake.min_bathrooms = v;
        }
        if let Some(v) = raw.max_bathrooms {
            self.intake.max_bathrooms = v;
        }
        if let Some(v) = raw.min_sqft {
            self.intake.min_sqft = v;
        }
        if let Some(v) = raw.max_sqft {
            self.intake.max_sqft = v;
        }
    }

    fn merge_price(&mut self, raw: RawPrice) {
        if let Some(v) = raw.free_sqft {
            self.price.free_sqft = v;
        }
        if let Some(v) = raw.frequency_covers_addons {
            self.price.frequency_covers_addons = v;
        }
        if let Some(v) = raw.range_spread {
            self.price.range_spread = v;
        }
        if let Some(v) = raw.floor {
            self.price.floor = v;
        }
    }

    fn merge_time(&mut self, raw: RawTime) {
        if let Some(v) = raw.base_minutes {
            self.time.base_minutes = v;
        }
        if let Some(v) = raw.minutes_per_100_sqft {
            self.time.minutes_per_100_sqft = v;
        }
        if let Some(v) = raw.free_sqft {
            self.time.free_sqft = v;
        }
        if let Some(v) = raw.minutes_per_bedroom {
            self.time.minutes_per_bedroom = v;
        }
        if let Some(v) = raw.minutes_per_bathroom {
            self.time.minutes_per_bathroom = v;
        }
        if let Some(v) = raw.minutes_per_addon {
            self.time.minutes_per_addon = v;
        }
        if let Some(v) = raw.min_hours {
            self.time.min_hours = v;
        }
        if let Some(v) = raw.max_hours {
            self.time.max_hours = v;
        }
    }

    /// Reject models that could produce nonsense prices.
    pub fn validate(&self) -> Result<()> {
        if self.services.is_empty() {
            return Err(Error::Config("no service rates configured".into()));
        }
        if !self.services.contains_key(&self.intake.default_service) {
            return Err(Error::Config(format!(
                "default service '{}' has no rate entry",
                self.intake.default_service
            )));
        }
        for (service, rates) in &self.services {
            for (name, value) in [
                ("base", rates.base),
                ("per_sqft", rates.per_sqft),
                ("per_bedroom", rates.per_bedroom),
                ("per_bathroom", rates.per_bathroom),
                ("minimum", rates.minimum),
                ("time_multiplier", rates.time_multiplier),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::Config(format!(
                        "service '{}' has invalid {}: {}",
                        service, name, value
                    )));
                }
            }
        }
        for (home, factor) in &self.home_factors {
            if !factor.is_finite() || *factor < 0.0 {
                return Err(Error::Config(format!(
                    "home type '{}' has invalid factor: {}",
                    home, factor
                )));
            }
        }
        for (frequency, adjustment) in &self.frequencies {
            let bad = match adjustment {
                FrequencyAdjustment::Discount(d) => !d.is_finite() || *d < 0.0 || *d > 1.0,
                FrequencyAdjustment::Factor(f) => !f.is_finite() || *f < 0.0,
            };
            if bad {
                return Err(Error::Config(format!(
                    "frequency '{}' has an invalid adjustment",
                    frequency
                )));
            }
        }
        for (id, price) in &self.addons {
            if !price.is_finite() || *price < 0.0 {
                return Err(Error::Config(format!(
                    "add-on '{}' has invalid price: {}",
                    id, price
                )));
            }
        }
        let intake = &self.intake;
        if intake.min_bedrooms > intake.max_bedrooms
            || intake.min_bathrooms > intake.max_bathrooms
            || intake.min_sqft > intake.max_sqft
        {
            return Err(Error::Config("inverted intake clamp range".into()));
        }
        if !self.price.range_spread.is_finite()
            || self.price.range_spread < 0.0
            || self.price.range_spread >= 1.0
        {
            return Err(Error::Config(format!(
                "range_spread must be in [0, 1): {}",
                self.price.range_spread
            )));
        }
        if !self.price.floor.is_finite() || self.price.floor < 0.0 {
            return Err(Error::Config(format!(
                "invalid price floor: {}",
                self.price.floor
            )));
        }
        let time = &self.time;
        for (name, value) in [
            ("base_minutes", time.base_minutes),
            ("minutes_per_100_sqft", time.minutes_per_100_sqft),
            ("minutes_per_bedroom", time.minutes_per_bedroom),
            ("minutes_per_bathroom", time.minutes_per_bathroom),
            ("minutes_per_addon", time.minutes_per_addon),
            ("min_hours", time.min_hours),
            ("max_hours", time.max_hours),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!("invalid time model {}: {}", name, value)));
            }
        }
        if time.min_hours > time.max_hours {
            return Err(Error::Config("min_hours exceeds max_hours".into()));
        }
        Ok(())
    }
}

// Raw deserialization targets: every field optional so override files can be
// arbitrarily partial. String keys are parsed and unknown ones skipped.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    services: HashMap<String, RawServiceRates>,
    home_factors: HashMap<String, f64>,
    frequencies: HashMap<String, FrequencyAdjustment>,
    addons: HashMap<String, f64>,
    intake: Option<RawIntake>,
    price: Option<RawPrice>,
    time: Option<RawTime>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawServiceRates {
    base: Option<f64>,
    per_sqft: Option<f64>,
    per_bedroom: Option<f64>,
    per_bathroom: Option<f64>,
    minimum: Option<f64>,
    time_multiplier: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawIntake {
    default_service: Option<String>,
    default_home: Option<String>,
    default_frequency: Option<String>,
    default_bedrooms: Option<u32>,
    default_bathrooms: Option<u32>,
    default_sqft: Option<u32>,
    min_bedrooms: Option<u32>,
    max_bedrooms: Option<u32>,
    min_bathrooms: Option<u32>,
    max_bathrooms: Option<u32>,
    min_sqft: Option<u32>,
    max_sqft: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPrice {
    free_sqft: Option<u32>,
    frequency_covers_addons: Option<bool>,
    range_spread: Option<f64>,
    floor: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTime {
    base_minutes: Option<f64>,
    minutes_per_100_sqft: Option<f64>,
    free_sqft: Option<u32>,
    minutes_per_bedroom: Option<f64>,
    minutes_per_bathroom: Option<f64>,
    minutes_per_addon: Option<f64>,
    min_hours: Option<f64>,
    max_hours: Option<f64>,
}
