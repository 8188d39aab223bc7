//! The instant estimate engine
//!
//! `Estimator::refresh` turns a raw [`FormSnapshot`] into a rendered
//! [`EstimateUpdate`] by composing normalize -> compute -> render. Every
//! step is total: malformed values normalize to configured defaults, so the
//! engine never errors or panics over form input.
//!
//! Pricing staging: the home-type multiplier and the per-service minimum
//! apply to the base subtotal (service base + size + rooms) only. Add-on
//! costs join after both, and the frequency adjustment applies once at the
//! end, covering add-ons when `frequency_covers_addons` is set (the
//! default). The size term charges the full clamped footage unless
//! `free_sqft` raises the threshold.

use regex::Regex;
use tracing::debug;

use crate::config::{FrequencyAdjustment, PricingConfig};
use crate::format;
use crate::models::{
    AddonSelection, Chip, EstimateRequest, EstimateResult, FormSnapshot, LineItem, LineValue,
};
use crate::render::{self, EstimateUpdate};

/// Stateless estimate calculator bound to one pricing config.
pub struct Estimator {
    config: PricingConfig,
    /// Matches "+$35"-style price markers inside add-on labels
    price_marker: Regex,
}

impl Estimator {
    pub fn new() -> Self {
        Self::with_config(PricingConfig::default())
    }

    pub fn with_config(config: PricingConfig) -> Self {
        Self {
            config,
            price_marker: Regex::new(r"\+\$\s*\d+").expect("valid regex"),
        }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Recompute everything from one form snapshot.
    ///
    /// Returns `None` when any control the engine reads is absent from the
    /// document; the page then keeps whatever it was showing.
    pub fn refresh(&self, snapshot: &FormSnapshot) -> Option<EstimateUpdate> {
        if !snapshot.required_controls_present() {
            return None;
        }
        let request = self.normalize(snapshot);
        let result = self.compute(&request);
        let update = render::render_update(&result, request.sqft);
        debug!(
            service = %request.service,
            price_range = %update.price_range,
            duration = %update.duration,
            "estimate refreshed"
        );
        Some(update)
    }

    /// Turn raw form values into a validated request. Total: absent or
    /// malformed fields take the configured defaults, counts clamp into
    /// range, and unpriced add-on ids are dropped.
    pub fn normalize(&self, snapshot: &FormSnapshot) -> EstimateRequest {
        let intake = &self.config.intake;

        let service = enum_field(&snapshot.service_type, intake.default_service, "service");
        let home = enum_field(&snapshot.home_type, intake.default_home, "home");
        let frequency = enum_field(&snapshot.frequency, intake.default_frequency, "frequency");

        let bedrooms = count_field(
            &snapshot.beds,
            intake.default_bedrooms,
            intake.min_bedrooms,
            intake.max_bedrooms,
        );
        let bathrooms = count_field(
            &snapshot.baths,
            intake.default_bathrooms,
            intake.min_bathrooms,
            intake.max_bathrooms,
        );
        let sqft = count_field(
            &snapshot.sqft,
            intake.default_sqft,
            intake.min_sqft,
            intake.max_sqft,
        );

        let mut addons = Vec::new();
        for addon in &snapshot.addons {
            if !addon.checked {
                continue;
            }
            if self.config.addon_price(&addon.id).is_none() {
                debug!(addon = %addon.id, "dropping add-on with no configured price");
                continue;
            }
            let label = match &addon.label {
                Some(raw) => self.clean_addon_label(raw),
                None => "Add-on".to_string(),
            };
            addons.push(AddonSelection {
                id: addon.id.clone(),
                label,
            });
        }

        EstimateRequest {
            service,
            home,
            bedrooms,
            bathrooms,
            sqft,
            frequency,
            addons,
            notes: text_field(&snapshot.notes),
            allergies: text_field(&snapshot.allergies),
        }
    }

    /// Pure pricing; see [`compute_estimate`].
    pub fn compute(&self, request: &EstimateRequest) -> EstimateResult {
        compute_estimate(request, &self.config)
    }

    /// Strip price markers from a checkbox label and collapse whitespace.
    /// "Inside fridge +$35" becomes "Inside fridge"; a label that is all
    /// marker falls back to "Add-on".
    fn clean_addon_label(&self, raw: &str) -> String {
        let stripped = self.price_marker.replace_all(raw, "");
        let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            "Add-on".to_string()
        } else {
            collapsed
        }
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Price one normalized request against a pricing config.
///
/// Pure: no side effects, everything recomputed from scratch on each call.
pub fn compute_estimate(request: &EstimateRequest, config: &PricingConfig) -> EstimateResult {
    let rates = config.service_rates(request.service);
    let home_factor = config.home_factor(request.home);

    let chargeable_sqft = request.sqft.saturating_sub(config.price.free_sqft);
    let size_cost = chargeable_sqft as f64 * rates.per_sqft;
    let room_cost = request.bedrooms as f64 * rates.per_bedroom
        + request.bathrooms as f64 * rates.per_bathroom;

    let mut subtotal = (rates.base + size_cost + room_cost) * home_factor;
    subtotal = subtotal.max(rates.minimum);

    let mut addons_total = 0.0;
    let mut addon_rows = Vec::with_capacity(request.addons.len());
    for addon in &request.addons {
        let cost = config.addon_price(&addon.id).unwrap_or(0.0);
        addons_total += cost;
        addon_rows.push(LineItem::amount(addon.label.clone(), cost));
    }

    let pre_adjustment = subtotal + addons_total;
    let adjustment_base = if config.price.frequency_covers_addons {
        pre_adjustment
    } else {
        subtotal
    };
    let (total, frequency_effect) = match config.frequency_adjustment(request.frequency) {
        Some(adjustment) if !adjustment.is_neutral() => {
            let effect = adjustment.effect(adjustment_base);
            (pre_adjustment + effect, Some((adjustment, effect)))
        }
        _ => (pre_adjustment, None),
    };

    let spread = config.price.range_spread;
    let low = (total * (1.0 - spread)).max(config.price.floor);
    let high = total * (1.0 + spread);

    let time = &config.time;
    let timed_sqft = request.sqft.saturating_sub(time.free_sqft);
    let minutes = (time.base_minutes
        + (timed_sqft as f64 / 100.0) * time.minutes_per_100_sqft
        + request.bathrooms as f64 * time.minutes_per_bathroom
        + request.bedrooms as f64 * time.minutes_per_bedroom)
        * rates.time_multiplier
        + request.addons.len() as f64 * time.minutes_per_addon;
    let hours = (minutes / 60.0).clamp(time.min_hours, time.max_hours);

    let mut items = vec![
        LineItem::amount("Service base", rates.base),
        LineItem::amount(
            format!(
                "Square footage ({} sqft)",
                format::group_thousands(request.sqft as u64)
            ),
            size_cost,
        ),
        LineItem::amount(
            format!("Rooms ({} bed / {} bath)", request.bedrooms, request.bathrooms),
            room_cost,
        ),
    ];
    items.extend(addon_rows);

    if home_factor != 1.0 {
        items.push(LineItem::factor(
            format!("Home type ({})", request.home.label()),
            home_factor,
        ));
    }
    if let Some((adjustment, effect)) = frequency_effect {
        match adjustment {
            FrequencyAdjustment::Discount(d) => items.push(LineItem::amount(
                format!("Frequency discount ({}%)", (d * 100.0).round() as u32),
                effect,
            )),
            FrequencyAdjustment::Factor(f) => {
                items.push(LineItem::factor("Frequency adjustment", f))
            }
        }
    }

    // zero amounts never render
    items.retain(|item| !matches!(item.value, LineValue::Amount(a) if a == 0.0));

    let mut chips = Vec::new();
    if let Some(notes) = &request.notes {
        chips.push(Chip {
            label: "Notes".to_string(),
            text: notes.clone(),
        });
    }
    if let Some(allergies) = &request.allergies {
        chips.push(Chip {
            label: "Allergies".to_string(),
            text: allergies.clone(),
        });
    }

    EstimateResult {
        low,
        high,
        total,
        hours,
        items,
        chips,
    }
}

/// Leading-digits integer parsing, the way a browser form would do it:
/// skip leading whitespace, take an optional sign and then consecutive
/// digits, ignore the rest. No digits means no value.
fn parse_count(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let mut value: i64 = 0;
    for d in digits.bytes() {
        value = value
            .saturating_mul(10)
            .saturating_add((d - b'0') as i64);
    }
    Some(if negative { -value } else { value })
}

fn count_field(raw: &Option<String>, default: u32, min: u32, max: u32) -> u32 {
    let value = raw
        .as_deref()
        .and_then(parse_count)
        .unwrap_or(default as i64);
    value.clamp(min as i64, max as i64) as u32
}

fn enum_field<T>(raw: &Option<String>, default: T, field: &str) -> T
where
    T: std::str::FromStr + Copy,
{
    match raw.as_deref() {
        Some(s) if !s.is_empty() => s.parse().ok().unwrap_or_else(|| {
            debug!(field, value = %s, "unrecognized selection, using default");
            default
        }),
        _ => default,
    }
}

fn text_field(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
