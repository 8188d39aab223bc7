//! Integration tests for luxynest-site
//!
//! These tests exercise the full snapshot → normalize → price → render
//! workflow the way the booking page drives it, plus the config override
//! path and the page-behavior collaborators.

use luxynest_site::page::{placeholder, year};
use luxynest_site::{
    Drawer, DrawerEvent, EstimatePanel, Estimator, FallbackTracker, FormSnapshot, PricingConfig,
    RevealObserver,
};

/// Snapshot JSON the way the booking page serializes its form: a deep
/// weekly clean of a 3 bed / 2 bath house at 1450 sqft, fridge add-on
/// checked, oven left unchecked, with notes and allergies filled in.
fn booking_form_json() -> &'static str {
    r#"{
        "serviceType": "deep",
        "homeType": "house",
        "beds": "3",
        "baths": "2",
        "sqft": "1450",
        "frequency": "weekly",
        "addons": [
            {"id": "fridge", "label": "Inside fridge +$35", "checked": true},
            {"id": "oven", "label": "Inside oven +$35", "checked": false}
        ],
        "notes": "Two cats at home",
        "allergies": "lavender"
    }"#
}

fn snapshot(service: &str, home: &str, beds: &str, baths: &str, sqft: &str, freq: &str) -> FormSnapshot {
    FormSnapshot {
        service_type: Some(service.to_string()),
        home_type: Some(home.to_string()),
        beds: Some(beds.to_string()),
        baths: Some(baths.to_string()),
        sqft: Some(sqft.to_string()),
        frequency: Some(freq.to_string()),
        ..Default::default()
    }
}

// =============================================================================
// Estimate Workflow Tests
// =============================================================================

#[test]
fn test_full_booking_form_workflow() {
    let estimator = Estimator::new();
    let snap = FormSnapshot::from_json(booking_form_json()).expect("Failed to parse snapshot");

    let update = estimator.refresh(&snap).expect("All controls present");

    // deep house: (150 + 1450*0.14 + 3*22 + 2*38) * 1.08 = 534.60,
    // plus the fridge, minus 15% weekly: 484.16
    assert_eq!(update.price_range, "$455 – $513");
    assert_eq!(update.duration, "4 hours");
    assert_eq!(update.sqft_used, 1450);

    let html = &update.line_items_html;
    assert!(html.contains("<div class=\"li\"><span>Service base</span><em>$150</em></div>"));
    assert!(html.contains("<span>Square footage (1,450 sqft)</span><em>$203</em>"));
    assert!(html.contains("<span>Rooms (3 bed / 2 bath)</span><em>$142</em>"));
    assert!(html.contains("<span>Inside fridge</span><em>$35</em>"));
    assert!(html.contains("<span>Home type (house)</span><em>×1.08</em>"));
    assert!(html.contains("<span>Frequency discount (15%)</span><em>–$85</em>"));
    assert!(html.contains("<span>Notes:</span><span>Two cats at home</span>"));
    assert!(html.contains("<span>Allergies:</span><span>lavender</span>"));

    // the JSON surface a host applies updates from
    let json = update.to_json().expect("Failed to serialize update");
    assert!(json.contains("\"priceRange\":\"$455 – $513\""));
    assert!(json.contains("\"sqftUsed\":1450"));
}

#[test]
fn test_reference_scenario_strings() {
    let estimator = Estimator::new();

    let one_time = estimator
        .refresh(&snapshot("standard", "apt", "2", "1", "900", "one-time"))
        .unwrap();
    assert_eq!(one_time.price_range, "$257 – $289");
    assert_eq!(one_time.duration, "2 hours");

    let weekly = estimator
        .refresh(&snapshot("standard", "apt", "2", "1", "900", "weekly"))
        .unwrap();
    assert_eq!(weekly.price_range, "$218 – $246");
    assert!(weekly
        .line_items_html
        .contains("<span>Frequency discount (15%)</span><em>–$41</em>"));
}

#[test]
fn test_malformed_values_still_render() {
    let estimator = Estimator::new();
    let update = estimator
        .refresh(&snapshot("gold-plated", "villa", "NaN", "several", "soon", "sometimes"))
        .expect("Malformed values must not blank the panel");

    // everything normalized to defaults: standard / apt / 1 bed / 1 bath / 900
    assert_eq!(update.price_range, "$240 – $270");
    assert_eq!(update.sqft_used, 900);
}

#[test]
fn test_bedroom_inputs_always_compute_in_range() {
    let estimator = Estimator::new();
    for n in -5..=20 {
        let req = estimator.normalize(&snapshot("standard", "apt", &n.to_string(), "1", "900", "one-time"));
        assert!(req.bedrooms <= 10, "bedrooms out of range for input {}", n);
        assert!(estimator
            .refresh(&snapshot("standard", "apt", &n.to_string(), "1", "900", "one-time"))
            .is_some());
    }
}

#[test]
fn test_addon_toggle_restores_prior_update() {
    let estimator = Estimator::new();
    let all_addons = ["fridge", "oven", "windows", "cabinets", "laundry", "pet"];

    let bare = snapshot("standard", "apt", "2", "1", "900", "one-time");
    let before = estimator.refresh(&bare).unwrap();

    let mut loaded = bare.clone();
    loaded.addons = all_addons
        .iter()
        .map(|id| luxynest_site::AddonState {
            id: id.to_string(),
            label: Some(format!("{} +$35", id)),
            checked: true,
        })
        .collect();
    let with_all = estimator.refresh(&loaded).unwrap();
    assert_ne!(with_all, before);

    // unchecking everything restores the exact prior output
    for addon in &mut loaded.addons {
        addon.checked = false;
    }
    let after = estimator.refresh(&loaded).unwrap();
    assert_eq!(after, before);
}

#[test]
fn test_markup_in_free_text_is_escaped() {
    let estimator = Estimator::new();
    let mut snap = snapshot("standard", "apt", "2", "1", "900", "one-time");
    snap.notes = Some("<script>alert('x')</script>".to_string());
    snap.addons = vec![luxynest_site::AddonState {
        id: "fridge".to_string(),
        label: Some("<img src=x onerror=alert(1)> +$35".to_string()),
        checked: true,
    }];

    let update = estimator.refresh(&snap).unwrap();
    assert!(!update.line_items_html.contains("<script"));
    assert!(!update.line_items_html.contains("<img"));
    assert!(update
        .line_items_html
        .contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
}

// =============================================================================
// Config Override Tests
// =============================================================================

#[test]
fn test_override_file_workflow() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("pricing.toml");
    std::fs::write(
        &path,
        r#"
        [services.standard]
        base = 130.0

        [frequencies]
        weekly = { factor = 0.8 }

        [addons]
        balcony = 30.0
        "#,
    )
    .expect("Failed to write override");

    let config = PricingConfig::load_from_path(&path).expect("Failed to load override");
    let estimator = Estimator::with_config(config);

    let mut snap = snapshot("standard", "apt", "2", "1", "900", "weekly");
    snap.addons = vec![luxynest_site::AddonState {
        id: "balcony".to_string(),
        label: Some("Balcony sweep +$30".to_string()),
        checked: true,
    }];

    // (130 + 99 + 64 + 30) * 0.8 = 258.40
    let update = estimator.refresh(&snap).unwrap();
    assert_eq!(update.price_range, "$243 – $274");
    assert!(update
        .line_items_html
        .contains("<span>Frequency adjustment</span><em>×0.8</em>"));
    assert!(update.line_items_html.contains("Balcony sweep"));
}

// =============================================================================
// Panel Application Tests
// =============================================================================

#[test]
fn test_update_applies_to_a_panel() {
    #[derive(Default)]
    struct RecordingPanel {
        price_range: String,
        duration: String,
        line_items: String,
        sqft: Option<u32>,
    }

    impl EstimatePanel for RecordingPanel {
        fn set_price_range(&mut self, text: &str) {
            self.price_range = text.to_string();
        }
        fn set_duration(&mut self, text: &str) {
            self.duration = text.to_string();
        }
        fn set_line_items(&mut self, html: &str) {
            self.line_items = html.to_string();
        }
        fn set_sqft_field(&mut self, sqft: u32) {
            self.sqft = Some(sqft);
        }
    }

    let estimator = Estimator::new();
    let update = estimator
        .refresh(&FormSnapshot::from_json(booking_form_json()).unwrap())
        .unwrap();

    let mut panel = RecordingPanel::default();
    update.apply_to(&mut panel);

    assert_eq!(panel.price_range, "$455 – $513");
    assert_eq!(panel.duration, "4 hours");
    assert!(panel.line_items.contains("Service base"));
    assert_eq!(panel.sqft, Some(1450));
}

// =============================================================================
// Page Behavior Tests
// =============================================================================

#[test]
fn test_drawer_session() {
    let mut drawer = Drawer::new();

    let opened = drawer.handle(DrawerEvent::OpenClicked).unwrap();
    assert!(opened.class_open && opened.scroll_locked && !opened.aria_hidden);

    // tapping the sliding panel itself keeps it open
    assert!(drawer
        .handle(DrawerEvent::SurfaceClicked { on_backdrop: false })
        .is_none());

    let closed = drawer
        .handle(DrawerEvent::SurfaceClicked { on_backdrop: true })
        .unwrap();
    assert!(!closed.class_open && !closed.scroll_locked && closed.aria_hidden);

    // Escape with the drawer already closed changes nothing
    assert!(drawer.handle(DrawerEvent::EscapePressed).is_none());
}

#[test]
fn test_reveal_is_one_shot() {
    let mut observer = RevealObserver::new();
    observer.observe("hero");
    observer.observe("pricing-card");

    assert!(!observer.intersect("hero", 0.02));
    assert!(observer.intersect("hero", 0.5));
    assert!(!observer.intersect("hero", 0.9));

    observer.observe("hero");
    assert!(observer.is_revealed("hero"));
    assert!(!observer.is_revealed("pricing-card"));
}

#[test]
fn test_placeholder_swap_happens_once() {
    let mut tracker = FallbackTracker::new();
    assert!(placeholder::needs_fallback(true, 640));

    let label = placeholder::label_from_alt(Some("Sparkling kitchen"));
    let uri = placeholder::placeholder_data_uri(&label);
    assert!(uri.starts_with("data:image/svg+xml;base64,"));
    assert_eq!(uri, placeholder::placeholder_data_uri(&label));

    assert!(tracker.mark_applied("gallery-3"));
    assert!(!tracker.mark_applied("gallery-3"));
}

#[test]
fn test_footer_year() {
    let year: i32 = year::footer_year().parse().expect("year is numeric");
    assert!(year >= 2024);
}
