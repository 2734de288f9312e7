//! Tests for building a layout manager from JSON configuration.

use std::time::{Duration, Instant};

use floem_responsive::ConfigError;
use floem_responsive_test::prelude::*;

const APP_CONFIG: &str = r#"{
    "breakpoints": {
        "mobile": 0,
        "tablet": 768,
        "desktop": 1280,
        "wide-desktop": 1440,
        "ultra-wide": 1920
    },
    "fallback_tier": "mobile",
    "columns": { "mobile": 1, "tablet": 2, "desktop": 3, "ultra-wide": 5 },
    "max_grid_columns": 4
}"#;

#[test]
fn test_manager_from_json() {
    let config = LayoutConfig::from_json_str(APP_CONFIG).expect("valid config");
    let harness = TestHarness::with_config(ManualSampler::new(), config);

    assert_eq!(harness.tier(), Tier::Mobile);
    assert_eq!(harness.resize(1300, 900), Tier::Desktop);
    assert_eq!(harness.manager().optimal_columns(), 3);

    assert_eq!(harness.resize(1500, 900), Tier::WideDesktop);
    assert_eq!(harness.manager().optimal_columns(), 3);

    assert_eq!(harness.resize(2500, 900), Tier::UltraWide);
    assert_eq!(harness.manager().optimal_columns(), 5);

    let grid = ResponsiveGrid::from_config(harness.manager().config());
    assert_eq!(use_responsive_grid(harness.tier(), &grid), 4);
}

#[test]
fn test_breakpoint_order_comes_from_json() {
    let config = LayoutConfig::from_json_str(
        r#"{ "breakpoints": { "tablet": 600, "mobile": 0 } }"#,
    )
    .unwrap_err();
    assert!(matches!(config, ConfigError::Json(_)));
    assert!(config.to_string().contains("tablet"));
}

#[test]
fn test_breakpoints_round_trip_through_json() {
    let table = BreakpointTable::default();
    let json = serde_json::to_string(&table).unwrap();
    assert!(json.starts_with(r#"{"mobile":0,"tablet":768"#));
    let back: BreakpointTable = serde_json::from_str(&json).unwrap();
    assert_eq!(back, table);
}

#[test]
fn test_debounced_manager_from_json() {
    let config = LayoutConfig::from_json_str(r#"{ "debounce_ms": 1000 }"#).unwrap();
    let harness = TestHarness::with_config(ManualSampler::with_size(375, 812), config);
    let tracker = NotificationTracker::new();
    let _sub = tracker.track(harness.manager());

    widths(&harness, [600, 900, 1300, 1700, 1100]);
    assert_eq!(harness.tier(), Tier::Mobile);
    assert!(harness.manager().has_pending());

    assert!(harness.manager().poll(Instant::now() + Duration::from_secs(2)));
    assert_eq!(harness.tier(), Tier::Desktop);
    assert_eq!(tracker.tiers(), vec![Tier::Desktop]);
    assert!(!harness.manager().poll(Instant::now() + Duration::from_secs(4)));
}

#[test]
fn test_flush_skips_quiet_period() {
    let config = LayoutConfig::default().debounce(Duration::from_secs(60));
    let harness = TestHarness::with_config(ManualSampler::with_size(375, 812), config);

    harness.resize(2000, 1000);
    assert_eq!(harness.tier(), Tier::Mobile);

    harness.manager().flush();
    assert_eq!(harness.tier(), Tier::UltraWide);
    assert!(!harness.manager().has_pending());
}
