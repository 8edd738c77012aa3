//! Excursion Analysis Integration Tests
//!
//! End-to-end checks across the public API:
//! 1. CSV file -> MA series -> analysis pass -> rendered panel
//! 2. Distance modes disagreeing on the extreme bar
//! 3. Recompute-from-scratch properties on random walks
//!
//! All tests are deterministic (seeded RNG, no network).

use approx::assert_relative_eq;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use tempfile::NamedTempFile;

use ma_excursion::adapters::display::{JsonRenderer, TextRenderer};
use ma_excursion::adapters::market_data::load_bars;
use ma_excursion::application::ExcursionAnalyzer;
use ma_excursion::domain::{AnalysisFrame, Bar, Direction, Sequence};
use ma_excursion::ports::{AlignedSeries, Renderer};
use ma_excursion::strategy::{build_series, AnalysisConfig, CrossPoint, DistanceMode};

// ============================================================================
// Test Fixtures
// ============================================================================

fn bar_time(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap() + Duration::hours(i as i64)
}

/// Flat at 100 for 10 bars, climbs 101..=110, then drops to 95 for 10 bars
fn rally_then_drop() -> Vec<Bar> {
    let mut closes = vec![100.0; 10];
    closes.extend((1..=10).map(|k| 100.0 + k as f64));
    closes.extend(vec![95.0; 10]);

    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let low = if i >= 20 { 95.0 } else { c - 0.5 };
            Bar::new(bar_time(i), c, c + 0.5, low, c)
        })
        .collect()
}

fn config(mode: DistanceMode, cross_point: CrossPoint) -> AnalysisConfig {
    AnalysisConfig::default()
        .with_period(5)
        .with_unit_size(0.5)
        .with_distance_mode(mode)
        .with_cross_point(cross_point)
}

fn run(bars: &[Bar], config: AnalysisConfig) -> AnalysisFrame {
    let series = build_series(bars, &config.moving_average).unwrap();
    ExcursionAnalyzer::new(config).unwrap().run_pass(&series).unwrap()
}

/// Random walk with wicks, seeded for reproducibility
fn random_walk(seed: u64, len: usize) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut close: f64 = 1000.0;
    (0..len)
        .map(|i| {
            let open = close;
            close += rng.gen_range(-5.0..5.0);
            let high = open.max(close) + rng.gen_range(0.0..2.0);
            let low = open.min(close) - rng.gen_range(0.0..2.0);
            Bar::new(bar_time(i), open, high, low, close)
        })
        .collect()
}

// ============================================================================
// End-to-end pass
// ============================================================================

#[test]
fn test_price_cross_absolute_single_up_excursion() {
    let frame = run(&rally_then_drop(), config(DistanceMode::Absolute, CrossPoint::Price));

    assert_eq!(frame.bars, 30);
    assert_eq!(frame.crossings.len(), 2);
    assert_eq!(frame.crossings[0].index, 10);
    assert_eq!(frame.crossings[0].direction, Direction::Up);
    assert_eq!(frame.crossings[1].index, 20);
    assert_eq!(frame.crossings[1].direction, Direction::Down);

    // Down tail never trades below the cross price, so only the rally is kept
    assert_eq!(frame.records.len(), 1);
    let record = frame.records[0];
    assert_eq!(record.direction, Direction::Up);
    assert_eq!(record.cross_time, bar_time(10));
    assert_eq!(record.extreme_index, 19);
    assert_relative_eq!(record.magnitude, 19.0);

    assert_eq!(frame.statistics.all.count, 1);
    assert_relative_eq!(frame.statistics.all.average, 19.0);
    assert_relative_eq!(frame.statistics.up.median, 19.0);
    assert_eq!(frame.statistics.down.count, 0);
    assert_eq!(frame.statistics.down.average, 0.0);
    assert!(frame.alert.is_none());

    assert_eq!(frame.overlay.zigzag.get(&10), Some(&101.0));
    assert_eq!(frame.overlay.zigzag.get(&19), Some(&110.5));
    assert_eq!(frame.overlay.zigzag.get(&20), Some(&95.0));
    assert_eq!(frame.labels.len(), 1);
    assert_eq!(frame.labels[0].text, "19.0");
}

#[test]
fn test_ma_reference_keeps_both_directions() {
    let frame = run(&rally_then_drop(), config(DistanceMode::Absolute, CrossPoint::MaValue));

    assert_eq!(frame.records.len(), 2);
    // Up: highest high 110.5 against lowest MA 100.2
    assert_relative_eq!(frame.records[0].magnitude, 20.6, epsilon = 1e-9);
    // Down: highest MA 105.8 against lowest low 95
    assert_eq!(frame.records[1].direction, Direction::Down);
    assert_relative_eq!(frame.records[1].magnitude, 21.6, epsilon = 1e-9);
    assert_relative_eq!(frame.statistics.all.median, 21.1, epsilon = 1e-9);
}

#[test]
fn test_modes_disagree_on_extreme_bar() {
    let absolute = run(&rally_then_drop(), config(DistanceMode::Absolute, CrossPoint::MaValue));
    let relative = run(&rally_then_drop(), config(DistanceMode::Relative, CrossPoint::MaValue));

    let abs_up = absolute.records[0];
    let rel_up = relative.records[0];
    assert_eq!(abs_up.extreme_index, 19);
    // Per-bar distance to the MA peaks at 2.5 first on bar 13
    assert_eq!(rel_up.extreme_index, 13);
    assert_relative_eq!(rel_up.magnitude, 5.0, epsilon = 1e-9);
    assert!(abs_up.magnitude > rel_up.magnitude);
}

#[test]
fn test_csv_to_panel_pipeline() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "time,open,high,low,close").unwrap();
    for bar in rally_then_drop() {
        writeln!(
            file,
            "{},{},{},{},{}",
            bar.open_time.format("%Y.%m.%d %H:%M"),
            bar.open,
            bar.high,
            bar.low,
            bar.close
        )
        .unwrap();
    }

    let bars = load_bars(file.path()).unwrap();
    assert_eq!(bars, rally_then_drop());

    let frame = run(&bars, config(DistanceMode::Absolute, CrossPoint::Price).with_stats_count(0));
    let mut renderer = TextRenderer::new(Vec::new(), false);
    renderer.render(&frame).unwrap();
    let text = String::from_utf8(renderer.into_inner()).unwrap();

    assert!(text.contains("MA EXCURSION STATISTICS"));
    assert!(text.contains("(All 1 Excursions)"));
    assert!(text.contains("  Avg: 19.0 points"));
    assert!(text.contains("  Med: 0.0 points"));
}

#[test]
fn test_json_output_round_trips_frame() {
    let frame = run(&rally_then_drop(), config(DistanceMode::Relative, CrossPoint::Price));
    let mut renderer = JsonRenderer::new(Vec::new(), false);
    renderer.render(&frame).unwrap();

    let output = String::from_utf8(renderer.into_inner()).unwrap();
    let parsed: AnalysisFrame = serde_json::from_str(output.trim()).unwrap();
    assert_eq!(parsed, frame);
}

// ============================================================================
// Recompute properties
// ============================================================================

#[test]
fn test_reused_analyzer_matches_fresh_on_growing_history() {
    let bars = random_walk(7, 160);
    let config = config(DistanceMode::Relative, CrossPoint::MaValue).with_max_bars(100);
    let mut reused = ExcursionAnalyzer::new(config.clone()).unwrap();

    for n in (20..=bars.len()).step_by(7) {
        let series = build_series(&bars[..n], &config.moving_average).unwrap();
        let from_reused = reused.run_pass(&series).unwrap();
        let from_fresh = ExcursionAnalyzer::new(config.clone()).unwrap().run_pass(&series).unwrap();
        assert_eq!(from_reused, from_fresh, "history length {}", n);
    }
}

#[test]
fn test_store_invariants_on_random_walks() {
    for seed in 0..8u64 {
        let bars = random_walk(seed, 300);
        for (mode, cross_point) in [
            (DistanceMode::Absolute, CrossPoint::MaValue),
            (DistanceMode::Absolute, CrossPoint::Price),
            (DistanceMode::Relative, CrossPoint::MaValue),
            (DistanceMode::Relative, CrossPoint::Price),
        ] {
            let config = config(mode, cross_point).with_period(10).with_max_bars(0);
            let series: AlignedSeries = build_series(&bars, &config.moving_average).unwrap();
            let mut analyzer = ExcursionAnalyzer::new(config).unwrap();
            let frame = analyzer.run_pass(&series).unwrap();
            let store = analyzer.store();

            let all = store.sequence(Sequence::All);
            assert_eq!(all.len(), frame.records.len());
            assert!(all.iter().all(|&m| m > 0.0), "seed {} {:?}/{:?}", seed, mode, cross_point);

            let ups: Vec<f64> = frame
                .records
                .iter()
                .filter(|r| r.direction == Direction::Up)
                .map(|r| r.magnitude)
                .collect();
            assert_eq!(store.sequence(Sequence::Up), ups.as_slice());
            assert_eq!(store.len(Sequence::Up) + store.len(Sequence::Down), all.len());

            // Records follow their crosses in bar order
            assert!(frame.records.windows(2).all(|w| w[0].cross_index < w[1].cross_index));
            assert!(frame
                .records
                .iter()
                .all(|r| r.extreme_index >= r.cross_index && r.extreme_index < bars.len()));

            // Statistics window never exceeds the stored excursions
            assert!(frame.statistics.all.count <= all.len());
            assert!(frame.statistics.up.count <= frame.statistics.all.count);
            assert!(frame.statistics.down.count <= frame.statistics.all.count);
        }
    }
}

#[test]
fn test_repeat_pass_is_identical() {
    let bars = random_walk(42, 200);
    let config = config(DistanceMode::Absolute, CrossPoint::Price).with_alerts(false);
    let series = build_series(&bars, &config.moving_average).unwrap();
    let mut analyzer = ExcursionAnalyzer::new(config).unwrap();

    let first = analyzer.run_pass(&series).unwrap();
    let second = analyzer.run_pass(&series).unwrap();
    assert_eq!(first, second);
    assert_eq!(analyzer.store().len(Sequence::All), first.records.len());
}
