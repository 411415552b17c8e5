//! Statistics Engine
//!
//! Pure, deterministic derivation of summary metrics and chart-ready
//! series from a reading list. No I/O; every function takes an explicit
//! `now` so results are reproducible in tests.
//!
//! Two "normal range" constants exist on purpose. The aggregate
//! time-in-range statistic uses 80-140 mg/dL while visual classification
//! and chart shading use 90-140 mg/dL. The thresholds disagree in the
//! product today; they are kept as separately named constants rather than
//! silently unified, pending product clarification.

use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Local, Utc};

use crate::model::{MealContext, Reading};

/// Range used by `compute_stats` for the time-in-range percentage.
pub const STATS_RANGE: RangeInclusive<f64> = 80.0..=140.0;

/// Range used for visual classification and chart band shading.
pub const DISPLAY_RANGE: RangeInclusive<f64> = 90.0..=140.0;

/// Aggregate metrics shown on the dashboard. Derived on demand, never
/// persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    /// Reading with the most recent `logged_at`, `None` when there are no
    /// readings.
    pub latest: Option<Reading>,
    /// Mean level over the trailing 7 days (rolling cutoff from `now`, not
    /// calendar days), rounded to the nearest integer. `0` when no reading
    /// falls inside the window.
    pub average_7_days: f64,
    /// Size of the full input set, not windowed.
    pub total_logs: usize,
    /// Percentage of ALL readings inside `STATS_RANGE`, rounded. `0` when
    /// the input is empty.
    pub time_in_range_percentage: f64,
    pub min: f64,
    pub max: f64,
}

impl Stats {
    pub fn empty() -> Self {
        Self {
            latest: None,
            average_7_days: 0.0,
            total_logs: 0,
            time_in_range_percentage: 0.0,
            min: 0.0,
            max: 0.0,
        }
    }
}

/// Compute dashboard statistics over an unordered reading set.
///
/// Empty input yields the well-defined zero record, never an error.
pub fn compute_stats(readings: &[Reading], now: DateTime<Utc>) -> Stats {
    if readings.is_empty() {
        return Stats::empty();
    }

    let latest = readings
        .iter()
        .max_by_key(|r| r.logged_at)
        .cloned();

    let cutoff = now - Duration::days(7);
    let recent: Vec<f64> = readings
        .iter()
        .filter(|r| r.logged_at >= cutoff)
        .map(|r| r.level)
        .collect();
    let average_7_days = if recent.is_empty() {
        0.0
    } else {
        (recent.iter().sum::<f64>() / recent.len() as f64).round()
    };

    let in_range = readings
        .iter()
        .filter(|r| STATS_RANGE.contains(&r.level))
        .count();
    let time_in_range_percentage =
        (in_range as f64 / readings.len() as f64 * 100.0).round();

    let min = readings.iter().map(|r| r.level).fold(f64::INFINITY, f64::min);
    let max = readings
        .iter()
        .map(|r| r.level)
        .fold(f64::NEG_INFINITY, f64::max);

    Stats {
        latest,
        average_7_days,
        total_logs: readings.len(),
        time_in_range_percentage,
        min,
        max,
    }
}

/// Named relative time range used to filter readings for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeWindow {
    Today,
    Last7Days,
    Last30Days,
    Last90Days,
    All,
}

impl TimeWindow {
    pub const ALL_WINDOWS: [TimeWindow; 5] = [
        TimeWindow::Today,
        TimeWindow::Last7Days,
        TimeWindow::Last30Days,
        TimeWindow::Last90Days,
        TimeWindow::All,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Today => "Today",
            TimeWindow::Last7Days => "Last 7 days",
            TimeWindow::Last30Days => "Last 30 days",
            TimeWindow::Last90Days => "Last 90 days",
            TimeWindow::All => "All time",
        }
    }

    /// Stable value for select inputs.
    pub fn key(self) -> &'static str {
        match self {
            TimeWindow::Today => "today",
            TimeWindow::Last7Days => "7d",
            TimeWindow::Last30Days => "30d",
            TimeWindow::Last90Days => "90d",
            TimeWindow::All => "all",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL_WINDOWS.into_iter().find(|w| w.key() == key)
    }

    fn days(self) -> Option<i64> {
        match self {
            TimeWindow::Last7Days => Some(7),
            TimeWindow::Last30Days => Some(30),
            TimeWindow::Last90Days => Some(90),
            TimeWindow::Today | TimeWindow::All => None,
        }
    }
}

/// Filter readings to a window and return them ascending by `logged_at`.
///
/// The fetch layer returns readings descending; this is the one place an
/// ordering guarantee exists, because the chart renders left to right.
/// `Today` uses local calendar-day boundaries; the day windows use a
/// rolling cutoff from `now` with no upper bound.
pub fn filter_by_window(
    readings: &[Reading],
    window: TimeWindow,
    now: DateTime<Local>,
) -> Vec<Reading> {
    let mut out: Vec<Reading> = match window {
        TimeWindow::All => readings.to_vec(),
        TimeWindow::Today => {
            let today = now.date_naive();
            readings
                .iter()
                .filter(|r| r.logged_at.with_timezone(&Local).date_naive() == today)
                .cloned()
                .collect()
        }
        _ => {
            // days() is Some for every remaining variant
            let cutoff = (now - Duration::days(window.days().unwrap_or(0)))
                .with_timezone(&Utc);
            readings
                .iter()
                .filter(|r| r.logged_at >= cutoff)
                .cloned()
                .collect()
        }
    };
    out.sort_by_key(|r| r.logged_at);
    out
}

/// One chart-ready tuple. `label` is pre-formatted for the x-axis with a
/// granularity that depends on the active window.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub level: f64,
    pub meal_type: Option<MealContext>,
    pub timestamp: DateTime<Utc>,
}

/// Shape already-filtered, ascending readings into chart points.
///
/// Output length always equals input length and ordering is preserved.
pub fn build_chart_series(filtered: &[Reading], window: TimeWindow) -> Vec<ChartPoint> {
    filtered
        .iter()
        .map(|r| {
            let local = r.logged_at.with_timezone(&Local);
            let label = match window {
                TimeWindow::Today => local.format("%-I:%M %p").to_string(),
                _ => local.format("%b %-d").to_string(),
            };
            ChartPoint {
                label,
                level: r.level,
                meal_type: r.meal_type,
                timestamp: r.logged_at,
            }
        })
        .collect()
}

/// Direction of change between the first and last reading of a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// Summary shown next to the chart for the selected window. Unlike
/// `compute_stats`, the in-range percentage here uses `DISPLAY_RANGE` to
/// match the shaded band on the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowSummary {
    pub average: f64,
    pub lowest: f64,
    pub highest: f64,
    pub in_range_percentage: f64,
    pub trend: Trend,
    pub count: usize,
}

pub fn window_summary(filtered: &[Reading]) -> WindowSummary {
    if filtered.is_empty() {
        return WindowSummary {
            average: 0.0,
            lowest: 0.0,
            highest: 0.0,
            in_range_percentage: 0.0,
            trend: Trend::Flat,
            count: 0,
        };
    }

    let levels: Vec<f64> = filtered.iter().map(|r| r.level).collect();
    let average = (levels.iter().sum::<f64>() / levels.len() as f64).round();
    let lowest = levels.iter().copied().fold(f64::INFINITY, f64::min);
    let highest = levels.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let in_range = levels.iter().filter(|l| DISPLAY_RANGE.contains(l)).count();
    let in_range_percentage = (in_range as f64 / levels.len() as f64 * 100.0).round();

    let trend = if filtered.len() < 2 {
        Trend::Flat
    } else {
        let first = filtered[0].level;
        let last = filtered[filtered.len() - 1].level;
        if last > first {
            Trend::Up
        } else if last < first {
            Trend::Down
        } else {
            Trend::Flat
        }
    };

    WindowSummary {
        average,
        lowest,
        highest,
        in_range_percentage,
        trend,
        count: filtered.len(),
    }
}

/// Visual classification of a single level against `DISPLAY_RANGE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlucoseStatus {
    Low,
    Normal,
    Elevated,
    High,
}

impl GlucoseStatus {
    pub fn label(self) -> &'static str {
        match self {
            GlucoseStatus::Low => "Low",
            GlucoseStatus::Normal => "Normal",
            GlucoseStatus::Elevated => "Elevated",
            GlucoseStatus::High => "High",
        }
    }
}

pub fn classify(level: f64) -> GlucoseStatus {
    if level < *DISPLAY_RANGE.start() {
        GlucoseStatus::Low
    } else if DISPLAY_RANGE.contains(&level) {
        GlucoseStatus::Normal
    } else if level <= 180.0 {
        GlucoseStatus::Elevated
    } else {
        GlucoseStatus::High
    }
}

/// Number of distinct local calendar days with at least one reading.
pub fn days_active(readings: &[Reading]) -> usize {
    let mut days: Vec<_> = readings
        .iter()
        .map(|r| r.logged_at.with_timezone(&Local).date_naive())
        .collect();
    days.sort_unstable();
    days.dedup();
    days.len()
}

/// Mean readings per active day, rounded. `0` without readings.
pub fn average_per_day(readings: &[Reading]) -> f64 {
    let days = days_active(readings);
    if days == 0 {
        return 0.0;
    }
    (readings.len() as f64 / days as f64).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(id: &str, level: f64, logged_at: DateTime<Utc>) -> Reading {
        Reading {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            level,
            logged_at,
            created_at: logged_at,
            meal_type: None,
            note: None,
        }
    }

    #[test]
    fn test_stats_concrete_example() {
        let now = Utc::now();
        let readings = vec![
            reading("a", 100.0, now - Duration::hours(3)),
            reading("b", 120.0, now - Duration::hours(2)),
            reading("c", 140.0, now - Duration::hours(1)),
        ];

        let stats = compute_stats(&readings, now);
        assert_eq!(stats.average_7_days, 120.0);
        assert_eq!(stats.min, 100.0);
        assert_eq!(stats.max, 140.0);
        assert_eq!(stats.time_in_range_percentage, 100.0);
        assert_eq!(stats.total_logs, 3);
        assert_eq!(stats.latest.unwrap().id, "c");
    }

    #[test]
    fn test_stats_empty_input() {
        let stats = compute_stats(&[], Utc::now());
        assert_eq!(stats, Stats::empty());
        assert!(stats.latest.is_none());
    }

    #[test]
    fn test_average_window_is_rolling_seven_days() {
        let now = Utc::now();
        let readings = vec![
            // Inside the window
            reading("a", 100.0, now - Duration::days(6)),
            // Outside the window: excluded from the average but still part
            // of count, min/max and time-in-range
            reading("b", 300.0, now - Duration::days(8)),
        ];

        let stats = compute_stats(&readings, now);
        assert_eq!(stats.average_7_days, 100.0);
        assert_eq!(stats.total_logs, 2);
        assert_eq!(stats.max, 300.0);
        assert_eq!(stats.time_in_range_percentage, 50.0);
    }

    #[test]
    fn test_average_zero_when_no_recent_readings() {
        let now = Utc::now();
        let readings = vec![reading("a", 150.0, now - Duration::days(30))];

        let stats = compute_stats(&readings, now);
        assert_eq!(stats.average_7_days, 0.0);
        assert_eq!(stats.total_logs, 1);
    }

    #[test]
    fn test_single_reading_flat_stats() {
        let now = Utc::now();
        let readings = vec![reading("a", 115.0, now - Duration::hours(1))];

        let stats = compute_stats(&readings, now);
        assert_eq!(stats.average_7_days, 115.0);
        assert_eq!(stats.min, stats.max);
        assert_eq!(stats.min, 115.0);
    }

    #[test]
    fn test_delete_decrements_total() {
        let now = Utc::now();
        let readings = vec![
            reading("a", 100.0, now - Duration::hours(2)),
            reading("b", 110.0, now - Duration::hours(1)),
        ];
        let before = compute_stats(&readings, now);

        let after_delete: Vec<Reading> =
            readings.into_iter().filter(|r| r.id != "b").collect();
        let after = compute_stats(&after_delete, now);

        assert_eq!(after.total_logs, before.total_logs - 1);
        assert!(after_delete.iter().all(|r| r.id != "b"));
    }

    #[test]
    fn test_filter_sorts_ascending() {
        let now = Local::now();
        let now_utc = now.with_timezone(&Utc);
        let readings = vec![
            reading("newest", 100.0, now_utc - Duration::hours(1)),
            reading("oldest", 110.0, now_utc - Duration::days(3)),
            reading("middle", 120.0, now_utc - Duration::days(1)),
        ];

        let filtered = filter_by_window(&readings, TimeWindow::Last7Days, now);
        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["oldest", "middle", "newest"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let now = Local::now();
        let now_utc = now.with_timezone(&Utc);
        let readings = vec![
            reading("a", 100.0, now_utc - Duration::days(2)),
            reading("b", 110.0, now_utc - Duration::days(40)),
            reading("c", 120.0, now_utc - Duration::hours(5)),
        ];

        let once = filter_by_window(&readings, TimeWindow::Last30Days, now);
        let twice = filter_by_window(&once, TimeWindow::Last30Days, now);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_window_cutoffs() {
        let now = Local::now();
        let now_utc = now.with_timezone(&Utc);
        let readings = vec![
            reading("recent", 100.0, now_utc - Duration::days(2)),
            reading("old", 110.0, now_utc - Duration::days(45)),
            reading("ancient", 120.0, now_utc - Duration::days(100)),
        ];

        assert_eq!(filter_by_window(&readings, TimeWindow::Last7Days, now).len(), 1);
        assert_eq!(filter_by_window(&readings, TimeWindow::Last30Days, now).len(), 1);
        assert_eq!(filter_by_window(&readings, TimeWindow::Last90Days, now).len(), 2);
        assert_eq!(filter_by_window(&readings, TimeWindow::All, now).len(), 3);
    }

    #[test]
    fn test_filter_today_uses_local_day() {
        let now = Local::now();
        let now_utc = now.with_timezone(&Utc);
        let readings = vec![
            reading("today", 100.0, now_utc),
            reading("last_week", 110.0, now_utc - Duration::days(7)),
        ];

        let filtered = filter_by_window(&readings, TimeWindow::Today, now);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "today");
    }

    #[test]
    fn test_series_length_and_ordering() {
        let now = Local::now();
        let now_utc = now.with_timezone(&Utc);
        let readings = vec![
            reading("a", 100.0, now_utc - Duration::days(3)),
            reading("b", 130.0, now_utc - Duration::days(2)),
            reading("c", 95.0, now_utc - Duration::hours(4)),
        ];

        let filtered = filter_by_window(&readings, TimeWindow::Last7Days, now);
        let series = build_chart_series(&filtered, TimeWindow::Last7Days);

        assert_eq!(series.len(), filtered.len());
        assert!(series.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

        // Idempotent: same input, same output
        assert_eq!(series, build_chart_series(&filtered, TimeWindow::Last7Days));
    }

    #[test]
    fn test_series_label_granularity() {
        let now = Local::now();
        let reading_now = reading("a", 100.0, now.with_timezone(&Utc));

        let today = build_chart_series(std::slice::from_ref(&reading_now), TimeWindow::Today);
        let weekly =
            build_chart_series(std::slice::from_ref(&reading_now), TimeWindow::Last7Days);

        // Time of day for today, calendar date otherwise
        assert!(today[0].label.contains(':'));
        assert!(!weekly[0].label.contains(':'));
        assert_eq!(weekly[0].label, now.format("%b %-d").to_string());
    }

    #[test]
    fn test_empty_window_yields_empty_series() {
        let now = Local::now();
        let readings = vec![reading(
            "old",
            100.0,
            now.with_timezone(&Utc) - Duration::days(20),
        )];

        let filtered = filter_by_window(&readings, TimeWindow::Today, now);
        assert!(filtered.is_empty());
        assert!(build_chart_series(&filtered, TimeWindow::Today).is_empty());
        assert_eq!(window_summary(&filtered).count, 0);
    }

    #[test]
    fn test_window_summary_uses_display_range() {
        let now = Utc::now();
        let readings = vec![
            // 85 is inside STATS_RANGE but below DISPLAY_RANGE
            reading("a", 85.0, now - Duration::hours(2)),
            reading("b", 120.0, now - Duration::hours(1)),
        ];

        let summary = window_summary(&readings);
        assert_eq!(summary.in_range_percentage, 50.0);
        assert_eq!(summary.average, 103.0);
        assert_eq!(summary.lowest, 85.0);
        assert_eq!(summary.highest, 120.0);
        assert_eq!(summary.trend, Trend::Up);
    }

    #[test]
    fn test_trend_directions() {
        let now = Utc::now();
        let rising = vec![
            reading("a", 100.0, now - Duration::hours(2)),
            reading("b", 140.0, now - Duration::hours(1)),
        ];
        let falling = vec![
            reading("a", 140.0, now - Duration::hours(2)),
            reading("b", 100.0, now - Duration::hours(1)),
        ];
        let single = vec![reading("a", 100.0, now)];

        assert_eq!(window_summary(&rising).trend, Trend::Up);
        assert_eq!(window_summary(&falling).trend, Trend::Down);
        assert_eq!(window_summary(&single).trend, Trend::Flat);
    }

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(classify(89.9), GlucoseStatus::Low);
        assert_eq!(classify(90.0), GlucoseStatus::Normal);
        assert_eq!(classify(140.0), GlucoseStatus::Normal);
        assert_eq!(classify(141.0), GlucoseStatus::Elevated);
        assert_eq!(classify(180.0), GlucoseStatus::Elevated);
        assert_eq!(classify(181.0), GlucoseStatus::High);
    }

    #[test]
    fn test_window_key_round_trip() {
        for window in TimeWindow::ALL_WINDOWS {
            assert_eq!(TimeWindow::from_key(window.key()), Some(window));
        }
        assert_eq!(TimeWindow::from_key("bogus"), None);
    }

    #[test]
    fn test_days_active_counts_distinct_days() {
        let now = Local::now().with_timezone(&Utc);
        let readings = vec![
            reading("a", 100.0, now - Duration::days(2)),
            reading("b", 110.0, now - Duration::days(2)),
            reading("c", 120.0, now - Duration::days(4)),
        ];

        assert_eq!(days_active(&readings), 2);
        assert_eq!(average_per_day(&readings), 2.0);
        assert_eq!(days_active(&[]), 0);
        assert_eq!(average_per_day(&[]), 0.0);
    }
}
