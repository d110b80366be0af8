//! Dashboard View-Model
//!
//! Pure derivation from raw aggregates to display values. Renderers (the
//! Leptos page, the terminal table) only read these structs.

use std::ops::RangeInclusive;

use crate::api::{CategoryCounts, HourlyRate};

use super::DashboardData;

/// Shown wherever a value is unavailable
pub const PLACEHOLDER: &str = "—";

/// Evening peak window, in hours of the day
pub const PEAK_HOURS: RangeInclusive<u8> = 18..=22;

/// Rows kept in the merchant-category breakdown
pub const MERCHANT_ROW_LIMIT: usize = 6;

/// Caption describing the dataset behind the dashboard
pub const DATASET_CAPTION: &str = "250,000 UPI transactions · January – December 2024";

/// Accent used for a breakdown's bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    Accent,
    Red,
    Amber,
    Blue,
    Purple,
}

impl BarColor {
    /// CSS color value
    pub fn css(&self) -> &'static str {
        match self {
            BarColor::Accent => "var(--accent)",
            BarColor::Red => "var(--red)",
            BarColor::Amber => "var(--amber)",
            BarColor::Blue => "var(--blue)",
            BarColor::Purple => "#a855f7",
        }
    }
}

/// Headline number card
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: &'static str,
    pub icon: &'static str,
    /// Highlighted card
    pub accent: bool,
}

/// One horizontal bar
#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub label: String,
    pub value: u64,
    /// Width relative to the group's largest value, 0-100
    pub percent: u32,
}

impl BarRow {
    /// Count with thousands separators
    pub fn display_value(&self) -> String {
        format_count(self.value)
    }
}

/// Titled group of bars
#[derive(Debug, Clone, PartialEq)]
pub struct SectionCard {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub color: BarColor,
    pub rows: Vec<BarRow>,
}

/// Everything the dashboard page renders
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Total transactions, success rate, volume, peak-hour success
    pub stats: [StatCard; 4],
    /// Transaction types and merchant-category failures
    pub volume: [SectionCard; 2],
    /// Network, device and bank failures
    pub breakdowns: [SectionCard; 3],
}

impl DashboardView {
    pub fn build(data: &DashboardData) -> Self {
        let summary = data.summary.as_ref();
        let failures = data.failures.as_ref();
        let empty = CategoryCounts::new();

        let peak = data
            .trends
            .as_ref()
            .and_then(|t| peak_hour_success(&t.by_hour))
            .map(|avg| format!("{:.1}%", avg))
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let stats = [
            StatCard {
                title: "Total Transactions",
                value: summary
                    .map(|s| format_count(s.total_transactions))
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                subtitle: "Jan – Dec 2024",
                icon: "📊",
                accent: false,
            },
            StatCard {
                title: "Success Rate",
                value: summary
                    .map(|s| format!("{}%", s.success_rate))
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                subtitle: "Overall platform",
                icon: "✅",
                accent: true,
            },
            StatCard {
                title: "Total Volume",
                value: summary
                    .map(|s| format!("₹{}Cr", s.total_amount_crores))
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                subtitle: "Across all types",
                icon: "💰",
                accent: false,
            },
            StatCard {
                title: "Peak Hour Success",
                value: peak,
                subtitle: "6 PM – 10 PM window",
                icon: "⏱️",
                accent: false,
            },
        ];

        let volume = [
            SectionCard {
                title: "Transaction Volume by Type",
                subtitle: "All transactions",
                color: BarColor::Accent,
                rows: bar_rows(
                    summary.map(|s| &s.transaction_types).unwrap_or(&empty),
                    None,
                ),
            },
            SectionCard {
                title: "Failures by Merchant Category",
                subtitle: "P2M transactions only",
                color: BarColor::Red,
                rows: bar_rows(
                    failures.map(|f| &f.by_merchant_category).unwrap_or(&empty),
                    Some(MERCHANT_ROW_LIMIT),
                ),
            },
        ];

        let breakdowns = [
            SectionCard {
                title: "Failures by Network",
                subtitle: "All transaction types",
                color: BarColor::Amber,
                rows: bar_rows(failures.map(|f| &f.by_network).unwrap_or(&empty), None),
            },
            SectionCard {
                title: "Failures by Device",
                subtitle: "All transaction types",
                color: BarColor::Blue,
                rows: bar_rows(failures.map(|f| &f.by_device).unwrap_or(&empty), None),
            },
            SectionCard {
                title: "Top Failing Banks",
                subtitle: "By sender bank",
                color: BarColor::Purple,
                rows: bar_rows(failures.map(|f| &f.by_bank).unwrap_or(&empty), None),
            },
        ];

        Self {
            stats,
            volume,
            breakdowns,
        }
    }

    /// All five breakdown sections in display order
    pub fn sections(&self) -> impl Iterator<Item = &SectionCard> {
        self.volume.iter().chain(self.breakdowns.iter())
    }
}

impl From<&DashboardData> for DashboardView {
    fn from(data: &DashboardData) -> Self {
        Self::build(data)
    }
}

/// Mean success rate over the peak window, rounded to one decimal
///
/// `None` when the series has no hour inside the window.
pub fn peak_hour_success(by_hour: &[HourlyRate]) -> Option<f64> {
    let rates: Vec<f64> = by_hour
        .iter()
        .filter(|h| PEAK_HOURS.contains(&h.hour_of_day))
        .map(|h| h.success_rate)
        .collect();

    if rates.is_empty() {
        return None;
    }

    let mean = rates.iter().sum::<f64>() / rates.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

/// Sort a breakdown descending by count and scale bars to its largest value
///
/// The scale divisor never drops below 1. Ties keep name order.
pub fn bar_rows(counts: &CategoryCounts, limit: Option<usize>) -> Vec<BarRow> {
    let max = counts.values().copied().max().unwrap_or(0).max(1);

    let mut entries: Vec<(&String, &u64)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));

    entries
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|(label, &value)| BarRow {
            label: label.clone(),
            value,
            percent: ((value as f64 / max as f64) * 100.0).round() as u32,
        })
        .collect()
}

/// Integer with comma thousands separators (`250000` → `250,000`)
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FailureBreakdown, Summary, Trends};
    use std::collections::BTreeMap;

    fn counts(pairs: &[(&str, u64)]) -> CategoryCounts {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_peak_hour_average() {
        let hours = [
            HourlyRate::new(18, 90.0),
            HourlyRate::new(19, 80.0),
            HourlyRate::new(20, 85.0),
            HourlyRate::new(21, 95.0),
            HourlyRate::new(22, 70.0),
        ];
        assert_eq!(peak_hour_success(&hours), Some(84.0));
    }

    #[test]
    fn test_peak_hour_ignores_outside_window() {
        let hours = [
            HourlyRate::new(9, 10.0),
            HourlyRate::new(17, 10.0),
            HourlyRate::new(18, 91.26),
            HourlyRate::new(22, 92.0),
            HourlyRate::new(23, 10.0),
        ];
        // (91.26 + 92.0) / 2 = 91.63 -> 91.6
        assert_eq!(peak_hour_success(&hours), Some(91.6));
    }

    #[test]
    fn test_peak_hour_placeholder() {
        assert_eq!(peak_hour_success(&[]), None);
        assert_eq!(peak_hour_success(&[HourlyRate::new(3, 99.0)]), None);

        let view = DashboardView::build(&DashboardData {
            trends: Some(Trends { by_hour: vec![] }),
            ..Default::default()
        });
        assert_eq!(view.stats[3].value, PLACEHOLDER);
    }

    #[test]
    fn test_merchant_rows_top_six() {
        let merchants = counts(&[
            ("A", 50),
            ("B", 30),
            ("C", 10),
            ("D", 5),
            ("E", 3),
            ("F", 1),
            ("G", 1),
        ]);
        let rows = bar_rows(&merchants, Some(MERCHANT_ROW_LIMIT));

        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D", "E", "F"]);
        assert_eq!(rows[0].percent, 100);
        assert_eq!(rows[1].percent, 60);
        assert_eq!(rows[2].percent, 20);
    }

    #[test]
    fn test_bar_rows_sorted_descending() {
        let rows = bar_rows(&counts(&[("low", 2), ("high", 40), ("mid", 9)]), None);
        let values: Vec<u64> = rows.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![40, 9, 2]);
    }

    #[test]
    fn test_bar_rows_zero_counts_floor_max() {
        let rows = bar_rows(&counts(&[("none", 0)]), None);
        assert_eq!(rows[0].percent, 0);
        assert!(bar_rows(&BTreeMap::new(), None).is_empty());
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(250_000), "250,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_view_with_all_data() {
        let data = DashboardData {
            summary: Some(Summary {
                total_transactions: 250_000,
                success_rate: 95.2,
                total_amount_crores: 32.75,
                transaction_types: counts(&[("P2P", 100), ("P2M", 150)]),
            }),
            failures: Some(FailureBreakdown {
                by_bank: counts(&[("SBI", 12), ("HDFC", 30)]),
                ..Default::default()
            }),
            trends: Some(Trends {
                by_hour: vec![HourlyRate::new(20, 88.0)],
            }),
        };

        let view = DashboardView::build(&data);
        assert_eq!(view.stats[0].value, "250,000");
        assert_eq!(view.stats[1].value, "95.2%");
        assert!(view.stats[1].accent);
        assert_eq!(view.stats[2].value, "₹32.75Cr");
        assert_eq!(view.stats[3].value, "88.0%");

        assert_eq!(view.volume[0].rows[0].label, "P2M");
        assert_eq!(view.breakdowns[2].rows[0].label, "HDFC");
        assert_eq!(view.sections().count(), 5);
    }

    #[test]
    fn test_view_with_nothing_loaded() {
        let view = DashboardView::from(&DashboardData::default());
        assert!(view.stats.iter().all(|card| card.value == PLACEHOLDER));
        assert!(view.sections().all(|section| section.rows.is_empty()));
    }
}
