// Dashboard service - Derived chart datasets from royalty records
use crate::application::data_manager::DataManager;
use crate::domain::chart::{ChartSeries, PRIMARY_COLORS, STATUS_COLORS};
use crate::domain::royalty::{RoyaltyRecord, RoyaltyStatus};
use crate::domain::section::{ChartSlot, ChartSource};
use chrono::{Datelike, NaiveDate, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub struct DashboardService {
    data: Arc<DataManager>,
}

impl DashboardService {
    pub fn new(data: Arc<DataManager>) -> Self {
        Self { data }
    }

    /// Resolve a chart slot into its data series and renderer options.
    pub fn build_chart(&self, slot: &ChartSlot) -> (ChartSeries, Value) {
        let records = self.data.records();
        match slot.source {
            ChartSource::MonthlyRevenue => {
                let series = aggregate_monthly(&records, Utc::now().date_naive());
                let options = json!({
                    "scales": { "y": { "beginAtZero": true } },
                    "datasets": [{
                        "label": "Monthly Revenue (E)",
                        "borderColor": PRIMARY_COLORS[0],
                        "backgroundColor": "rgba(26, 54, 93, 0.1)",
                        "tension": 0.4,
                        "fill": true
                    }]
                });
                (series, options)
            }
            ChartSource::EntityTotals => {
                let series = aggregate_entity(&records);
                let colors: Vec<&str> = series
                    .labels
                    .iter()
                    .enumerate()
                    .map(|(i, _)| PRIMARY_COLORS[i % PRIMARY_COLORS.len()])
                    .collect();
                (series, json!({ "datasets": [{ "backgroundColor": colors }] }))
            }
            ChartSource::StatusCounts => {
                let series = status_counts(&records);
                (series, json!({ "datasets": [{ "backgroundColor": STATUS_COLORS }] }))
            }
        }
    }
}

/// Sum royalties per calendar month over the six months ending at `today`'s
/// month, oldest first, zero-filled where no records fall.
pub fn aggregate_monthly(records: &[RoyaltyRecord], today: NaiveDate) -> ChartSeries {
    let mut totals: HashMap<(i32, u32), f64> = HashMap::new();
    for record in records {
        let key = (record.date.year(), record.date.month());
        *totals.entry(key).or_insert(0.0) += record.royalties;
    }

    let mut labels = Vec::with_capacity(6);
    let mut values = Vec::with_capacity(6);
    for months_ago in (0..6).rev() {
        let mut year = today.year();
        let mut month = today.month() as i32 - months_ago;
        while month <= 0 {
            month += 12;
            year -= 1;
        }
        labels.push(format!("{} {}", MONTH_ABBR[(month - 1) as usize], year));
        values.push(*totals.get(&(year, month as u32)).unwrap_or(&0.0));
    }

    ChartSeries::new(labels, values)
}

/// Sum royalties per entity and keep the top six by total, descending.
pub fn aggregate_entity(records: &[RoyaltyRecord]) -> ChartSeries {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for record in records {
        *totals.entry(record.entity.as_str()).or_insert(0.0) += record.royalties;
    }

    let mut entries: Vec<(&str, f64)> = totals.into_iter().collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries.truncate(6);

    ChartSeries::new(
        entries.iter().map(|(name, _)| name.to_string()).collect(),
        entries.iter().map(|(_, total)| *total).collect(),
    )
}

/// Record counts by payment status, in Paid/Pending/Overdue order.
pub fn status_counts(records: &[RoyaltyRecord]) -> ChartSeries {
    let statuses = [RoyaltyStatus::Paid, RoyaltyStatus::Pending, RoyaltyStatus::Overdue];
    let values = statuses
        .iter()
        .map(|s| records.iter().filter(|r| r.status == *s).count() as f64)
        .collect();

    ChartSeries::new(statuses.iter().map(|s| s.as_str().to_string()).collect(), values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entity: &str, royalties: f64, date: NaiveDate, status: RoyaltyStatus) -> RoyaltyRecord {
        RoyaltyRecord {
            id: 0,
            entity: entity.to_string(),
            mineral: "Coal".to_string(),
            volume: 1.0,
            tariff: royalties,
            royalties,
            date,
            status,
            reference_number: String::new(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_aggregation_is_six_months_zero_filled() {
        let records = vec![
            record("Kwalini Quarry", 100.0, day(2026, 8, 10), RoyaltyStatus::Paid),
            record("Kwalini Quarry", 50.0, day(2026, 8, 20), RoyaltyStatus::Paid),
            record("Maloma Colliery", 75.0, day(2026, 5, 1), RoyaltyStatus::Pending),
            // Outside the window, must not appear.
            record("Ngwenya Mine", 999.0, day(2025, 12, 1), RoyaltyStatus::Paid),
        ];

        let series = aggregate_monthly(&records, day(2026, 8, 28));
        assert_eq!(series.labels.len(), 6);
        assert_eq!(
            series.labels,
            vec!["Mar 2026", "Apr 2026", "May 2026", "Jun 2026", "Jul 2026", "Aug 2026"]
        );
        assert_eq!(series.values, vec![0.0, 0.0, 75.0, 0.0, 0.0, 150.0]);
    }

    #[test]
    fn test_monthly_aggregation_crosses_year_boundary() {
        let series = aggregate_monthly(&[], day(2026, 2, 1));
        assert_eq!(series.labels[0], "Sep 2025");
        assert_eq!(series.labels[5], "Feb 2026");
        assert!(series.values.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_entity_aggregation_takes_top_six_descending() {
        let mut records = Vec::new();
        for (i, name) in ["a", "b", "c", "d", "e", "f", "g", "h"].iter().enumerate() {
            records.push(record(name, (i + 1) as f64 * 10.0, day(2026, 8, 1), RoyaltyStatus::Paid));
        }

        let series = aggregate_entity(&records);
        assert_eq!(series.labels.len(), 6);
        assert_eq!(series.labels[0], "h");
        assert_eq!(series.values, vec![80.0, 70.0, 60.0, 50.0, 40.0, 30.0]);
    }

    #[test]
    fn test_entity_aggregation_sums_per_entity() {
        let records = vec![
            record("Kwalini Quarry", 100.0, day(2026, 8, 1), RoyaltyStatus::Paid),
            record("Kwalini Quarry", 40.0, day(2026, 7, 1), RoyaltyStatus::Paid),
            record("Ngwenya Mine", 60.0, day(2026, 8, 1), RoyaltyStatus::Paid),
        ];

        let series = aggregate_entity(&records);
        assert_eq!(series.labels, vec!["Kwalini Quarry", "Ngwenya Mine"]);
        assert_eq!(series.values, vec![140.0, 60.0]);
    }

    #[test]
    fn test_status_counts() {
        let records = vec![
            record("a", 1.0, day(2026, 8, 1), RoyaltyStatus::Paid),
            record("b", 1.0, day(2026, 8, 1), RoyaltyStatus::Paid),
            record("c", 1.0, day(2026, 8, 1), RoyaltyStatus::Overdue),
        ];

        let series = status_counts(&records);
        assert_eq!(series.labels, vec!["Paid", "Pending", "Overdue"]);
        assert_eq!(series.values, vec![2.0, 0.0, 1.0]);
    }
}
