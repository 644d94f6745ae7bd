// In-memory royalty record store feeding the dashboard
use crate::domain::royalty::{RoyaltyRecord, RoyaltyStatus};
use chrono::{Datelike, NaiveDate};
use std::sync::Mutex;

/// Form payload for a new dashboard royalty record. The royalty amount is
/// computed from volume and tariff, never supplied by the caller.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewRoyaltyRecord {
    pub entity: String,
    pub mineral: String,
    pub volume: f64,
    pub tariff: f64,
    pub date: NaiveDate,
    pub status: RoyaltyStatus,
}

/// Holds the royalty records the dashboard charts read. This store is
/// separate from the SQLite `royalties` table on purpose; the two were never
/// integrated upstream and the split is preserved.
pub struct DataManager {
    records: Mutex<Vec<RoyaltyRecord>>,
    next_id: Mutex<u32>,
}

impl DataManager {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    /// Seed with the Eswatini demo entities, dated over the trailing months
    /// so the dashboard has something to aggregate.
    pub fn with_sample_data(today: NaiveDate) -> Self {
        let manager = Self::new();
        let samples: [(&str, &str, f64, f64, u32, RoyaltyStatus); 8] = [
            ("Kwalini Quarry", "Quarried Stone", 1250.0, 15.0, 5, RoyaltyStatus::Paid),
            ("Maloma Colliery", "Coal", 3200.0, 12.0, 4, RoyaltyStatus::Paid),
            ("Ngwenya Mine", "Iron Ore", 640.0, 25.0, 4, RoyaltyStatus::Pending),
            ("Mbabane Quarry", "Gravel", 890.0, 10.0, 3, RoyaltyStatus::Paid),
            ("Sidvokodvo Quarry", "River Sand", 1500.0, 8.0, 2, RoyaltyStatus::Overdue),
            ("Kwalini Quarry", "Quarried Stone", 980.0, 15.0, 1, RoyaltyStatus::Pending),
            ("Maloma Colliery", "Coal", 2750.0, 12.0, 0, RoyaltyStatus::Pending),
            ("Piggs Peak Mine", "Iron Ore", 410.0, 25.0, 0, RoyaltyStatus::Paid),
        ];

        for (entity, mineral, volume, tariff, months_ago, status) in samples {
            manager.add_record(NewRoyaltyRecord {
                entity: entity.to_string(),
                mineral: mineral.to_string(),
                volume,
                tariff,
                date: months_back(today, months_ago),
                status,
            });
        }
        manager
    }

    pub fn records(&self) -> Vec<RoyaltyRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn add_record(&self, input: NewRoyaltyRecord) -> RoyaltyRecord {
        let id = {
            let mut next = self.next_id.lock().unwrap_or_else(|e| e.into_inner());
            let id = *next;
            *next += 1;
            id
        };

        let record = RoyaltyRecord {
            id,
            royalties: RoyaltyRecord::computed_royalties(input.volume, input.tariff),
            reference_number: format!("ROY-{}-{:03}", input.date.year(), id),
            entity: input.entity,
            mineral: input.mineral,
            volume: input.volume,
            tariff: input.tariff,
            date: input.date,
            status: input.status,
        };

        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
        record
    }
}

impl Default for DataManager {
    fn default() -> Self {
        Self::new()
    }
}

/// First-of-month-anchored date `n` calendar months before `today`.
pub fn months_back(today: NaiveDate, n: u32) -> NaiveDate {
    let mut year = today.year();
    let mut month = today.month() as i32 - n as i32;
    while month <= 0 {
        month += 12;
        year -= 1;
    }
    NaiveDate::from_ymd_opt(year, month as u32, 15).unwrap_or(today)
}
