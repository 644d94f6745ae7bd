// Royalty domain models
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payment status of a royalty record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoyaltyStatus {
    Paid,
    Pending,
    Overdue,
}

impl RoyaltyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoyaltyStatus::Paid => "Paid",
            RoyaltyStatus::Pending => "Pending",
            RoyaltyStatus::Overdue => "Overdue",
        }
    }
}

/// A single mineral-extraction billing entry as the dashboard sees it.
/// The royalty amount is derived from volume and tariff at creation time
/// and stored, never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoyaltyRecord {
    pub id: u32,
    pub entity: String,
    pub mineral: String,
    pub volume: f64,
    pub tariff: f64,
    pub royalties: f64,
    pub date: NaiveDate,
    pub status: RoyaltyStatus,
    pub reference_number: String,
}

impl RoyaltyRecord {
    pub fn computed_royalties(volume: f64, tariff: f64) -> f64 {
        volume * tariff
    }
}

/// A royalty row as persisted by the backend. The persisted shape predates
/// the dashboard model and was never reconciled with it; both are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Royalty {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    pub date: String,
    pub recipient: String,
    pub status: String,
}

/// Payload for creating or updating a persisted royalty row.
#[derive(Debug, Clone, Deserialize)]
pub struct RoyaltyInput {
    pub title: String,
    pub amount: f64,
    pub date: String,
    pub recipient: String,
    pub status: String,
}
