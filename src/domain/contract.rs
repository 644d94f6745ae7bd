// Contract domain model
use serde::{Deserialize, Serialize};

/// A mining contract between two parties, persisted by the backend.
/// Field names on the wire match the historical schema (partyA, startDate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "partyA")]
    pub party_a: String,
    #[serde(rename = "partyB")]
    pub party_b: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}

/// Payload for creating or updating a contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractInput {
    pub title: String,
    pub description: String,
    #[serde(rename = "partyA")]
    pub party_a: String,
    #[serde(rename = "partyB")]
    pub party_b: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}
