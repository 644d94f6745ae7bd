// Domain layer - Core data types, no I/O
pub mod chart;
pub mod contract;
pub mod royalty;
pub mod section;
pub mod user;
