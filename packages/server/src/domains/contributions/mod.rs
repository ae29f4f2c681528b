//! Contributions domain - monthly member payments

pub mod activities;
pub mod data;
pub mod models;

pub use data::{ContributionData, ContributionForm};
pub use models::{Contribution, ContributionStatus};
