//! Dashboard domain - read-only aggregation for members and the committee

pub mod activities;
pub mod data;

pub use data::{CommitteeDashboard, MemberDashboard};
