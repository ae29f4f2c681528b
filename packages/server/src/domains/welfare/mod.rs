//! Welfare domain - disbursements to members in need

pub mod activities;
pub mod data;
pub mod models;

pub use data::{WelfareData, WelfareForm};
pub use models::{Welfare, WelfareStatus};
