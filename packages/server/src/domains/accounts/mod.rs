//! Accounts domain - members, office holders and their profiles

pub mod activities;
pub mod data;
pub mod models;

pub use data::{ProfileForm, RegisterMemberForm, UserData};
pub use models::User;
