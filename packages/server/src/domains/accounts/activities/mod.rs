//! Accounts activities - business logic for user records

mod register_member;
mod update_profile;

pub use register_member::register_member;
pub use update_profile::update_profile;
