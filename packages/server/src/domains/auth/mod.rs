//! Auth domain - credential checks and token issuance
//!
//! Responsibilities:
//! - Password hashing and verification
//! - JWT creation and verification
//! - Login (username + password → token)

pub mod activities;
pub mod jwt;
pub mod password;

pub use activities::{login, LoginData};
pub use jwt::{Claims, JwtService};
