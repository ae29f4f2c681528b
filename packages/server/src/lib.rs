// Savings Group Portal - core library
//
// Backend for a member savings group: loans, contributions, welfare, minutes,
// announcements and notifications. Business logic lives in domains/*/activities,
// the HTTP surface in server/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
