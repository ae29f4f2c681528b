// Common types and utilities shared across the application

pub mod auth;
pub mod confirmation;
pub mod entity_ids;
pub mod error;
pub mod id;
pub mod money;
pub mod vocabulary;

pub use auth::{Actor, AuthError, Capability, Role};
pub use confirmation::Confirmed;
pub use entity_ids::*;
pub use error::{PortalError, PortalResult};
pub use id::Id;
