//! Authorization for the portal.
//!
//! Which role may do what lives in one declarative table ([`policy::POLICY`]).
//! Handlers never compare roles themselves; they ask the gate:
//!
//! ```rust
//! use portal_core::common::auth::{Actor, Capability, Role};
//! use portal_core::common::UserId;
//!
//! let result = Actor::new(UserId::new(), Role::Treasurer)
//!     .can(Capability::SetLoanStatus)
//!     .check();
//! assert!(result.is_err());
//! ```

mod builder;
mod errors;
pub mod policy;
mod role;

pub use builder::{Actor, CapabilityBuilder};
pub use errors::AuthError;
pub use policy::Capability;
pub use role::Role;
