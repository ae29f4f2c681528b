//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod media;
pub mod notification_hub;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use media::{MediaStore, StoredFile};
pub use notification_hub::{NotificationEvent, NotificationHub};
pub use test_dependencies::{FailingNotifier, MockNotifier};
pub use traits::*;
