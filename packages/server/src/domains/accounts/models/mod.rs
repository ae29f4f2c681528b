pub mod user;

pub use user::{display_name, MemberName, NewUser, ProfileChanges, User};
