pub mod welfare;

pub use welfare::{Welfare, WelfareStatus, WelfareWithMember};
