mod committee;
mod member;

pub use committee::committee_dashboard;
pub use member::member_dashboard;
