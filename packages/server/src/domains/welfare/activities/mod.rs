mod record_welfare;
mod update_status;

pub use record_welfare::record_welfare;
pub use update_status::set_welfare_status;
