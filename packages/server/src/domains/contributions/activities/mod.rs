mod record_contribution;
mod update_status;

pub use record_contribution::record_contribution;
pub use update_status::set_contribution_status;
