pub mod contribution;

pub use contribution::{
    Contribution, ContributionStatus, ContributionWithMember, ContributorTotal, MonthlyTotal,
};
