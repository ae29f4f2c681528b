//! Role → capability policy table.

use super::Role;
use crate::common::vocabulary::text_enum;

text_enum! {
    /// Something a user may be allowed to do.
    pub enum Capability as "capability" {
        ViewCommitteeDashboard => ("view_committee_dashboard", "View committee dashboard"),
        ApplyForLoan => ("apply_loan", "Apply for a loan"),
        SetLoanStatus => ("approve_loan", "Approve or reject loans"),
        SetLoanRepayment => ("update_loan_repayment", "Update loan repayment status"),
        RecordContribution => ("add_contribution", "Record contributions"),
        SetContributionStatus => ("change_contribution", "Update contribution status"),
        RecordWelfare => ("add_welfare", "Record welfare disbursements"),
        SetWelfareStatus => ("change_welfare", "Update welfare status"),
        PostAnnouncement => ("make_announcement", "Publish announcements"),
        PostMeetingNote => ("make_notes", "Post meeting minutes"),
        ExportContributionsCsv => ("export_contributions_csv", "Export contributions (CSV)"),
        ExportContributionsPdf => ("export_contributions_pdf", "Export contributions (PDF)"),
        ExportLoans => ("export_loans", "Export loans"),
        ExportWelfare => ("export_welfare", "Export welfare records"),
        ManageMembers => ("manage_members", "Register members"),
    }
}

use Role::*;

const COMMITTEE_VIEWERS: &[Role] = &[
    Chairperson,
    Treasurer,
    Secretary,
    Welfare,
    Coordinator,
    Admin,
    Committee,
];

/// The complete policy. A capability missing from this table is granted to nobody.
pub const POLICY: &[(Capability, &[Role])] = &[
    (Capability::ViewCommitteeDashboard, COMMITTEE_VIEWERS),
    (Capability::ApplyForLoan, Role::ALL),
    (Capability::SetLoanStatus, &[Chairperson]),
    // Repayment follows the approval gate; see DESIGN.md.
    (Capability::SetLoanRepayment, &[Chairperson]),
    (Capability::RecordContribution, &[Chairperson, Treasurer]),
    (Capability::SetContributionStatus, &[Treasurer]),
    (Capability::RecordWelfare, &[Chairperson, Welfare]),
    (Capability::SetWelfareStatus, &[Welfare]),
    (Capability::PostAnnouncement, &[Coordinator]),
    (Capability::PostMeetingNote, &[Secretary]),
    (
        Capability::ExportContributionsCsv,
        &[Chairperson, Treasurer, Secretary, Admin, Committee],
    ),
    (
        Capability::ExportContributionsPdf,
        &[Chairperson, Treasurer, Admin, Committee],
    ),
    (
        Capability::ExportLoans,
        &[Chairperson, Treasurer, Secretary, Admin, Committee],
    ),
    (
        Capability::ExportWelfare,
        &[Chairperson, Welfare, Treasurer, Admin, Committee],
    ),
    (Capability::ManageMembers, &[Admin]),
];

/// Roles granted `capability`.
pub fn roles_for(capability: Capability) -> &'static [Role] {
    POLICY
        .iter()
        .find(|(granted, _)| *granted == capability)
        .map(|(_, roles)| *roles)
        .unwrap_or(&[])
}

pub fn allows(role: Role, capability: Capability) -> bool {
    roles_for(capability).contains(&role)
}

/// Everything `role` may do, in table order.
pub fn capabilities_of(role: Role) -> Vec<Capability> {
    POLICY
        .iter()
        .filter(|(_, roles)| roles.contains(&role))
        .map(|(capability, _)| *capability)
        .collect()
}

/// Where a user lands after login or after applying for a loan.
pub fn home_path(role: Role) -> &'static str {
    if allows(role, Capability::ViewCommitteeDashboard) {
        "/committee-dashboard"
    } else {
        "/member-dashboard"
    }
}

impl Capability {
    /// Message returned with a 403.
    pub fn denial_message(&self) -> &'static str {
        match self {
            Capability::ViewCommitteeDashboard => "Only committee members can view the committee dashboard.",
            Capability::ApplyForLoan => "You are not allowed to apply for loans.",
            Capability::SetLoanStatus => "You are not authorized to update loan approval status.",
            Capability::SetLoanRepayment => "You are not authorized to update loan repayments.",
            Capability::RecordContribution => "You are not authorized to record contributions.",
            Capability::SetContributionStatus => "You are not authorized to update contributions.",
            Capability::RecordWelfare => "You are not authorized to record welfare disbursements.",
            Capability::SetWelfareStatus => "You are not authorized to update welfare records.",
            Capability::PostAnnouncement => "Only the Coordinator can create announcements.",
            Capability::PostMeetingNote => "Only the Secretary can post meeting minutes.",
            Capability::ExportContributionsCsv | Capability::ExportContributionsPdf => {
                "You are not authorized to export contributions."
            }
            Capability::ExportLoans => "You are not authorized to export loans.",
            Capability::ExportWelfare => "You are not authorized to export welfare records.",
            Capability::ManageMembers => "Only an administrator can register members.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_capability_has_a_row() {
        for capability in Capability::ALL {
            let rows = POLICY.iter().filter(|(c, _)| c == capability).count();
            assert_eq!(rows, 1, "{capability} must appear exactly once");
        }
    }

    #[test]
    fn test_loan_decisions_are_chairperson_only() {
        for role in Role::ALL {
            assert_eq!(
                allows(*role, Capability::SetLoanStatus),
                *role == Chairperson,
                "{role}"
            );
            assert_eq!(
                allows(*role, Capability::SetLoanRepayment),
                *role == Chairperson,
                "{role}"
            );
        }
    }

    #[test]
    fn test_status_updates_have_single_owner() {
        assert_eq!(roles_for(Capability::SetContributionStatus), &[Treasurer]);
        assert_eq!(roles_for(Capability::SetWelfareStatus), &[Welfare]);
        assert_eq!(roles_for(Capability::PostAnnouncement), &[Coordinator]);
        assert_eq!(roles_for(Capability::PostMeetingNote), &[Secretary]);
    }

    #[test]
    fn test_secretary_exports_csv_but_not_contribution_pdf() {
        assert!(allows(Secretary, Capability::ExportContributionsCsv));
        assert!(!allows(Secretary, Capability::ExportContributionsPdf));
        assert!(!allows(Secretary, Capability::ExportWelfare));
    }

    #[test]
    fn test_everyone_may_apply_for_a_loan() {
        for role in Role::ALL {
            assert!(allows(*role, Capability::ApplyForLoan));
        }
    }

    #[test]
    fn test_member_capabilities() {
        assert_eq!(capabilities_of(Member), vec![Capability::ApplyForLoan]);
    }

    #[test]
    fn test_home_path() {
        assert_eq!(home_path(Member), "/member-dashboard");
        assert_eq!(home_path(Treasurer), "/committee-dashboard");
        assert_eq!(home_path(Admin), "/committee-dashboard");
    }
}
