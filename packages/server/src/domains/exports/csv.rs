//! CSV renderings of the export datasets.

use anyhow::Result;
use ::csv::WriterBuilder;

use crate::common::vocabulary::capitalize;
use crate::domains::contributions::models::ContributionWithMember;
use crate::domains::loans::models::LoanWithMember;
use crate::domains::welfare::models::WelfareWithMember;

pub const CONTRIBUTION_HEADERS: [&str; 4] = ["Member", "Amount (Ksh)", "Month", "Created At"];
pub const LOAN_HEADERS: [&str; 5] = ["Member", "Amount (Ksh)", "Status", "Loan Date", "Due Date"];
pub const WELFARE_HEADERS: [&str; 5] = ["Member", "Amount (Ksh)", "Description", "Status", "Date Given"];

fn write_rows<const N: usize>(headers: [&str; N], rows: impl Iterator<Item = [String; N]>) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))
}

pub fn contributions_csv(rows: &[ContributionWithMember]) -> Result<Vec<u8>> {
    write_rows(
        CONTRIBUTION_HEADERS,
        rows.iter().map(|row| {
            [
                row.member.username.clone(),
                format!("{:.2}", row.contribution.amount),
                row.contribution.month.format("%b %Y").to_string(),
                row.contribution.created_at.format("%Y-%m-%d").to_string(),
            ]
        }),
    )
}

pub fn loans_csv(rows: &[LoanWithMember]) -> Result<Vec<u8>> {
    write_rows(
        LOAN_HEADERS,
        rows.iter().map(|row| {
            [
                row.member.username.clone(),
                format!("{:.2}", row.loan.amount),
                capitalize(row.loan.status.as_str()),
                row.loan.loan_date.format("%Y-%m-%d").to_string(),
                row.loan.due_date.format("%Y-%m-%d").to_string(),
            ]
        }),
    )
}

pub fn welfare_csv(rows: &[WelfareWithMember]) -> Result<Vec<u8>> {
    write_rows(
        WELFARE_HEADERS,
        rows.iter().map(|row| {
            [
                row.member.username.clone(),
                format!("{:.2}", row.welfare.amount),
                row.welfare.description.clone(),
                capitalize(row.welfare.status.as_str()),
                row.welfare.date_given.format("%Y-%m-%d").to_string(),
            ]
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{UserId, WelfareId};
    use crate::domains::accounts::models::MemberName;
    use crate::domains::loans::models::{Loan, LoanStatus};
    use crate::domains::welfare::models::{Welfare, WelfareStatus};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn member(username: &str) -> MemberName {
        MemberName {
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    #[test]
    fn test_loans_csv() {
        let mut loan = Loan::new_application(
            UserId::new(),
            Decimal::from(1500),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        );
        loan.apply_status(LoanStatus::Approved);

        let bytes = loans_csv(&[LoanWithMember {
            loan,
            member: member("akinyi"),
        }])
        .unwrap();

        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "Member,Amount (Ksh),Status,Loan Date,Due Date\nakinyi,1500.00,Approved,2025-01-31,2025-02-28\n"
        );
    }

    #[test]
    fn test_welfare_csv_quotes_and_capitalizes() {
        let welfare = Welfare {
            id: WelfareId::new(),
            member_id: UserId::new(),
            description: "Medical, Kenyatta hospital".into(),
            amount: Decimal::new(250050, 2),
            date_given: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
            approved_by: None,
            status: WelfareStatus::PartiallyPaid,
        };

        let bytes = welfare_csv(&[WelfareWithMember {
            welfare,
            member: member("baraka"),
        }])
        .unwrap();

        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Member,Amount (Ksh),Description,Status,Date Given"));
        assert_eq!(
            lines.next(),
            Some("baraka,2500.50,\"Medical, Kenyatta hospital\",Partially paid,2025-02-14")
        );
    }

    #[test]
    fn test_empty_export_has_headers_only() {
        let text = String::from_utf8(contributions_csv(&[]).unwrap()).unwrap();
        assert_eq!(text, "Member,Amount (Ksh),Month,Created At\n");
    }
}
