use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::common::{Actor, Capability, PortalResult};
use crate::domains::contributions::models::Contribution;
use crate::domains::exports::{csv, pdf};
use crate::domains::loans::models::Loan;
use crate::domains::welfare::models::Welfare;
use crate::kernel::ServerDeps;

/// Path segment of `/export/{dataset}/{format}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Contributions,
    Loans,
    Welfare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl Dataset {
    /// Contributions gate CSV and PDF separately; the others share one capability.
    pub fn capability(&self, format: ExportFormat) -> Capability {
        match (self, format) {
            (Dataset::Contributions, ExportFormat::Csv) => Capability::ExportContributionsCsv,
            (Dataset::Contributions, ExportFormat::Pdf) => Capability::ExportContributionsPdf,
            (Dataset::Loans, _) => Capability::ExportLoans,
            (Dataset::Welfare, _) => Capability::ExportWelfare,
        }
    }

    pub fn file_name(&self, format: ExportFormat) -> &'static str {
        match (self, format) {
            (Dataset::Contributions, ExportFormat::Csv) => "contributions.csv",
            (Dataset::Contributions, ExportFormat::Pdf) => "Contributions_Report.pdf",
            (Dataset::Loans, ExportFormat::Csv) => "loans.csv",
            (Dataset::Loans, ExportFormat::Pdf) => "Loans_Report.pdf",
            (Dataset::Welfare, ExportFormat::Csv) => "welfare.csv",
            (Dataset::Welfare, ExportFormat::Pdf) => "Welfare_Report.pdf",
        }
    }

    fn report_title(&self) -> &'static str {
        match self {
            Dataset::Contributions => "Contributions Report",
            Dataset::Loans => "Loan Report",
            Dataset::Welfare => "Welfare Report",
        }
    }
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// A rendered download
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

fn render_pdf(
    dataset: Dataset,
    columns: &[pdf::Column],
    rows: Vec<Vec<String>>,
    today: NaiveDate,
    deps: &ServerDeps,
) -> anyhow::Result<Vec<u8>> {
    pdf::PdfReport {
        organization: &deps.organization_name,
        title: dataset.report_title(),
        generated_on: today,
        columns,
        rows,
    }
    .render()
}

/// Render `dataset` as `format` for a permitted role.
pub async fn export(
    actor: Actor,
    dataset: Dataset,
    format: ExportFormat,
    today: NaiveDate,
    deps: &ServerDeps,
) -> PortalResult<ExportFile> {
    actor.can(dataset.capability(format)).check()?;
    let pool = &deps.db_pool;

    let (bytes, row_count) = match dataset {
        Dataset::Contributions => {
            let rows = Contribution::find_all_with_members(pool).await?;
            let bytes = match format {
                ExportFormat::Csv => csv::contributions_csv(&rows)?,
                ExportFormat::Pdf => render_pdf(
                    dataset,
                    &pdf::CONTRIBUTION_COLUMNS,
                    pdf::contribution_rows(&rows),
                    today,
                    deps,
                )?,
            };
            (bytes, rows.len())
        }
        Dataset::Loans => {
            let rows = Loan::find_all_with_members(pool).await?;
            let bytes = match format {
                ExportFormat::Csv => csv::loans_csv(&rows)?,
                ExportFormat::Pdf => {
                    render_pdf(dataset, &pdf::LOAN_COLUMNS, pdf::loan_rows(&rows), today, deps)?
                }
            };
            (bytes, rows.len())
        }
        Dataset::Welfare => {
            let rows = Welfare::find_all_with_members(pool).await?;
            let bytes = match format {
                ExportFormat::Csv => csv::welfare_csv(&rows)?,
                ExportFormat::Pdf => render_pdf(
                    dataset,
                    &pdf::WELFARE_COLUMNS,
                    pdf::welfare_rows(&rows),
                    today,
                    deps,
                )?,
            };
            (bytes, rows.len())
        }
    };

    let file_name = dataset.file_name(format);
    info!(
        actor_id = %actor.id(),
        file_name,
        rows = row_count,
        size = bytes.len(),
        "Export generated"
    );

    Ok(ExportFile {
        file_name,
        content_type: format.content_type(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::auth::policy::allows;
    use crate::common::Role;

    #[test]
    fn test_contribution_pdf_is_gated_separately() {
        let csv = Dataset::Contributions.capability(ExportFormat::Csv);
        let pdf = Dataset::Contributions.capability(ExportFormat::Pdf);
        assert!(allows(Role::Secretary, csv));
        assert!(!allows(Role::Secretary, pdf));
    }

    #[test]
    fn test_welfare_officer_exports_welfare_only() {
        assert!(allows(Role::Welfare, Dataset::Welfare.capability(ExportFormat::Pdf)));
        assert!(!allows(Role::Welfare, Dataset::Loans.capability(ExportFormat::Csv)));
        assert!(!allows(
            Role::Welfare,
            Dataset::Contributions.capability(ExportFormat::Csv)
        ));
    }

    #[test]
    fn test_members_export_nothing() {
        for dataset in [Dataset::Contributions, Dataset::Loans, Dataset::Welfare] {
            for format in [ExportFormat::Csv, ExportFormat::Pdf] {
                assert!(!allows(Role::Member, dataset.capability(format)));
            }
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(Dataset::Loans.file_name(ExportFormat::Pdf), "Loans_Report.pdf");
        assert_eq!(Dataset::Welfare.file_name(ExportFormat::Csv), "welfare.csv");
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
    }
}
