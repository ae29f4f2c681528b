//! PDF reports: branded A4 header, fixed-position columns, paged rows.
//!
//! Coordinates are in points from the bottom-left corner of the page.

use std::ops::Range;

use anyhow::Result;
use chrono::NaiveDate;
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Pt,
};

use crate::common::money::format_amount;
use crate::common::vocabulary::capitalize;
use crate::domains::contributions::models::ContributionWithMember;
use crate::domains::loans::models::LoanWithMember;
use crate::domains::welfare::models::WelfareWithMember;

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;

const ROW_PITCH: f32 = 15.0;
const HEADER_GAP: f32 = 20.0;
const BOTTOM_MARGIN: f32 = 50.0;
/// Column header baseline on the first page, below the branding
const FIRST_PAGE_HEADER_OFFSET: f32 = 130.0;
/// Column header baseline on continuation pages
const NEXT_PAGE_HEADER_OFFSET: f32 = 50.0;
const DESCRIPTION_LIMIT: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: &'static str,
    pub x: f32,
}

const fn column(header: &'static str, x: f32) -> Column {
    Column { header, x }
}

pub const CONTRIBUTION_COLUMNS: [Column; 4] = [
    column("Member", 50.0),
    column("Amount", 200.0),
    column("Month", 300.0),
    column("Date Added", 400.0),
];

pub const WELFARE_COLUMNS: [Column; 5] = [
    column("Member", 50.0),
    column("Amount (Ksh)", 180.0),
    column("Status", 280.0),
    column("Description", 360.0),
    column("Date Given", 500.0),
];

pub const LOAN_COLUMNS: [Column; 5] = [
    column("Member", 50.0),
    column("Amount", 180.0),
    column("Status", 260.0),
    column("Loan Date", 340.0),
    column("Due Date", 440.0),
];

/// Rows placed on one page, with the baseline of its column headers
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub header_y: f32,
    pub rows: Range<usize>,
}

/// Split `row_count` rows into pages. The cursor drops by the row pitch after
/// each row and a new page starts once it falls below the bottom margin.
pub fn layout_pages(row_count: usize, page_height: f32) -> Vec<PageLayout> {
    let mut pages = Vec::new();
    let mut header_y = page_height - FIRST_PAGE_HEADER_OFFSET;
    let mut start = 0;

    loop {
        let mut y = header_y - HEADER_GAP;
        let mut end = start;
        while end < row_count {
            end += 1;
            y -= ROW_PITCH;
            if y < BOTTOM_MARGIN {
                break;
            }
        }
        pages.push(PageLayout {
            header_y,
            rows: start..end,
        });
        if end >= row_count {
            return pages;
        }
        start = end;
        header_y = page_height - NEXT_PAGE_HEADER_OFFSET;
    }
}

/// Cut to 30 characters plus "..." when longer.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_LIMIT {
        let cut: String = description.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{}...", cut)
    } else {
        description.to_string()
    }
}

/// A tabular report ready to render
#[derive(Debug, Clone)]
pub struct PdfReport<'a> {
    pub organization: &'a str,
    pub title: &'a str,
    pub generated_on: NaiveDate,
    pub columns: &'a [Column],
    pub rows: Vec<Vec<String>>,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

fn pt(value: f32) -> Mm {
    Mm::from(Pt(value))
}

impl PdfReport<'_> {
    pub fn render(&self) -> Result<Vec<u8>> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(self.title, pt(PAGE_WIDTH), pt(PAGE_HEIGHT), "Layer 1");
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
            oblique: doc.add_builtin_font(BuiltinFont::HelveticaOblique)?,
        };

        for (index, page) in layout_pages(self.rows.len(), PAGE_HEIGHT).into_iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                new_page(&doc)
            };

            if index == 0 {
                self.draw_branding(&layer, &fonts);
            }
            self.draw_page(&layer, &fonts, &page);
            layer.use_text(
                format!("© {}", self.organization),
                8.0,
                pt(200.0),
                pt(30.0),
                &fonts.oblique,
            );
        }

        Ok(doc.save_to_bytes()?)
    }

    fn draw_branding(&self, layer: &PdfLayerReference, fonts: &Fonts) {
        layer.use_text(self.organization, 16.0, pt(120.0), pt(PAGE_HEIGHT - 50.0), &fonts.bold);
        layer.use_text(self.title, 12.0, pt(120.0), pt(PAGE_HEIGHT - 70.0), &fonts.regular);
        layer.add_line(Line {
            points: vec![
                (Point::new(pt(40.0), pt(PAGE_HEIGHT - 85.0)), false),
                (Point::new(pt(PAGE_WIDTH - 40.0), pt(PAGE_HEIGHT - 85.0)), false),
            ],
            is_closed: false,
        });
        layer.use_text(
            format!("Generated on: {}", self.generated_on.format("%B %d, %Y")),
            8.0,
            pt(50.0),
            pt(PAGE_HEIGHT - 100.0),
            &fonts.oblique,
        );
    }

    fn draw_page(&self, layer: &PdfLayerReference, fonts: &Fonts, page: &PageLayout) {
        for column in self.columns {
            layer.use_text(column.header, 10.0, pt(column.x), pt(page.header_y), &fonts.bold);
        }

        let mut y = page.header_y - HEADER_GAP;
        for row in &self.rows[page.rows.clone()] {
            for (column, cell) in self.columns.iter().zip(row) {
                if !cell.is_empty() {
                    layer.use_text(cell.as_str(), 9.0, pt(column.x), pt(y), &fonts.regular);
                }
            }
            y -= ROW_PITCH;
        }
    }
}

fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(pt(PAGE_WIDTH), pt(PAGE_HEIGHT), "Layer 1");
    doc.get_page(page).get_layer(layer)
}

pub fn contribution_rows(rows: &[ContributionWithMember]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            vec![
                row.member.username.clone(),
                format_amount(row.contribution.amount),
                row.contribution.month.format("%b %Y").to_string(),
                row.contribution.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect()
}

pub fn welfare_rows(rows: &[WelfareWithMember]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            vec![
                row.member.username.clone(),
                format_amount(row.welfare.amount),
                capitalize(row.welfare.status.as_str()),
                truncate_description(&row.welfare.description),
                row.welfare.date_given.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect()
}

pub fn loan_rows(rows: &[LoanWithMember]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            vec![
                row.member.username.clone(),
                format_amount(row.loan.amount),
                capitalize(row.loan.status.as_str()),
                row.loan.loan_date.format("%Y-%m-%d").to_string(),
                row.loan.due_date.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_layout() {
        let pages = layout_pages(10, PAGE_HEIGHT);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].rows, 0..10);
        assert_eq!(pages[0].header_y, PAGE_HEIGHT - 130.0);
    }

    #[test]
    fn test_empty_report_still_has_a_page() {
        let pages = layout_pages(0, PAGE_HEIGHT);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].rows.is_empty());
    }

    #[test]
    fn test_rows_never_drawn_below_margin() {
        let pages = layout_pages(200, PAGE_HEIGHT);
        assert!(pages.len() > 1);

        let mut next = 0;
        for page in &pages {
            assert_eq!(page.rows.start, next);
            let last_row_y =
                page.header_y - HEADER_GAP - ROW_PITCH * (page.rows.len() as f32 - 1.0);
            assert!(last_row_y >= BOTTOM_MARGIN, "{page:?}");
            next = page.rows.end;
        }
        assert_eq!(next, 200);
        assert_eq!(pages[1].header_y, PAGE_HEIGHT - 50.0);
    }

    #[test]
    fn test_first_page_capacity() {
        // header at 711.89, first row at 691.89, last row above 50
        let pages = layout_pages(100, PAGE_HEIGHT);
        assert_eq!(pages[0].rows, 0..43);
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("Burial support"), "Burial support");
        let exact = "a".repeat(30);
        assert_eq!(truncate_description(&exact), exact);
        assert_eq!(
            truncate_description("School fees for three children at Kisumu"),
            "School fees for three children..."
        );
    }

    #[test]
    fn test_render_produces_pdf() {
        let report = PdfReport {
            organization: "Tambul Hustle Youth Group",
            title: "Loan Report",
            generated_on: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            columns: &LOAN_COLUMNS,
            rows: (0..60)
                .map(|i| {
                    vec![
                        format!("member{i}"),
                        "1,500.00".into(),
                        "Pending".into(),
                        "2025-03-01".into(),
                        "2025-04-01".into(),
                    ]
                })
                .collect(),
        };

        let bytes = report.render().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
