//! Exports domain - CSV and PDF downloads of contributions, loans and welfare

pub mod activities;
pub mod csv;
pub mod pdf;

pub use activities::{export, Dataset, ExportFile, ExportFormat};
