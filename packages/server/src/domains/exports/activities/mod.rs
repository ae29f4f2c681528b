mod export;

pub use export::{export, Dataset, ExportFile, ExportFormat};
