//! Receipt import from spreadsheet exports.
//!
//! Rows that fail to parse are kept and flagged rather than dropped, so the
//! row count always matches the source sheet.

mod mapping;
mod normalizer;
mod parser;
mod record;

pub use record::{ReceiptRecord, RowIssue};

use crate::config::ImportConfig;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Column headers of the input template, in column order.
pub const TEMPLATE_HEADERS: [&str; parser::COLUMN_COUNT] = [
    "진료일자",
    "진료형태(통원/입원)",
    "의료기관",
    "급여_본인부담금",
    "급여_공단부담금",
    "급여_전액본인부담금",
    "비급여_선택진료료",
    "비급여_선택외",
    "질병코드",
];

#[derive(Debug, thiserror::Error)]
pub enum ReceiptImportError {
    #[error("failed to read receipt sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid receipt CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads receipt rows from CSV in the template column layout.
#[derive(Debug, Clone)]
pub struct ReceiptImporter {
    delimiter: u8,
}

impl Default for ReceiptImporter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ReceiptImporter {
    pub fn new(config: &ImportConfig) -> Self {
        Self {
            delimiter: config.delimiter,
        }
    }

    pub fn from_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<ReceiptRecord>, ReceiptImportError> {
        let file = std::fs::File::open(path)?;
        self.from_reader(file)
    }

    pub fn from_reader<R: Read>(
        &self,
        reader: R,
    ) -> Result<Vec<ReceiptRecord>, ReceiptImportError> {
        let records = parser::parse_records(reader, self.delimiter)?;

        for record in records.iter().filter(|record| !record.is_valid()) {
            warn!(
                line = record.source_line,
                issues = ?record.issues,
                "receipt row flagged malformed"
            );
        }

        let malformed = records.iter().filter(|record| !record.is_valid()).count();
        info!(rows = records.len(), malformed, "receipt import finished");

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reimbursement::{Facility, TreatmentType};
    use std::io::Cursor;

    const SAMPLE: &str = "진료일자,진료형태(통원/입원),의료기관,급여_본인부담금,급여_공단부담금,급여_전액본인부담금,비급여_선택진료료,비급여_선택외,질병코드\n\
2024-02-09,통원,의원,15000,30000,0,0,2000,J20\n\
,,,,,,,,\n\
2024-02-10,입원,병원,\"50,000\",100000,0,10000,0,A00\n";

    #[test]
    fn importer_skips_blank_rows_and_keeps_order() {
        let records = ReceiptImporter::default()
            .from_reader(Cursor::new(SAMPLE))
            .expect("import succeeds");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].context.facility, Facility::Clinic);
        assert_eq!(records[1].context.treatment_type, TreatmentType::Inpatient);
        assert_eq!(records[1].costs.pay_self, 50_000);
        assert_eq!(records[1].source_line, Some(4));
        assert!(records.iter().all(ReceiptRecord::is_valid));
    }

    #[test]
    fn importer_pads_short_rows() {
        let csv = "date,type,facility\n2024-03-01,통원,약국\n";
        let records = ReceiptImporter::default()
            .from_reader(Cursor::new(csv))
            .expect("import succeeds");

        assert_eq!(records.len(), 1);
        assert!(records[0].is_valid());
        assert!(records[0].costs.is_zero());
        assert_eq!(records[0].context.facility, Facility::Pharmacy);
    }

    #[test]
    fn importer_honors_configured_delimiter() {
        let csv = "a;b;c;d;e;f;g;h;i\n2024-03-01;입원;상급종합병원;1000;0;0;0;0;K35\n";
        let importer = ReceiptImporter::new(&ImportConfig { delimiter: b';' });
        let records = importer
            .from_reader(Cursor::new(csv))
            .expect("import succeeds");

        assert_eq!(records[0].context.facility, Facility::Tertiary);
        assert_eq!(records[0].costs.pay_self, 1_000);
        assert_eq!(records[0].disease_code, "K35");
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = ReceiptImporter::default()
            .from_path("./does-not-exist.csv")
            .expect_err("expected io error");

        match error {
            ReceiptImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn template_headers_match_column_layout() {
        assert_eq!(TEMPLATE_HEADERS.len(), 9);
        assert_eq!(TEMPLATE_HEADERS[8], "질병코드");
    }
}
