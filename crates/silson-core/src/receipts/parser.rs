use super::mapping::{facility_for, treatment_type_for};
use super::normalizer::{normalize_cell, parse_amount};
use super::record::{ReceiptRecord, RowIssue};
use crate::reimbursement::{CostBreakdown, TreatmentContext, TreatmentType};
use chrono::{Duration, NaiveDate};
use std::io::Read;

pub(crate) const COLUMN_COUNT: usize = 9;

const DATE: usize = 0;
const TREATMENT_TYPE: usize = 1;
const FACILITY: usize = 2;
const PAY_SELF: usize = 3;
const PAY_NHIS: usize = 4;
const PAY_FULL: usize = 5;
const NON_PAY_SELECT: usize = 6;
const NON_PAY_OTHER: usize = 7;
const DISEASE_CODE: usize = 8;

/// Largest serial day spreadsheets support (9999-12-31).
const MAX_SERIAL_DAY: f64 = 2_958_465.0;

pub(crate) fn parse_records<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<Vec<ReceiptRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.byte_records() {
        let row = row?;
        let mut issues = Vec::new();
        let cells: Vec<String> = (0..COLUMN_COUNT)
            .map(|index| match row.get(index) {
                Some(bytes) => decode_cell(bytes, index, &mut issues),
                None => String::new(),
            })
            .collect();

        if cells.iter().all(String::is_empty) {
            continue;
        }

        let source_line = row.position().map(|position| position.line());
        records.push(parse_row(&cells, source_line, issues));
    }

    Ok(records)
}

/// Cells that are not UTF-8 are flagged and decoded lossily for display.
fn decode_cell(bytes: &[u8], index: usize, issues: &mut Vec<RowIssue>) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => normalize_cell(text),
        Err(_) => {
            issues.push(RowIssue::InvalidEncoding { column: index + 1 });
            normalize_cell(&String::from_utf8_lossy(bytes))
        }
    }
}

fn parse_row(
    cells: &[String],
    source_line: Option<u64>,
    mut issues: Vec<RowIssue>,
) -> ReceiptRecord {

    let date = parse_receipt_date(&cells[DATE]);
    if date.is_none() {
        issues.push(RowIssue::InvalidDate {
            value: cells[DATE].clone(),
        });
    }

    let treatment_type = treatment_type_for(&cells[TREATMENT_TYPE]).unwrap_or_else(|| {
        issues.push(RowIssue::UnknownTreatmentType {
            value: cells[TREATMENT_TYPE].clone(),
        });
        TreatmentType::Outpatient
    });

    let context = TreatmentContext::new(treatment_type, facility_for(&cells[FACILITY]));
    let disease_code = cells[DISEASE_CODE].clone();

    let mut amount = |field: &'static str, index: usize| {
        parse_amount(&cells[index]).unwrap_or_else(|| {
            issues.push(RowIssue::InvalidAmount {
                field,
                value: cells[index].clone(),
            });
            0
        })
    };

    let costs = CostBreakdown {
        pay_self: amount("pay_self", PAY_SELF),
        pay_nhis: amount("pay_nhis", PAY_NHIS),
        pay_full: amount("pay_full", PAY_FULL),
        non_pay_select: amount("non_pay_select", NON_PAY_SELECT),
        non_pay_other: amount("non_pay_other", NON_PAY_OTHER),
    };

    if issues.is_empty() {
        ReceiptRecord {
            source_line,
            ..ReceiptRecord::new(date, context, disease_code, costs)
        }
    } else {
        ReceiptRecord::malformed(source_line, context, disease_code, issues)
    }
}

/// Accepts `YYYY-MM-DD` or a spreadsheet serial day number.
pub(crate) fn parse_receipt_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let bytes = trimmed.as_bytes();
    if bytes.len() == 10 && bytes[4] == b'-' && bytes[7] == b'-' {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok();
    }

    let serial: f64 = trimmed.parse().ok()?;
    if !(1.0..=MAX_SERIAL_DAY).contains(&serial) {
        return None;
    }

    // Serial day 25569 is 1970-01-01, which puts day zero on 1899-12-30.
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}
