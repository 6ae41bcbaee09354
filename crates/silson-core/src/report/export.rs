use super::summary::ReceiptLedger;
use crate::config::ImportConfig;
use crate::receipts::TEMPLATE_HEADERS;
use crate::reimbursement::Generation;
use std::io::Write;

const RESULT_HEADERS: [&str; 11] = [
    "번호",
    "진료형태",
    "진료일자",
    "질병코드",
    "의료기관",
    "급여_본인부담",
    "급여_공단부담",
    "급여_전액본인",
    "비급여_선택진료",
    "비급여_이외",
    "진료비총액",
];

const TEMPLATE_SAMPLES: [[&str; 9]; 2] = [
    [
        "2024-02-09", "통원", "의원", "15000", "30000", "0", "0", "2000", "J20",
    ],
    [
        "2024-02-10", "입원", "병원", "50000", "100000", "0", "10000", "0", "A00",
    ],
];

fn sheet_writer<W: Write>(writer: W, config: &ImportConfig) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(writer)
}

/// Writes the blank input sheet with two example receipts, using the same
/// delimiter the importer expects.
pub fn write_template<W: Write>(writer: W, config: &ImportConfig) -> Result<(), csv::Error> {
    let mut csv_writer = sheet_writer(writer, config);
    csv_writer.write_record(TEMPLATE_HEADERS)?;
    for sample in TEMPLATE_SAMPLES {
        csv_writer.write_record(sample)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes one line per receipt with its inputs and the payout of every
/// generation. Malformed rows keep their zeroed amounts.
pub fn write_results<W: Write>(
    ledger: &ReceiptLedger,
    writer: W,
    config: &ImportConfig,
) -> Result<(), csv::Error> {
    let mut csv_writer = sheet_writer(writer, config);

    let mut headers: Vec<String> = RESULT_HEADERS.iter().map(|h| h.to_string()).collect();
    headers.extend(
        Generation::ordered()
            .into_iter()
            .map(|generation| format!("{}_예상지급액", generation.label())),
    );
    csv_writer.write_record(&headers)?;

    for row in ledger.summary().rows {
        let mut line = vec![
            row.index.to_string(),
            row.treatment_label,
            row.date,
            row.disease_code,
            row.facility_label.to_string(),
            row.costs.pay_self.to_string(),
            row.costs.pay_nhis.to_string(),
            row.costs.pay_full.to_string(),
            row.costs.non_pay_select.to_string(),
            row.costs.non_pay_other.to_string(),
            row.total_cost.to_string(),
        ];
        line.extend(row.payouts.iter().map(|(_, amount)| amount.to_string()));
        csv_writer.write_record(&line)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipts::ReceiptImporter;
    use crate::reimbursement::ReimbursementEngine;
    use std::io::Cursor;

    #[test]
    fn template_reimports_as_valid_receipts() {
        let mut buffer = Vec::new();
        write_template(&mut buffer, &ImportConfig::default())
            .expect("template writes");

        let records = ReceiptImporter::default()
            .from_reader(Cursor::new(buffer))
            .expect("template imports");

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|record| record.is_valid()));
        assert_eq!(records[1].costs.pay_nhis, 100_000);
    }

    #[test]
    fn results_include_payout_columns() {
        let csv = "h\n2024-02-09,통원,의원,60000,0,0,0,0,J20\n2024-02-10,톱원,의원,60000,0,0,0,0,J20\n";
        let records = ReceiptImporter::default()
            .from_reader(Cursor::new(csv))
            .expect("import succeeds");
        let ledger = ReceiptLedger::evaluate(records, &ReimbursementEngine::new());

        let mut buffer = Vec::new();
        write_results(&ledger, &mut buffer, &ImportConfig::default())
            .expect("results write");
        let output = String::from_utf8(buffer).expect("utf8 output");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("1세대_예상지급액,2세대_예상지급액,3세대_예상지급액,4세대_예상지급액"));
        assert_eq!(
            lines[1],
            "1,통원,2024-02-09,J20,의원,60000,0,0,0,0,60000,55000,50000,50000,48000"
        );
        assert_eq!(lines[2], "2,통원 (오타),-,J20,의원,0,0,0,0,0,0,0,0,0,0");
    }

    #[test]
    fn template_follows_configured_delimiter() {
        let config = ImportConfig { delimiter: b';' };
        let mut buffer = Vec::new();
        write_template(&mut buffer, &config).expect("template writes");

        let text = String::from_utf8(buffer.clone()).expect("utf8 output");
        assert!(text.starts_with("진료일자;진료형태(통원/입원);의료기관"));

        let records = ReceiptImporter::new(&config)
            .from_reader(Cursor::new(buffer))
            .expect("template imports");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|record| record.is_valid()));
    }
}
