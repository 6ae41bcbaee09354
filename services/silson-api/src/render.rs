use clap::Args;
use silson_core::config::AppConfig;
use silson_core::error::AppError;
use silson_core::receipts::ReceiptImporter;
use silson_core::reimbursement::{
    CostBreakdown, Facility, Generation, GrandTotals, ReimbursementEngine, TreatmentContext,
    TreatmentType, Won,
};
use silson_core::report::{comparison_cards, write_results, write_template, ReceiptLedger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Treatment type: inpatient or outpatient
    #[arg(long = "type")]
    pub(crate) treatment_type: String,
    /// Facility: clinic, hospital, general, tertiary or pharmacy
    #[arg(long)]
    pub(crate) facility: String,
    /// Covered care, patient co-payment
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) pay_self: i64,
    /// Covered care, public insurer share (display only)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) pay_nhis: i64,
    /// Covered care, paid in full by the patient
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) pay_full: i64,
    /// Non-covered care, elective physician fee
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) non_pay_select: i64,
    /// Non-covered care, everything else
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) non_pay_other: i64,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Receipt sheet exported as CSV in the template column layout
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Write per-row results with payout columns to this path
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct TemplateArgs {
    /// Destination for the blank input sheet
    #[arg(long)]
    pub(crate) out: PathBuf,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let treatment_type: TreatmentType = args.treatment_type.parse()?;
    let facility: Facility = args.facility.parse()?;
    let costs = CostBreakdown::from_signed(
        args.pay_self,
        args.pay_nhis,
        args.pay_full,
        args.non_pay_select,
        args.non_pay_other,
    )?;

    let context = TreatmentContext::new(treatment_type, facility);
    let payouts = ReimbursementEngine::new().evaluate(&costs, context);

    println!(
        "{} / {} | 진료비총액 {}",
        treatment_type.label(),
        facility.label(),
        format_won(costs.total_cost())
    );
    println!(
        "급여 기준액 {} | 비급여 기준액 {}",
        format_won(costs.pay_base()),
        format_won(costs.non_pay_base())
    );
    print_comparison(&payouts);
    Ok(())
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let records = ReceiptImporter::new(&config.import).from_path(&args.csv)?;
    let ledger = ReceiptLedger::evaluate(records, &ReimbursementEngine::new());

    println!("Receipt sheet: {}", args.csv.display());
    render_ledger(&ledger);

    if let Some(path) = args.export {
        write_results(&ledger, File::create(&path)?, &config.import)?;
        println!("\nResults written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_template(args: TemplateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    write_template(File::create(&args.out)?, &config.import)?;
    println!("Template written to {}", args.out.display());
    Ok(())
}

fn render_ledger(ledger: &ReceiptLedger) {
    if ledger.is_empty() {
        println!("No receipts found.");
        return;
    }

    let summary = ledger.summary();
    println!(
        "{} receipts ({} malformed)\n",
        summary.rows.len(),
        summary.malformed_rows
    );

    let mut header = format!(
        "{:>3}  {:<10}  {:<10}  {:<8}  {:<8}  {:>12}",
        "#", "진료일자", "진료형태", "의료기관", "질병코드", "진료비총액"
    );
    for generation in Generation::ordered() {
        header.push_str(&format!("  {:>12}", generation.label()));
    }
    println!("{header}");

    for row in &summary.rows {
        let mut line = format!(
            "{:>3}  {:<10}  {:<10}  {:<8}  {:<8}  {:>12}",
            row.index,
            row.date,
            row.treatment_label,
            row.facility_label,
            row.disease_code,
            format_won(row.total_cost)
        );
        for (_, amount) in row.payouts.iter() {
            line.push_str(&format!("  {:>12}", format_won(amount)));
        }
        println!("{line}");

        for issue in &row.issues {
            println!("     ! {issue}");
        }
        if !row.zero_payouts.is_empty() {
            let labels: Vec<&str> = row
                .zero_payouts
                .iter()
                .map(|generation| generation.label())
                .collect();
            println!("     no payout under {}", labels.join(", "));
        }
    }

    let totals = summary.input_totals;
    println!(
        "\n급여 본인부담 {} | 공단부담 {} | 전액본인 {} | 비급여 선택진료 {} | 비급여 이외 {}",
        format_won(totals.pay_self),
        format_won(totals.pay_nhis),
        format_won(totals.pay_full),
        format_won(totals.non_pay_select),
        format_won(totals.non_pay_other)
    );
    println!("진료비 합계 {}", format_won(totals.total_cost));

    print_comparison(&summary.grand_totals);
}

fn print_comparison(totals: &GrandTotals) {
    println!("\nGeneration comparison");
    for card in comparison_cards(totals) {
        let marker = if card.best { " *" } else { "" };
        println!(
            "- {} ({}): {}{}",
            card.name,
            card.cap_description,
            format_won(card.amount),
            marker
        );
    }
}

/// Formats an amount with thousands separators, e.g. `1,250,000원`.
pub(crate) fn format_won(amount: Won) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push('원');
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use silson_core::reimbursement::DomainViolation;

    fn quote(treatment_type: &str, facility: &str, pay_self: i64) -> QuoteArgs {
        QuoteArgs {
            treatment_type: treatment_type.to_string(),
            facility: facility.to_string(),
            pay_self,
            pay_nhis: 0,
            pay_full: 0,
            non_pay_select: 0,
            non_pay_other: 0,
        }
    }

    #[test]
    fn format_won_groups_thousands() {
        assert_eq!(format_won(0), "0원");
        assert_eq!(format_won(999), "999원");
        assert_eq!(format_won(1_000), "1,000원");
        assert_eq!(format_won(1_250_000), "1,250,000원");
    }

    #[test]
    fn quote_rejects_negative_costs() {
        let err = run_quote(quote("outpatient", "clinic", -1)).expect_err("negative cost");
        assert!(matches!(
            err,
            AppError::Domain(DomainViolation::NegativeCost {
                field: "pay_self",
                value: -1
            })
        ));
    }

    #[test]
    fn quote_rejects_unknown_facility() {
        let err = run_quote(quote("outpatient", "dental", 10_000)).expect_err("unknown facility");
        assert!(matches!(
            err,
            AppError::Domain(DomainViolation::UnknownFacility(_))
        ));
    }

    #[test]
    fn quote_accepts_valid_receipt() {
        assert!(run_quote(quote("inpatient", "tertiary", 120_000)).is_ok());
    }
}
