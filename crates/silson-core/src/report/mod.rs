mod export;
mod summary;
pub mod views;

pub use export::{write_results, write_template};
pub use summary::{comparison_cards, ReceiptLedger};
pub use views::{ComparisonCardView, InputTotals, LedgerSummary, ReceiptRowView};
