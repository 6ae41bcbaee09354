//! Quote engine comparing what each generation of Korean supplemental
//! indemnity insurance (실손보험) would reimburse for a set of receipts.

pub mod config;
pub mod error;
pub mod receipts;
pub mod reimbursement;
pub mod report;
pub mod telemetry;
