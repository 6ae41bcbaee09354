use metrics_exporter_prometheus::PrometheusHandle;
use silson_core::receipts::ReceiptImporter;
use silson_core::reimbursement::ReimbursementEngine;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) importer: ReceiptImporter,
    pub(crate) engine: ReimbursementEngine,
}

impl AppState {
    pub(crate) fn new(metrics: PrometheusHandle, importer: ReceiptImporter) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            importer,
            engine: ReimbursementEngine::new(),
        }
    }
}
