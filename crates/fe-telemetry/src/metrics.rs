//! Prometheus metrics for the Foundation Emulator.
//!
//! All metrics follow the naming convention: `fe_<metric>_<unit>` and live
//! in a private registry; [`gather_text`] renders them in the text
//! exposition format. There is no network exporter.

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    static ref REGISTRY: Registry = build_registry();

    // =========================================================================
    // TRANSACTION METRICS
    // =========================================================================

    /// Transactions closed with a successful commit
    pub static ref TRANSACTIONS_COMMITTED: IntCounter = IntCounter::new(
        "fe_transactions_committed_total",
        "Total transactions committed"
    ).expect("metric creation failed");

    /// Size of committed snapshot frames
    pub static ref COMMIT_BYTES: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "fe_commit_bytes",
            "Size of each committed snapshot frame in bytes"
        ).buckets(exponential_buckets(256.0, 4.0, 10).expect("bucket layout"))
    ).expect("metric creation failed");

    /// Time spent committing
    pub static ref COMMIT_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "fe_commit_duration_seconds",
            "Time spent encoding, staging and promoting a snapshot"
        ).buckets(exponential_buckets(0.0001, 2.0, 14).expect("bucket layout"))
    ).expect("metric creation failed");

    // =========================================================================
    // EVENT METRICS
    // =========================================================================

    /// Events handed to the dispatcher
    pub static ref EVENTS_DISPATCHED: IntCounterVec = IntCounterVec::new(
        Opts::new("fe_events_dispatched_total", "Events dispatched by queue"),
        &["queue"]  // queue: transactional/non_transactional
    ).expect("metric creation failed");

    // =========================================================================
    // GAME CYCLE METRICS
    // =========================================================================

    /// Game cycles that reached Idle through EndGameCycle
    pub static ref GAME_CYCLES_COMPLETED: IntCounter = IntCounter::new(
        "fe_game_cycles_completed_total",
        "Total game cycles completed"
    ).expect("metric creation failed");

    /// Operations rejected because the current state does not allow them
    pub static ref ILLEGAL_TRANSITIONS: IntCounter = IntCounter::new(
        "fe_illegal_transitions_total",
        "Operations rejected as illegal in the current game cycle state"
    ).expect("metric creation failed");
}

fn build_registry() -> Registry {
    let registry = Registry::new();
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TRANSACTIONS_COMMITTED.clone()),
        Box::new(COMMIT_BYTES.clone()),
        Box::new(COMMIT_DURATION.clone()),
        Box::new(EVENTS_DISPATCHED.clone()),
        Box::new(GAME_CYCLES_COMPLETED.clone()),
        Box::new(ILLEGAL_TRANSITIONS.clone()),
    ];
    for collector in collectors {
        if let Err(e) = registry.register(collector) {
            tracing::warn!(error = %e, "Metric registration failed");
        }
    }
    registry
}

/// Record one successful commit.
pub fn record_commit(bytes: usize) {
    TRANSACTIONS_COMMITTED.inc();
    COMMIT_BYTES.observe(bytes as f64);
}

pub fn record_event_dispatched(queue: &str) {
    EVENTS_DISPATCHED.with_label_values(&[queue]).inc();
}

pub fn record_game_cycle_completed() {
    GAME_CYCLES_COMPLETED.inc();
}

pub fn record_illegal_transition() {
    ILLEGAL_TRANSITIONS.inc();
}

/// Encode all metrics as Prometheus text format.
pub fn gather_text() -> Result<String, TelemetryError> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&REGISTRY.gather(), &mut buffer)
        .map_err(|e| TelemetryError::Encode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::Encode(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }

    /// Timer for [`COMMIT_DURATION`].
    pub fn commit() -> Self {
        Self::new(&COMMIT_DURATION)
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}
