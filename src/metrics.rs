//! Function Metrics
//!
//! Prometheus counters and histograms for function runs, held in a registry
//! owned by this struct rather than the process-global default.

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

use crate::error::Result;
use crate::function::RunFunctionResponse;

/// Metrics recorded for every function run
pub struct FunctionMetrics {
    registry: Registry,
    runs: IntCounterVec,
    duration: Histogram,
}

impl FunctionMetrics {
    /// Create and register all metrics
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let runs = IntCounterVec::new(
            Opts::new(
                "composition_function_runs_total",
                "Total number of function runs by result",
            ),
            &["result"],
        )?;
        let duration = Histogram::with_opts(HistogramOpts::new(
            "composition_function_run_duration_seconds",
            "Duration of function runs",
        ))?;

        registry.register(Box::new(runs.clone()))?;
        registry.register(Box::new(duration.clone()))?;

        Ok(Self {
            registry,
            runs,
            duration,
        })
    }

    /// Record one run
    pub fn record(&self, rsp: &RunFunctionResponse, elapsed: Duration) {
        let result = if rsp.is_fatal() { "fatal" } else { "success" };
        self.runs.with_label_values(&[result]).inc();
        self.duration.observe(elapsed.as_secs_f64());
    }

    /// Number of runs recorded with the given result label
    pub fn runs(&self, result: &str) -> u64 {
        self.runs.with_label_values(&[result]).get()
    }

    /// Encode all metrics in the text exposition format
    pub fn encode(&self) -> Result<(String, Vec<u8>)> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok((encoder.format_type().to_string(), buffer))
    }
}
