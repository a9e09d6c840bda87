//! OpenTelemetry instruments for caption generation.

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
};
use std::time::Duration;
use tracing::debug;

/// Counters and timings for [`crate::Generator`].
///
/// Instruments come from the global meter provider, so install one with
/// `sparkcaption_core::init_observability` first or they record nothing.
#[derive(Clone)]
pub struct GenerationMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total generation requests
    pub generations: Counter<u64>,
    /// Generation requests that returned an error
    pub failures: Counter<u64>,
    /// Rate-limited caption calls (each one may be retried)
    pub rate_limited: Counter<u64>,
    /// Generation duration in seconds
    pub duration: Histogram<f64>,
}

impl GenerationMetrics {
    /// Create the instruments on the `sparkcaption` meter.
    pub fn new() -> Self {
        debug!("Getting global meter for sparkcaption");
        let meter = global::meter("sparkcaption");

        let generations = meter
            .u64_counter("generation.requests")
            .with_description("Total generation requests")
            .build();

        let failures = meter
            .u64_counter("generation.failures")
            .with_description("Generation requests that failed")
            .build();

        let rate_limited = meter
            .u64_counter("generation.rate_limited")
            .with_description("Caption calls rejected with HTTP 429")
            .build();

        let duration = meter
            .f64_histogram("generation.duration")
            .with_unit("seconds")
            .with_description("End-to-end generation duration")
            .build();

        Self {
            _meter: meter,
            generations,
            failures,
            rate_limited,
            duration,
        }
    }

    /// Record one finished generation.
    pub fn record(&self, succeeded: bool, elapsed: Duration) {
        self.generations.add(1, &[]);
        if !succeeded {
            self.failures.add(1, &[]);
        }
        self.duration.record(elapsed.as_secs_f64(), &[]);
    }
}

impl Default for GenerationMetrics {
    fn default() -> Self {
        Self::new()
    }
}
