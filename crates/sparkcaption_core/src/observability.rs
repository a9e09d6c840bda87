//! Logging and OpenTelemetry metrics initialization.

#[cfg(feature = "metrics")]
use opentelemetry::{KeyValue, global};
#[cfg(feature = "metrics")]
use opentelemetry_otlp::{MetricExporter as OtlpExporter, WithExportConfig};
#[cfg(feature = "metrics")]
use opentelemetry_sdk::{
    Resource,
    metrics::{PeriodicReader, SdkMeterProvider},
};
#[cfg(feature = "metrics")]
use opentelemetry_stdout::MetricExporter as StdoutExporter;
#[cfg(feature = "metrics")]
use std::sync::OnceLock;
#[cfg(feature = "metrics")]
use std::time::Duration;
use tracing::{debug, instrument};
#[cfg(feature = "metrics")]
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Default OTLP/HTTP collector endpoint.
#[cfg(feature = "metrics")]
const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4318";

/// The installed provider, kept so it can be flushed on shutdown.
#[cfg(feature = "metrics")]
static METER_PROVIDER: OnceLock<SdkMeterProvider> = OnceLock::new();

/// Install the global `tracing` subscriber.
///
/// Honors `RUST_LOG`; falls back to `default_directive` (e.g. `"info"`).
/// Calling it twice is harmless: the second call is ignored.
pub fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Where metrics go.
#[cfg(feature = "metrics")]
#[derive(Debug, Clone, PartialEq, Eq)]
enum MetricsExporter {
    Stdout,
    Otlp { endpoint: String },
}

#[cfg(feature = "metrics")]
impl MetricsExporter {
    /// `OTEL_EXPORTER=otlp` selects OTLP at `OTEL_EXPORTER_OTLP_ENDPOINT`;
    /// anything else selects stdout.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup("OTEL_EXPORTER").as_deref().map(str::trim) {
            Some(kind) if kind.eq_ignore_ascii_case("otlp") => MetricsExporter::Otlp {
                endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_OTLP_ENDPOINT.to_string()),
            },
            _ => MetricsExporter::Stdout,
        }
    }
}

#[cfg(feature = "metrics")]
fn build_meter_provider(
    service_name: &'static str,
    exporter: &MetricsExporter,
    interval: Duration,
) -> Result<SdkMeterProvider, String> {
    let resource = Resource::builder_empty()
        .with_attributes([KeyValue::new("service.name", service_name)])
        .build();
    let builder = SdkMeterProvider::builder().with_resource(resource);

    let provider = match exporter {
        MetricsExporter::Otlp { endpoint } => {
            let exporter = OtlpExporter::builder()
                .with_http()
                .with_endpoint(endpoint.as_str())
                .with_timeout(Duration::from_secs(10))
                .build()
                .map_err(|e| format!("Failed to create OTLP exporter: {}", e))?;
            builder
                .with_reader(PeriodicReader::builder(exporter).with_interval(interval).build())
                .build()
        }
        MetricsExporter::Stdout => builder
            .with_reader(
                PeriodicReader::builder(StdoutExporter::default())
                    .with_interval(interval)
                    .build(),
            )
            .build(),
    };
    Ok(provider)
}

/// Install an OpenTelemetry meter provider as the global one.
///
/// `OTEL_EXPORTER=otlp` exports over OTLP/HTTP to `OTEL_EXPORTER_OTLP_ENDPOINT`
/// (default `http://localhost:4318`); otherwise metrics go to stdout. Only the
/// first successful call installs a provider. Pair it with
/// [`shutdown_observability`] so short-lived processes export what they
/// recorded.
///
/// Without the `metrics` feature this does nothing.
///
/// # Errors
///
/// Returns a message when the OTLP exporter cannot be built.
#[instrument(skip_all, fields(service_name))]
pub fn init_observability(
    service_name: &'static str,
    export_interval_secs: u64,
) -> Result<(), String> {
    #[cfg(not(feature = "metrics"))]
    {
        let _ = export_interval_secs;
        debug!(service_name, "Metrics feature disabled, not installing a meter provider");
        Ok(())
    }

    #[cfg(feature = "metrics")]
    {
        if METER_PROVIDER.get().is_some() {
            debug!("Meter provider already installed");
            return Ok(());
        }

        let exporter = MetricsExporter::from_lookup(|name| std::env::var(name).ok());
        let interval = Duration::from_secs(export_interval_secs.max(1));
        info!(service_name, ?exporter, interval_secs = interval.as_secs(), "Installing meter provider");

        let provider = build_meter_provider(service_name, &exporter, interval).map_err(|e| {
            warn!(error = %e, "Meter provider not installed");
            e
        })?;
        global::set_meter_provider(provider.clone());
        let _ = METER_PROVIDER.set(provider);
        Ok(())
    }
}

/// Flush pending metrics and shut the installed meter provider down.
///
/// Call once before the process exits. Does nothing when no provider was
/// installed.
#[instrument]
pub fn shutdown_observability() {
    #[cfg(feature = "metrics")]
    match METER_PROVIDER.get() {
        Some(provider) => match provider.shutdown() {
            Ok(()) => info!("Metrics flushed, meter provider shut down"),
            Err(e) => warn!(error = %e, "Meter provider shutdown failed"),
        },
        None => debug!("No meter provider installed"),
    }

    #[cfg(not(feature = "metrics"))]
    debug!("Metrics feature disabled, nothing to shut down");
}
