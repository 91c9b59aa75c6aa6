//! Subscriber installation for the `fwz` binary.
//!
//! Log output goes to stderr so that `--json` command output on stdout stays
//! machine-readable. Verbosity maps onto an [`EnvFilter`] directive unless
//! `RUST_LOG` is set, in which case `RUST_LOG` wins.
//!
//! ```no_run
//! use formwiz_observe::{init_tracing, TracingOptions};
//!
//! init_tracing(&TracingOptions { verbose: 1, ..Default::default() }).unwrap();
//! ```

use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Kept so buffered spans can be flushed on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// How the global subscriber should be assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TracingOptions {
    /// Number of `-v` flags.
    pub verbose: u8,
    /// Only errors.
    pub quiet: bool,
    /// Emit log lines as JSON objects.
    pub json: bool,
    /// Bridge spans to OpenTelemetry with the stdout exporter.
    pub otel: bool,
}

impl TracingOptions {
    /// Filter directive derived from the verbosity flags.
    pub fn filter_directive(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,formwiz=debug",
            _ => "trace",
        }
    }

    fn env_filter(&self) -> EnvFilter {
        match std::env::var("RUST_LOG") {
            Ok(directive) if !directive.trim().is_empty() => EnvFilter::new(directive),
            _ => EnvFilter::new(self.filter_directive()),
        }
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(options: &TracingOptions) -> Result<(), Box<dyn std::error::Error>> {
    let fmt_layer = if options.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    };

    let registry = tracing_subscriber::registry()
        .with(options.env_filter())
        .with(fmt_layer);

    if options.otel {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("formwiz");
        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);

        registry
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .try_init()?;
    } else {
        registry.try_init()?;
    }

    Ok(())
}

/// Flush and shut down the OpenTelemetry provider. No-op without `otel`.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: trace export shutdown error: {e}");
        }
    }
}
