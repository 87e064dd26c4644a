use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Installs the global tracing subscriber for a host application: bunyan
/// JSON to stdout through a non-blocking writer, with `log` records bridged
/// into `tracing`. Call once at startup and keep the returned guard alive
/// for the life of the process.
pub fn init_tracing(app_name: &str) -> Result<WorkerGuard, anyhow::Error> {
    LogTracer::init()?;

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(io::stdout());
    let bunyan_formatting_layer =
        BunyanFormattingLayer::new(app_name.to_string(), non_blocking_writer);
    let subscriber = Registry::default()
        .with(EnvFilter::new("INFO"))
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(guard)
}
