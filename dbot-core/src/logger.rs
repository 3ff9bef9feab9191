//! Tracing initialization: fmt layer (level, target, thread id, all fields) to stdout, optionally teed
//! into an append-mode log file.

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::{
    filter::Directive,
    fmt::{format::FmtSpan, writer::BoxMakeWriter, writer::MakeWriterExt},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Builds the filter: RUST_LOG when set, otherwise `level`; `extra_directives` (e.g. `teloxide=debug`)
/// are added on top.
pub fn build_filter(level: Level, extra_directives: &[&str]) -> anyhow::Result<EnvFilter> {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    for directive in extra_directives {
        let directive: Directive = directive.parse()?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

/// Initializes the global tracing subscriber.
/// When `log_file_path` is set, the same formatted output is written to stdout and appended to the file.
/// Load the dotenv file before calling, otherwise RUST_LOG from it has no effect.
pub fn init_tracing(
    level: Level,
    extra_directives: &[&str],
    log_file_path: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = build_filter(level, extra_directives)?;

    let writer = match log_file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(io::stdout.and(Arc::new(file)))
        }
        None => BoxMakeWriter::new(io::stdout),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
