//! Log sink construction.
//!
//! The subscriber is built as a [`Dispatch`] value and handed to the caller,
//! which scopes it to the run (`tracing::dispatcher::set_default`). Nothing
//! here touches the global default.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing::Dispatch;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Console filter for a `-v` count.
pub fn console_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "rankings_scraper=warn,warn",
        1 => "rankings_scraper=info,warn",
        2 => "rankings_scraper=debug,info",
        _ => "trace",
    }
}

/// Stderr console layer plus the optional append-only log file.
pub fn build_dispatch(config: &LoggingConfig, verbose: u8) -> Result<Dispatch> {
    let console = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(console_filter(verbose)));

    let file_layer = if config.enabled {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.file)
            .with_context(|| format!("Failed to open log file {:?}", config.file))?;

        Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .with_filter(EnvFilter::new(&config.level)),
        )
    } else {
        None
    };

    let subscriber = tracing_subscriber::registry().with(console).with(file_layer);
    Ok(Dispatch::new(subscriber))
}

// ── Test capture ──────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod capture {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use tracing::Dispatch;
    use tracing_subscriber::fmt;

    /// In-memory log buffer shared with a capturing dispatch.
    #[derive(Clone, Default)]
    pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Info-level dispatch writing plain text into the returned buffer.
    pub fn dispatch() -> (Dispatch, LogBuffer) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .with_writer(move || writer.clone())
            .finish();
        (Dispatch::new(subscriber), buffer)
    }
}
