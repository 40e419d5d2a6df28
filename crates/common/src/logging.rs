//! Structured logging setup
//!
//! The process installs one subscriber at startup. JSON output flattens each
//! event so every line carries top-level `timestamp`, `level` and `message`
//! fields.

use std::io;
use std::sync::{Arc, Mutex};

use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

use crate::config::{LogConfig, LogFormat};
use crate::error::{Error, Result};

/// Build a dispatcher for `config` that writes to `writer`
pub fn dispatch<W>(config: &LogConfig, writer: W) -> Result<Dispatch>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| Error::config(format!("invalid log filter {:?}: {}", config.filter, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let dispatch = match config.format {
        LogFormat::Json => Dispatch::new(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(writer),
            ),
        ),
        LogFormat::Text => {
            Dispatch::new(registry.with(tracing_subscriber::fmt::layer().with_writer(writer)))
        }
    };

    Ok(dispatch)
}

/// Install the process-wide subscriber, logging to stdout
pub fn init(config: &LogConfig) -> Result<()> {
    let dispatch = dispatch(config, io::stdout)?;
    tracing::dispatcher::set_global_default(dispatch)
        .map_err(|e| Error::config(format!("logging already initialised: {}", e)))
}

/// In-memory log sink. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as UTF-8 (lossy)
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Non-empty lines written so far
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
