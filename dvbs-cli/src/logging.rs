//! Structured run logging for the CLI, trimmed from `chimera-cli`'s
//! `StructuredLogger` to this domain's event set.

use crate::config::{LogFormat, LogTarget, LoggingConfig};
use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Structured log event types emitted over the lifetime of one CLI run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    Info { message: String },
    Warn { message: String },
    Error { message: String, details: Option<String> },
    RunSummary(RunSummaryEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummaryEvent {
    pub timestamp: DateTime<Utc>,
    pub duration_secs: f64,
    pub packets_encoded: u64,
    pub iq_symbols_emitted: u64,
    pub sync_inversions: u64,
    pub code_rate_switches: u64,
    pub packets_skipped: u64,
}

/// Logger that serializes [`LogEvent`]s to a configured sink.
pub struct StructuredLogger {
    format: LogFormat,
    writer: Box<dyn Write + Send>,
    start_time: DateTime<Utc>,
}

impl StructuredLogger {
    pub fn new(config: &LoggingConfig) -> Result<Self> {
        let writer: Box<dyn Write + Send> = match config.target {
            LogTarget::Stdout => Box::new(io::stdout()),
            LogTarget::Stderr => Box::new(io::stderr()),
            LogTarget::File => {
                let path = config
                    .file_path
                    .as_ref()
                    .ok_or_else(|| color_eyre::eyre::eyre!("file path required for file logging"))?;
                Box::new(BufWriter::new(File::create(path)?))
            }
        };

        Ok(Self {
            format: config.format.clone(),
            writer,
            start_time: Utc::now(),
        })
    }

    pub fn log(&mut self, event: LogEvent) -> Result<()> {
        let output = match self.format {
            LogFormat::Json => serde_json::to_string(&event)?,
            LogFormat::Pretty => Self::format_pretty(&event),
        };
        writeln!(self.writer, "{output}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn format_pretty(event: &LogEvent) -> String {
        let ts = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
        match event {
            LogEvent::Info { message } => format!("[{ts}] INFO: {message}"),
            LogEvent::Warn { message } => format!("[{ts}] WARN: {message}"),
            LogEvent::Error { message, details } => match details {
                Some(d) => format!("[{ts}] ERROR: {message} | {d}"),
                None => format!("[{ts}] ERROR: {message}"),
            },
            LogEvent::RunSummary(s) => format!(
                "[{}] SUMMARY ({:.2}s): {} packets, {} IQ symbols, {} sync inversions, {} rate switches, {} skipped",
                ts,
                s.duration_secs,
                s.packets_encoded,
                s.iq_symbols_emitted,
                s.sync_inversions,
                s.code_rate_switches,
                s.packets_skipped,
            ),
        }
    }

    pub fn elapsed(&self) -> f64 {
        (Utc::now() - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}
