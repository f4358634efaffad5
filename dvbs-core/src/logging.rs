//! Structured logging for the DVB-S codec pipeline.
//!
//! This collects structured log entries in-process rather than writing to
//! stderr directly, so both the CLI and any embedding application can decide
//! how (or whether) to render them.

use std::fmt;

/// Log level for filtering messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level to record.
    pub level: LogLevel,

    /// Enable per-subsystem logging.
    pub enable_prbs: bool,
    pub enable_rs: bool,
    pub enable_interleave: bool,
    pub enable_conv: bool,

    /// Maximum number of log entries to keep (bounds memory on long runs).
    pub max_entries: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            enable_prbs: true,
            enable_rs: true,
            enable_interleave: true,
            enable_conv: true,
            max_entries: 1000,
        }
    }
}

impl LogConfig {
    /// Verbose logging for debugging the codec pipeline.
    pub fn verbose() -> Self {
        Self {
            level: LogLevel::Debug,
            max_entries: 5000,
            ..Self::default()
        }
    }

    /// Quiet logging suitable for production encoding jobs.
    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Warn,
            max_entries: 100,
            ..Self::default()
        }
    }

    /// Disable all logging.
    pub fn disabled() -> Self {
        Self {
            level: LogLevel::Error,
            enable_prbs: false,
            enable_rs: false,
            enable_interleave: false,
            enable_conv: false,
            max_entries: 0,
        }
    }
}

/// A single log entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub subsystem: &'static str,
    pub message: String,
}

/// Logger that collects structured log entries from the codec stages.
#[derive(Debug, Clone)]
pub struct SignalLogger {
    config: LogConfig,
    entries: Vec<LogEntry>,
}

impl SignalLogger {
    pub fn new(config: LogConfig) -> Self {
        let capacity = config.max_entries.min(1000);
        Self {
            config,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Log a message at the specified level for the given subsystem.
    pub fn log(&mut self, level: LogLevel, subsystem: &'static str, message: impl fmt::Display) {
        if level < self.config.level {
            return;
        }

        let enabled = match subsystem {
            "PRBS" => self.config.enable_prbs,
            "RS" => self.config.enable_rs,
            "INTERLEAVE" => self.config.enable_interleave,
            "CONV" => self.config.enable_conv,
            _ => true, // ENCODER and unknown subsystems always log
        };

        if !enabled {
            return;
        }

        let entry = LogEntry {
            level,
            subsystem,
            message: message.to_string(),
        };

        if self.config.max_entries > 0 {
            if self.entries.len() >= self.config.max_entries {
                self.entries.remove(0);
            }
            self.entries.push(entry);
        }

        #[cfg(any(test, debug_assertions))]
        {
            eprintln!("[{}] {}: {}", level, subsystem, message);
        }
    }

    pub fn trace(&mut self, subsystem: &'static str, message: impl fmt::Display) {
        self.log(LogLevel::Trace, subsystem, message);
    }

    pub fn debug(&mut self, subsystem: &'static str, message: impl fmt::Display) {
        self.log(LogLevel::Debug, subsystem, message);
    }

    pub fn info(&mut self, subsystem: &'static str, message: impl fmt::Display) {
        self.log(LogLevel::Info, subsystem, message);
    }

    pub fn warn(&mut self, subsystem: &'static str, message: impl fmt::Display) {
        self.log(LogLevel::Warn, subsystem, message);
    }

    pub fn error(&mut self, subsystem: &'static str, message: impl fmt::Display) {
        self.log(LogLevel::Error, subsystem, message);
    }

    /// All collected log entries, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries for a specific subsystem.
    pub fn entries_for_subsystem(&self, subsystem: &str) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.subsystem == subsystem)
            .collect()
    }

    /// Clear all entries (does not affect the codec state).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for SignalLogger {
    fn default() -> Self {
        Self::new(LogConfig::default())
    }
}

impl fmt::Display for SignalLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "[{}] {}: {}", entry.level, entry.subsystem, entry.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_level() {
        let config = LogConfig {
            level: LogLevel::Info,
            ..Default::default()
        };
        let mut logger = SignalLogger::new(config);

        logger.trace("ENCODER", "trace message");
        logger.debug("ENCODER", "debug message");
        logger.info("ENCODER", "info message");
        logger.warn("ENCODER", "warn message");

        assert_eq!(logger.entries().len(), 2); // info and warn only
    }

    #[test]
    fn filters_by_subsystem() {
        let config = LogConfig {
            level: LogLevel::Debug,
            enable_prbs: false,
            ..Default::default()
        };
        let mut logger = SignalLogger::new(config);

        logger.info("PRBS", "prbs message");
        logger.info("RS", "rs message");

        assert_eq!(logger.entries().len(), 1);
        assert_eq!(logger.entries()[0].subsystem, "RS");
    }

    #[test]
    fn bounds_entries_to_max() {
        let config = LogConfig {
            level: LogLevel::Debug,
            max_entries: 2,
            ..Default::default()
        };
        let mut logger = SignalLogger::new(config);

        logger.info("ENCODER", "one");
        logger.info("ENCODER", "two");
        logger.info("ENCODER", "three");

        assert_eq!(logger.entries().len(), 2);
        assert!(logger.entries()[0].message.contains("two"));
    }
}
