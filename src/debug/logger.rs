// Logger - structured diagnostic and trace logging
//
// Provides:
// - Six-level log filtering (None..Trace)
// - An in-memory ring buffer of trace entries
// - Optional mirrored file output

use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warning,
    /// Info, warnings, and errors
    Info,
    /// Debug information (includes traces)
    Debug,
    /// Verbose trace logging
    Trace,
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(LogLevel::None),
            "error" => Ok(LogLevel::Error),
            "warning" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unrecognized log level '{}'", other)),
        }
    }
}

/// A single entry in the trace buffer: either a CPU trace line or a plain
/// diagnostic message.
#[derive(Debug, Clone)]
pub enum TraceEntry {
    /// A formatted CPU trace line, as produced by `Cpu::trace`.
    CpuTrace(String),
    /// A diagnostic message at a given level.
    Message(LogLevel, String),
}

impl std::fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceEntry::CpuTrace(line) => write!(f, "{}", line),
            TraceEntry::Message(level, msg) => write!(f, "[{:?}] {}", level, msg),
        }
    }
}

/// Handles trace logging for the emulator core. Can log to an in-memory
/// buffer, a mirrored file, or both.
pub struct Logger {
    log_level: LogLevel,
    cpu_trace: bool,
    trace_buffer: Vec<TraceEntry>,
    /// Maximum number of entries in the trace buffer (0 = unlimited).
    max_buffer_size: usize,
    output_file: Option<File>,
}

impl Logger {
    pub fn new() -> Self {
        Logger {
            log_level: LogLevel::None,
            cpu_trace: false,
            trace_buffer: Vec::new(),
            max_buffer_size: 10000,
            output_file: None,
        }
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn enable_cpu_trace(&mut self) {
        self.cpu_trace = true;
    }

    pub fn disable_cpu_trace(&mut self) {
        self.cpu_trace = false;
    }

    pub fn is_cpu_trace_enabled(&self) -> bool {
        self.cpu_trace && self.log_level >= LogLevel::Trace
    }

    pub fn set_max_buffer_size(&mut self, size: usize) {
        self.max_buffer_size = size;
        if size > 0 && self.trace_buffer.len() > size {
            self.trace_buffer.drain(0..self.trace_buffer.len() - size);
        }
    }

    pub fn open_log_file<P: AsRef<Path>>(&mut self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        self.output_file = Some(file);
        Ok(())
    }

    pub fn close_log_file(&mut self) {
        self.output_file = None;
    }

    /// Record a formatted CPU trace line. Gated on both `cpu_trace` and the
    /// log level being at least `Trace`.
    pub fn log_cpu_trace(&mut self, line: String) {
        if !self.is_cpu_trace_enabled() {
            return;
        }
        self.add_entry(TraceEntry::CpuTrace(line));
    }

    /// Record a diagnostic message at the given level, gated against the
    /// logger's current level.
    pub fn log_message(&mut self, level: LogLevel, message: String) {
        if level > self.log_level {
            return;
        }
        self.add_entry(TraceEntry::Message(level, message));
    }

    fn add_entry(&mut self, entry: TraceEntry) {
        if let Some(ref mut file) = self.output_file {
            let _ = writeln!(file, "{}", entry);
        }

        self.trace_buffer.push(entry);

        if self.max_buffer_size > 0 && self.trace_buffer.len() > self.max_buffer_size {
            self.trace_buffer.remove(0);
        }
    }

    pub fn trace_buffer(&self) -> &[TraceEntry] {
        &self.trace_buffer
    }

    pub fn clear_buffer(&mut self) {
        self.trace_buffer.clear();
    }

    pub fn last_entries(&self, count: usize) -> &[TraceEntry] {
        let start = self.trace_buffer.len().saturating_sub(count);
        &self.trace_buffer[start..]
    }

    pub fn format_trace_buffer(&self) -> String {
        let mut output = String::new();
        for entry in &self.trace_buffer {
            output.push_str(&format!("{}\n", entry));
        }
        output
    }

    pub fn format_last_entries(&self, count: usize) -> String {
        let mut output = String::new();
        for entry in self.last_entries(count) {
            output.push_str(&format!("{}\n", entry));
        }
        output
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
