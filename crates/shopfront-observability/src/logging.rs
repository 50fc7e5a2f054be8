//! Structured logging with checkout context.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use shopfront_commerce::CheckoutId;

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for production/log aggregation).
    #[default]
    Json,
    /// Human-readable format (for development).
    Human,
}

/// A structured log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// Checkout attempt this entry belongs to.
    pub checkout_id: String,
    /// Page that logged it.
    pub page: Option<String>,
    /// Additional structured fields.
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Microseconds since the logger was created.
    pub elapsed_us: u64,
}

impl LogEntry {
    /// Extra fields as `key=value` pairs, strings unquoted.
    pub fn fields_line(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| match v {
                serde_json::Value::String(s) => format!("{}={}", k, s),
                other => format!("{}={}", k, other),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

macro_rules! emit_event {
    ($level:ident, $entry:ident) => {
        tracing::$level!(
            checkout_id = %$entry.checkout_id,
            page = $entry.page.as_deref().unwrap_or_default(),
            elapsed_us = $entry.elapsed_us,
            extra = %$entry.fields_line(),
            "{}",
            $entry.message
        )
    };
}

/// Structured logger for one checkout attempt.
///
/// Every entry carries the checkout id and the elapsed time since the
/// logger was created, and is emitted as a `tracing` event at the matching
/// level with those as event fields. Rendering is left to the installed
/// subscriber.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    checkout_id: CheckoutId,
    page: Option<String>,
    start_time: Instant,
    min_level: LogLevel,
}

impl StructuredLogger {
    /// Create a new logger for a checkout attempt.
    pub fn new(checkout_id: CheckoutId) -> Self {
        Self {
            checkout_id,
            page: None,
            start_time: Instant::now(),
            min_level: LogLevel::Info,
        }
    }

    /// Set the page name.
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Log at debug level.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, BTreeMap::new());
    }

    /// Start building a log entry with fields.
    pub fn builder(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder {
            logger: self,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Build the entry, or None when `level` is below the minimum.
    pub fn entry(
        &self,
        level: LogLevel,
        message: &str,
        fields: BTreeMap<String, serde_json::Value>,
    ) -> Option<LogEntry> {
        if level < self.min_level {
            return None;
        }

        Some(LogEntry {
            level,
            message: message.to_string(),
            checkout_id: self.checkout_id.to_string(),
            page: self.page.clone(),
            fields,
            elapsed_us: self.elapsed_us(),
        })
    }

    fn log(&self, level: LogLevel, message: &str, fields: BTreeMap<String, serde_json::Value>) {
        let Some(entry) = self.entry(level, message, fields) else {
            return;
        };

        match level {
            LogLevel::Trace => emit_event!(trace, entry),
            LogLevel::Debug => emit_event!(debug, entry),
            LogLevel::Info => emit_event!(info, entry),
            LogLevel::Warn => emit_event!(warn, entry),
            LogLevel::Error => emit_event!(error, entry),
        }
    }

    /// Get elapsed time since logger creation.
    pub fn elapsed_us(&self) -> u64 {
        self.start_time.elapsed().as_micros() as u64
    }
}

/// Builder for a log entry with fields.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl LogBuilder<'_> {
    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add an unsigned integer field.
    pub fn field_u64(mut self, key: &str, value: u64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Emit the log entry.
    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn logger() -> StructuredLogger {
        StructuredLogger::new(CheckoutId::new("chk-1")).with_page("place_order")
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn lines(&self) -> Vec<serde_json::Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }
    }

    /// Run `f` with a JSON fmt subscriber writing into a buffer.
    fn capture_json(f: impl FnOnce()) -> Vec<serde_json::Value> {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        buf.lines()
    }

    #[test]
    fn test_entry_below_min_level_is_dropped() {
        let logger = logger().with_min_level(LogLevel::Warn);
        assert!(logger.entry(LogLevel::Info, "hidden", BTreeMap::new()).is_none());
        assert!(logger.entry(LogLevel::Error, "shown", BTreeMap::new()).is_some());
    }

    #[test]
    fn test_fields_line() {
        let mut fields = BTreeMap::new();
        fields.insert("route".to_string(), serde_json::json!("/payment"));
        fields.insert("items".to_string(), serde_json::json!(2));
        let entry = logger().entry(LogLevel::Warn, "redirect", fields).unwrap();

        assert_eq!(entry.fields_line(), "items=2 route=/payment");
    }

    #[test]
    fn test_event_carries_context_as_fields() {
        let lines = capture_json(|| {
            logger()
                .builder(LogLevel::Info, "order submitted")
                .field("total", "74.92")
                .field_u64("items", 2)
                .emit();
        });

        assert_eq!(lines.len(), 1);
        let event = &lines[0];
        assert_eq!(event["level"], "INFO");
        assert_eq!(event["fields"]["message"], "order submitted");
        assert_eq!(event["fields"]["checkout_id"], "chk-1");
        assert_eq!(event["fields"]["page"], "place_order");
        assert_eq!(event["fields"]["extra"], "items=2 total=74.92");
        assert!(event["fields"]["elapsed_us"].is_u64());
    }

    #[test]
    fn test_min_level_suppresses_event() {
        let lines = capture_json(|| {
            logger().with_min_level(LogLevel::Info).debug("mounted");
        });
        assert!(lines.is_empty());
    }

    #[test]
    fn test_level_config_names() {
        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, LogLevel::Debug);
        assert_eq!(level.as_filter(), "debug");

        let format: LogFormat = serde_json::from_str("\"human\"").unwrap();
        assert_eq!(format, LogFormat::Human);
    }
}
