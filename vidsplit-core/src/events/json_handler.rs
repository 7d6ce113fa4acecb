//! JSON event handler for structured progress output.
//!
//! Writes one JSON object per line for consumption by external tools that
//! drive vidsplit programmatically.

use super::{Event, EventHandler};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Event handler that outputs events as JSON lines.
pub struct JsonEventHandler {
    output: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventHandler {
    /// Create a handler that writes to stdout.
    pub fn new() -> Self {
        Self {
            output: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a handler with a custom writer.
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(writer),
        }
    }

    /// Current timestamp as seconds since the Unix epoch.
    fn timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

impl EventHandler for JsonEventHandler {
    fn handle(&self, event: &Event) {
        let Ok(mut value) = serde_json::to_value(event) else {
            return;
        };
        if let Some(map) = value.as_object_mut() {
            map.insert("timestamp".to_string(), Self::timestamp().into());
        }

        if let Ok(mut output) = self.output.lock() {
            if let Ok(json_str) = serde_json::to_string(&value) {
                let _ = writeln!(output, "{json_str}");
                let _ = output.flush();
            }
        }
    }
}

impl Default for JsonEventHandler {
    fn default() -> Self {
        Self::new()
    }
}
