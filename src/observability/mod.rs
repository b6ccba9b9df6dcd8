//! Logging hooks for send attempts.
//!
//! Every adapter accepts an injectable log sink; when none is set, lines go
//! to the process-wide `tracing` subscriber. Logging is best effort and can
//! never mask a send error: sinks are plain functions with no failure path.

use std::collections::HashMap;
use std::sync::Arc;

/// Injectable log sink: one function receiving the formatted log line.
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Writes a line to the injected sink, or to `tracing` when none is set.
pub(crate) fn emit(sink: Option<&LogSink>, line: &str) {
    match sink {
        Some(sink) => sink(line),
        None => tracing::info!(target: "integrations_mailer", "{}", line),
    }
}

/// Renders a header map as `Key: ["v1", "v2"] ` pairs for the per-send log
/// line. Keys are sorted so output is stable.
pub fn format_headers(headers: &HashMap<String, Vec<String>>) -> String {
    let mut keys: Vec<&String> = headers.keys().collect();
    keys.sort();

    let mut out = String::new();
    for key in keys {
        out.push_str(key);
        out.push_str(": [");
        let values = &headers[key];
        for (i, value) in values.iter().enumerate() {
            out.push('"');
            out.push_str(value);
            out.push('"');
            if i < values.len() - 1 {
                out.push_str(", ");
            }
        }
        out.push_str("] ");
    }
    out
}

/// Formats the one-line-per-attempt send log.
pub(crate) fn send_log_line(response: &crate::types::Response) -> String {
    format!(
        "send email: status_code={}, body={}, headers={}",
        response.status_code,
        response.body,
        format_headers(&response.headers)
    )
}
