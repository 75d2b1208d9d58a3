//! Console output
//!
//! Progress lines for humans (`--format pretty`) or one JSON message per
//! line (`--format json`). This is not a stable machine interface.

use crate::cli::commands::OutputFormat;
use crate::loader::LoadSummary;
use crate::normalize::{AttrValue, Number};
use crate::types::{LogLevel, TableStatus};
use serde_json::{json, Value};

/// Formats and prints console messages
#[derive(Debug, Clone, Copy)]
pub struct Console {
    format: OutputFormat,
}

impl Console {
    /// Create a console for an output format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a free-form progress message
    pub fn log(&self, message: &str) {
        println!("{}", self.format_log(LogLevel::Info, message));
    }

    /// Print the table status line
    pub fn table_status(&self, table: &str, status: &TableStatus) {
        println!("{}", self.format_table_status(table, status));
    }

    /// Print one per-record progress line
    pub fn record_loaded(&self, index: usize, key_field: &str, key: &AttrValue) {
        println!("{}", self.format_record_loaded(index, key_field, key));
    }

    /// Print the final summary
    pub fn summary(&self, summary: &LoadSummary, dry_run: bool) {
        println!("{}", self.format_summary(summary, dry_run));
    }

    pub(crate) fn format_log(&self, level: LogLevel, message: &str) -> String {
        match self.format {
            OutputFormat::Pretty => message.to_string(),
            OutputFormat::Json => to_line(&json!({
                "type": "LOG",
                "log": { "level": level, "message": message }
            })),
        }
    }

    pub(crate) fn format_table_status(&self, table: &str, status: &TableStatus) -> String {
        match self.format {
            OutputFormat::Pretty => format!("   Table status : {status}"),
            OutputFormat::Json => to_line(&json!({
                "type": "TABLE_STATUS",
                "tableStatus": { "table": table, "status": status.as_str() }
            })),
        }
    }

    pub(crate) fn format_record_loaded(
        &self,
        index: usize,
        key_field: &str,
        key: &AttrValue,
    ) -> String {
        match self.format {
            OutputFormat::Pretty => format!("  Inserted {key_field}={key}"),
            OutputFormat::Json => to_line(&json!({
                "type": "RECORD_LOADED",
                "record": {
                    "index": index,
                    "key": { key_field: key_to_json(key) }
                },
                "emitted_at": chrono::Utc::now().timestamp_millis()
            })),
        }
    }

    pub(crate) fn format_summary(&self, summary: &LoadSummary, dry_run: bool) -> String {
        match self.format {
            OutputFormat::Pretty => {
                let mut line = format!(
                    "Finished loading {} records into '{}'.",
                    summary.records, summary.table
                );
                if dry_run {
                    line.push_str(" (dry run, nothing was written to DynamoDB)");
                }
                line
            }
            OutputFormat::Json => to_line(&json!({
                "type": "SUMMARY",
                "summary": summary,
                "dryRun": dry_run
            })),
        }
    }
}

fn to_line(msg: &Value) -> String {
    serde_json::to_string(msg).unwrap_or_default()
}

/// Keys are usually strings or integers; anything else is rendered as text
/// so decimals are not pushed back through a binary float.
fn key_to_json(key: &AttrValue) -> Value {
    match key {
        AttrValue::String(s) => json!(s),
        AttrValue::Number(Number::Integer(i)) => json!(i),
        AttrValue::Number(Number::Unsigned(u)) => json!(u),
        other => json!(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn summary() -> LoadSummary {
        LoadSummary {
            table: "orders-table".to_string(),
            records: 3,
            batches: 1,
            requeued: 0,
            overwritten: 0,
        }
    }

    #[test]
    fn test_pretty_lines() {
        let console = Console::new(OutputFormat::Pretty);
        assert_eq!(
            console.format_record_loaded(0, "order_id", &normalize(&json!("O1"))),
            "  Inserted order_id=O1"
        );
        assert_eq!(
            console.format_table_status("orders-table", &TableStatus::Active),
            "   Table status : ACTIVE"
        );
        assert_eq!(
            console.format_summary(&summary(), false),
            "Finished loading 3 records into 'orders-table'."
        );
        assert!(console.format_summary(&summary(), true).contains("dry run"));
    }

    #[test]
    fn test_json_record_line() {
        let console = Console::new(OutputFormat::Json);
        let line = console.format_record_loaded(2, "order_id", &normalize(&json!(1001)));
        let msg: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(msg["type"], "RECORD_LOADED");
        assert_eq!(msg["record"]["index"], 2);
        assert_eq!(msg["record"]["key"]["order_id"], 1001);
        assert!(msg["emitted_at"].is_i64());
    }

    #[test]
    fn test_json_decimal_key_is_text() {
        let console = Console::new(OutputFormat::Json);
        let line = console.format_record_loaded(0, "id", &normalize(&json!(0.1)));
        let msg: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(msg["record"]["key"]["id"], "0.1");
    }

    #[test]
    fn test_json_summary_and_log() {
        let console = Console::new(OutputFormat::Json);

        let msg: Value = serde_json::from_str(&console.format_summary(&summary(), false)).unwrap();
        assert_eq!(msg["type"], "SUMMARY");
        assert_eq!(msg["summary"]["records"], 3);
        assert_eq!(msg["summary"]["table"], "orders-table");

        let msg: Value =
            serde_json::from_str(&console.format_log(LogLevel::Info, "hello")).unwrap();
        assert_eq!(msg["log"]["level"], "INFO");
        assert_eq!(msg["log"]["message"], "hello");
    }
}
