//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::track::TyphoonRecord;

/// JSON formatter - outputs the full record as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON record"
    }

    fn format(&self, record: &TyphoonRecord) -> Result<String> {
        Ok(serde_json::to_string_pretty(record)?)
    }
}
