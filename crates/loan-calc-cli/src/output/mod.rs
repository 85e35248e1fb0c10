pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Schedule columns in reading order; other keys follow alphabetically.
const ROW_COLUMNS: [&str; 4] = ["month", "principal", "interest", "balance"];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

pub(crate) fn ordered_headers(first: &Map<String, Value>) -> Vec<&str> {
    let mut headers: Vec<&str> = ROW_COLUMNS
        .iter()
        .copied()
        .filter(|c| first.contains_key(*c))
        .collect();
    headers.extend(
        first
            .keys()
            .map(|k| k.as_str())
            .filter(|k| !ROW_COLUMNS.contains(k)),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_columns_first() {
        let row = json!({"balance": "1", "interest": "2", "month": 3, "note": "x", "principal": "4"});
        let headers = ordered_headers(row.as_object().unwrap());
        assert_eq!(headers, vec!["month", "principal", "interest", "balance", "note"]);
    }
}
