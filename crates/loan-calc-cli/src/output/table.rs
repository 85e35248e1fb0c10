use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::ordered_headers;

/// Format output as tables: a field/value summary, then the schedule rows
/// when present.
pub fn print_table(value: &Value) {
    println!("{}", render_table(value));
}

fn render_table(value: &Value) -> String {
    let mut sections: Vec<String> = Vec::new();

    match value {
        Value::Object(envelope) => {
            let result = envelope.get("result").unwrap_or(value);
            if let Value::Object(res_map) = result {
                sections.push(summary_table(res_map));
                if let Some(Value::Array(rows)) = res_map.get("rows") {
                    sections.push(array_table(rows));
                }
            } else {
                sections.push(format_value(result));
            }
            sections.extend(envelope_notes(envelope));
        }
        Value::Array(arr) => sections.push(array_table(arr)),
        _ => sections.push(value.to_string()),
    }

    sections.join("\n\n")
}

fn summary_table(map: &Map<String, Value>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map.iter().filter(|(k, _)| k.as_str() != "rows") {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    Table::from(builder).to_string()
}

fn array_table(arr: &[Value]) -> String {
    let Some(Value::Object(first)) = arr.first() else {
        let items: Vec<String> = arr.iter().map(format_value).collect();
        return if items.is_empty() {
            "(empty)".to_string()
        } else {
            items.join("\n")
        };
    };

    let headers = ordered_headers(first);
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| column_title(h)));
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    Table::from(builder).to_string()
}

fn column_title(key: &str) -> String {
    match key {
        "month" => "Month".into(),
        "principal" => "Principal".into(),
        "interest" => "Interest".into(),
        "balance" => "Remaining Balance".into(),
        other => other.to_string(),
    }
}

fn envelope_notes(envelope: &Map<String, Value>) -> Vec<String> {
    let mut notes = Vec::new();

    if let Some(Value::String(code)) = envelope.get("currency") {
        notes.push(format!("Currency: {}", code));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        let lines: Vec<String> = warnings
            .iter()
            .filter_map(Value::as_str)
            .map(|w| format!("  - {}", w))
            .collect();
        if !lines.is_empty() {
            notes.push(format!("Warnings:\n{}", lines.join("\n")));
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        notes.push(format!("Methodology: {}", meth));
    }

    notes
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
