use serde_json::Value;
use std::io::{self, Write};

use super::ordered_headers;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(value, stdout.lock()) {
        log::error!("CSV output error: {}", e);
    }
}

/// A schedule becomes one record per month; any other result becomes
/// field/value pairs.
fn write_csv<W: Write>(value: &Value, out: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    let result = value.get("result").unwrap_or(value);
    match result {
        Value::Object(map) => {
            if let Some(Value::Array(rows)) = map.get("rows") {
                write_array_csv(&mut wtr, rows)?;
            } else {
                wtr.write_record(["field", "value"])?;
                for (key, val) in map {
                    wtr.write_record([key.as_str(), &format_csv_value(val)])?;
                }
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr)?,
        _ => wtr.write_record([&format_csv_value(result)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_array_csv<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([&format_csv_value(item)])?;
        }
        return Ok(());
    };

    let headers = ordered_headers(first);
    wtr.write_record(&headers)?;

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(value, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_schedule_rows_as_records() {
        let value = json!({"result": {"emi": "10", "rows": [
            {"month": 1, "principal": "9.00", "interest": "1.00", "balance": "91.00"},
            {"month": 2, "principal": "9.09", "interest": "0.91", "balance": "81.91"}
        ]}});
        let text = render(&value);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1,9.00,1.00,91.00");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_write_error_is_reported() {
        let result = write_csv(&json!({"result": {"emi": "2051.65"}}), ClosedPipe);
        assert!(result.is_err());
    }

    #[test]
    fn test_summary_as_field_value() {
        let text = render(&json!({"result": {"emi": "2051.65"}}));
        assert_eq!(text, "field,value\nemi,2051.65\n");
    }
}
