use serde_json::Value;

/// Print just the key answer from the output, e.g. `2051.65 USD`.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    let currency = value.get("currency").and_then(Value::as_str);

    if let Some(emi) = result_obj.get("emi").filter(|v| !v.is_null()) {
        return match currency {
            Some(code) => format!("{} {}", format_minimal(emi), code),
            None => format_minimal(emi),
        };
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
