use serde_json::Value;

/// Flatten nested objects into `(dotted.key, scalar)` rows.
///
/// Quotations nest the pricing result (`pricing.final_quote`); tables and
/// CSV show those as their own rows. Arrays stay as a single cell.
pub fn flatten_object(map: &serde_json::Map<String, Value>) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for (key, val) in map {
        push_rows(&mut rows, key, val);
    }
    rows
}

fn push_rows(rows: &mut Vec<(String, String)>, prefix: &str, value: &Value) {
    match value {
        Value::Object(inner) if !inner.is_empty() => {
            for (key, val) in inner {
                push_rows(rows, &format!("{prefix}.{key}"), val);
            }
        }
        _ => rows.push((prefix.to_string(), format_cell(value))),
    }
}

/// Render a JSON value as a single cell.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_cell).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
