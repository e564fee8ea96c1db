use serde_json::Value;
use std::io;

use super::flatten::{flatten_object, format_cell};

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// Envelopes become `field,value` rows (nested objects dotted) followed by
/// one `warning` row per warning. Arrays become one row per element.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => match (map.get("result"), map.get("results")) {
            (Some(Value::Object(result)), _) => {
                write_field_rows(&mut wtr, result);
                if let Some(Value::Array(warnings)) = map.get("warnings") {
                    for w in warnings {
                        let _ = wtr.write_record(["warning", &format_cell(w)]);
                    }
                }
            }
            (_, Some(Value::Array(results))) => write_array_csv(&mut wtr, results),
            _ => write_field_rows(&mut wtr, map),
        },
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_cell(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_field_rows(wtr: &mut StdoutWriter<'_>, map: &serde_json::Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in flatten_object(map) {
        let _ = wtr.write_record([key.as_str(), val.as_str()]);
    }
}

fn write_array_csv(wtr: &mut StdoutWriter<'_>, arr: &[Value]) {
    // Headers come from the first element; later elements fill by key.
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([&format_cell(item)]);
        }
        return;
    };

    let headers: Vec<String> = flatten_object(first).into_iter().map(|(k, _)| k).collect();
    let _ = wtr.write_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let cells = flatten_object(map);
            let row: Vec<String> = headers
                .iter()
                .map(|h| {
                    cells
                        .iter()
                        .find(|(k, _)| k == h)
                        .map(|(_, v)| v.clone())
                        .unwrap_or_default()
                })
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
