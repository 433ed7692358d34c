use serde_json::Value;
use std::io;

/// Write output as two-column CSV to stdout. Nested fields use dotted
/// paths; list entries are indexed (for example `trends.0.metric`).
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let mut rows = Vec::new();
    flatten("", value, &mut rows);

    let _ = wtr.write_record(["field", "value"]);
    for (field, val) in rows {
        let _ = wtr.write_record([field.as_str(), val.as_str()]);
    }
    let _ = wtr.flush();
}

fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, val, rows);
            }
        }
        Value::Array(arr) => {
            for (i, val) in arr.iter().enumerate() {
                let path = if prefix.is_empty() {
                    i.to_string()
                } else {
                    format!("{prefix}.{i}")
                };
                flatten(&path, val, rows);
            }
        }
        Value::String(s) => rows.push((prefix.to_string(), s.clone())),
        Value::Number(n) => rows.push((prefix.to_string(), n.to_string())),
        Value::Bool(b) => rows.push((prefix.to_string(), b.to_string())),
        Value::Null => rows.push((prefix.to_string(), String::new())),
    }
}
