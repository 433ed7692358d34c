use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables.
///
/// Scalar fields (including nested ones, dotted) go into one Field/Value
/// table; arrays of objects (trend lists) each get their own row table
/// underneath.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(_) => {
            let mut scalars = Vec::new();
            let mut row_sections = Vec::new();
            flatten("", value, &mut scalars, &mut row_sections);

            if !scalars.is_empty() {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (field, val) in &scalars {
                    builder.push_record([field.as_str(), val.as_str()]);
                }
                println!("{}", Table::from(builder));
            }

            for (name, rows) in &row_sections {
                println!("\n{}:", name);
                print_rows(rows);
            }
        }
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", value),
    }
}

fn flatten(
    prefix: &str,
    value: &Value,
    scalars: &mut Vec<(String, String)>,
    row_sections: &mut Vec<(String, Vec<Value>)>,
) {
    if let Value::Object(map) = value {
        for (key, val) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            match val {
                Value::Object(_) => flatten(&path, val, scalars, row_sections),
                Value::Array(arr) if arr.iter().any(|v| v.is_object()) => {
                    row_sections.push((path, arr.clone()));
                }
                Value::Array(arr) => {
                    let joined: Vec<String> = arr.iter().map(format_value).collect();
                    scalars.push((path, joined.join("; ")));
                }
                other => scalars.push((path, format_value(other))),
            }
        }
    }
}

fn print_rows(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);
        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
