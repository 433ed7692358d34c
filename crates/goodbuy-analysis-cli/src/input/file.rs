use goodbuy_analysis::statement::RawBusinessRecord;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a snapshot file (JSON, or YAML by extension) as a generic value.
pub fn read_value(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;

    let is_yaml = resolved
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let value: Value = if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e))?
    };
    Ok(value)
}

/// Read one or more business records from a file. A single object becomes a
/// one-element history; an array is taken as chronological order, most
/// recent last.
pub fn read_records(path: &str) -> Result<Vec<RawBusinessRecord>, Box<dyn std::error::Error>> {
    records_from_value(read_value(path)?)
}

/// Interpret a generic value as one record or a chronological list.
pub fn records_from_value(value: Value) -> Result<Vec<RawBusinessRecord>, Box<dyn std::error::Error>> {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                return Err("Input contains an empty statement list".into());
            }
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(Into::into))
                .collect()
        }
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}

fn resolve_path(path: &str) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.exists() {
        return Err(format!("File not found: {}", resolved.display()).into());
    }
    if !resolved.is_file() {
        return Err(format!("Not a file: {}", resolved.display()).into());
    }

    Ok(resolved)
}
