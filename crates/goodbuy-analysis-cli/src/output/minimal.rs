use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields at the top level and one
/// object level down, then fall back to the first field.
pub fn print_minimal(value: &Value) {
    let priority_keys = [
        "overall_score",
        "risk_level",
        "change_percent",
        "projected_revenue",
        "confidence",
        "operating_cash_flow",
        "net_profit_margin",
    ];

    if let Value::Object(map) = value {
        for key in &priority_keys {
            if let Some(found) = lookup(map, key) {
                println!("{}", format_minimal(found));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(value));
}

/// Top-level key, or a key inside any top-level object.
fn lookup<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(v) = map.get(key) {
        if !v.is_null() {
            return Some(v);
        }
    }
    for nested in map.values() {
        if let Value::Object(inner) = nested {
            if let Some(v) = inner.get(key) {
                if !v.is_null() {
                    return Some(v);
                }
            }
        }
    }
    None
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
