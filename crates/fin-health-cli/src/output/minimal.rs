use serde_json::Value;

/// Print just the key answer from the output.
///
/// A health report prints one `module: score` line per module; other
/// results print their definition, or the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(Value::Array(assessments)) = result_obj.get("assessments") {
        for a in assessments {
            let module = a.get("module").map(format_minimal).unwrap_or_default();
            let score = a.get("score").and_then(Value::as_f64).unwrap_or(0.0);
            println!("{}: {:.2}", module, score);
        }
        return;
    }

    let priority_keys = ["definition", "free_cash_flow"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    if let Value::Array(items) = result_obj {
        for item in items {
            match item.get("name").or_else(|| item.get("key")) {
                Some(name) => println!("{}", format_minimal(name)),
                None => println!("{}", format_minimal(item)),
            }
        }
        return;
    }

    println!("{}", format_minimal(result_obj));
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
