use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) if result.contains_key("assessments") => {
                write_health_report(&mut wtr, result);
            }
            Some(Value::Object(result)) => {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in result {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
            _ => {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        },
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

/// Long format: `section,key,value`, ratios first, then one score and
/// conclusion pair per module.
fn write_health_report(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    result: &serde_json::Map<String, Value>,
) {
    let _ = wtr.write_record(["section", "key", "value"]);
    if let Some(Value::Object(ratios)) = result.get("ratios") {
        for (key, val) in ratios {
            let _ = wtr.write_record(["ratio", key.as_str(), &format_csv_value(val)]);
        }
    }
    if let Some(Value::Array(assessments)) = result.get("assessments") {
        for a in assessments {
            let module = a.get("module").map(format_csv_value).unwrap_or_default();
            for key in ["score", "conclusion", "overall_conclusion"] {
                if let Some(val) = a.get(key) {
                    let _ = wtr.write_record([module.as_str(), key, &format_csv_value(val)]);
                }
            }
        }
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
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
