use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML file (chosen by extension) holding one record as an
/// object of `field: value` pairs.
pub fn read_record_map(path: &str) -> Result<Map<String, Value>, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let value: Value = if is_yaml(&canonical) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(format!("'{}' must contain an object of field values", canonical.display()).into()),
    }
}

/// Read the header and the `row`-th data row (0-based) of a CSV export.
pub fn read_csv_row(
    path: &str,
    row: usize,
) -> Result<(Vec<String>, Vec<String>), Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let record = rdr
        .records()
        .nth(row)
        .ok_or_else(|| format!("'{}' has no data row {}", canonical.display(), row))??;
    let values = record.iter().map(str::to_string).collect();
    Ok((headers, values))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve and validate the path, preventing directory traversal.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
