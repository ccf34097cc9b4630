use clap::Args;
use serde::Serialize;
use serde_json::{json, Value};

use fin_health_core::glossary::{self, field_label};
use fin_health_core::{Field, Locale};

/// Arguments for glossary lookups
#[derive(Args)]
pub struct GlossaryArgs {
    /// Field or ratio name; omit to list every term
    pub key: Option<String>,

    /// Language of the definitions (en, zh-tw)
    #[arg(long, default_value = "en")]
    pub locale: String,
}

/// Arguments for listing recognised input fields
#[derive(Args)]
pub struct FieldsArgs {
    /// Language of the labels (en, zh-tw)
    #[arg(long, default_value = "en")]
    pub locale: String,
}

pub fn run_glossary(args: GlossaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let locale: Locale = args.locale.parse()?;

    match args.key {
        Some(ref key) => {
            let entry = glossary::lookup(key)
                .ok_or_else(|| format!("Unknown term '{}' (try `finhealth glossary`)", key))?;
            Ok(json!({ "result": entry.localized(locale) }))
        }
        None => {
            let entries: Vec<_> = glossary::entries()
                .iter()
                .map(|e| e.localized(locale))
                .collect();
            Ok(serde_json::to_value(entries)?)
        }
    }
}

#[derive(Serialize)]
struct FieldInfo {
    name: &'static str,
    kind: &'static str,
    label: &'static str,
}

pub fn run_fields(args: FieldsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let locale: Locale = args.locale.parse()?;
    let fields: Vec<FieldInfo> = Field::ALL
        .iter()
        .map(|&f| FieldInfo {
            name: f.as_str(),
            kind: if f.is_series() { "series" } else { "scalar" },
            label: field_label(f).get(locale),
        })
        .collect();
    Ok(serde_json::to_value(fields)?)
}
