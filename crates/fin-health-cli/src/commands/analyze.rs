use clap::Args;
use serde_json::{json, Value};

use fin_health_core::report::{render_report, ReportOptions};
use fin_health_core::{analyze, compute_ratios, AnalysisOptions, FinancialRecord, Locale};

use crate::input;

/// Where the record comes from, plus per-field overrides
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RecordArgs {
    /// Path to a JSON or YAML file with `field: value` pairs
    #[arg(long, conflicts_with = "csv")]
    pub input: Option<String>,

    /// Path to a CSV export whose header row names the fields
    #[arg(long)]
    pub csv: Option<String>,

    /// Data row to read from the CSV (0-based)
    #[arg(long, default_value_t = 0, requires = "csv")]
    pub row: usize,

    /// Override one field, e.g. `--set operating_revenue=1,200,000`
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub overrides: Vec<String>,

    /// Language of labels and conclusions (en, zh-tw)
    #[arg(long, default_value = "en")]
    pub locale: String,
}

/// Arguments for the full assessment
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// List each module's question/answer pairs in the text report
    #[arg(long)]
    pub details: bool,
}

/// Build the record from the chosen source, then apply `--set` overrides.
///
/// Unknown or malformed columns in a file are warnings; a bad `--set` is an
/// error, since the user typed it explicitly.
fn load_record(args: &RecordArgs) -> Result<(FinancialRecord, Vec<String>), Box<dyn std::error::Error>> {
    let (mut record, issues) = if let Some(ref path) = args.input {
        FinancialRecord::from_json_map(&input::file::read_record_map(path)?)
    } else if let Some(ref path) = args.csv {
        let (headers, values) = input::file::read_csv_row(path, args.row)?;
        FinancialRecord::import_row(&headers, &values)
    } else if let Some(data) = input::stdin::read_stdin()? {
        match data {
            Value::Object(map) => FinancialRecord::from_json_map(&map),
            _ => return Err("stdin must contain a JSON object of field values".into()),
        }
    } else {
        (FinancialRecord::default(), Vec::new())
    };

    for pair in &args.overrides {
        let (name, raw) = pair
            .split_once('=')
            .ok_or_else(|| format!("--set expects FIELD=VALUE, got '{}'", pair))?;
        record.set_raw(name.trim(), raw)?;
    }

    let warnings: Vec<String> = issues.iter().map(|e| e.to_string()).collect();
    tracing::debug!(
        overrides = args.overrides.len(),
        warnings = warnings.len(),
        "financial record loaded"
    );
    Ok((record, warnings))
}

fn parse_locale(raw: &str) -> Result<Locale, Box<dyn std::error::Error>> {
    Ok(raw.parse::<Locale>()?)
}

pub fn run_analyze(args: AnalyzeArgs, as_report: bool) -> Result<Value, Box<dyn std::error::Error>> {
    let locale = parse_locale(&args.record.locale)?;
    let (record, mut warnings) = load_record(&args.record)?;

    let mut output = analyze(&record, &AnalysisOptions { locale });
    warnings.append(&mut output.warnings);
    output.warnings = warnings;

    if as_report {
        let text = render_report(
            &output.result,
            &record,
            &ReportOptions {
                locale,
                generated_at: Some(chrono::Local::now().naive_local()),
                include_details: args.details,
            },
        );
        return Ok(Value::String(text));
    }

    Ok(serde_json::to_value(output)?)
}

pub fn run_ratios(args: RecordArgs) -> Result<Value, Box<dyn std::error::Error>> {
    parse_locale(&args.locale)?;
    let (record, warnings) = load_record(&args)?;
    let ratios = compute_ratios(&record);
    Ok(json!({
        "result": serde_json::to_value(ratios)?,
        "warnings": warnings,
    }))
}
