//! Bulk population of a record from an external tabular or JSON source.
//!
//! Matching is by exact field name (after trimming). Anything that does not
//! match, or does not parse, leaves the default in place and comes back as a
//! warning; the import itself never fails.

use serde_json::{Map, Value};

use super::FinancialRecord;
use crate::error::FinHealthError;

impl FinancialRecord {
    /// Build a record from one row of a table: `headers[i]` names the column
    /// holding `values[i]`. Missing trailing cells count as blank.
    pub fn import_row<H, V>(headers: &[H], values: &[V]) -> (Self, Vec<FinHealthError>)
    where
        H: AsRef<str>,
        V: AsRef<str>,
    {
        let mut record = Self::default();
        let mut warnings = Vec::new();
        for (i, header) in headers.iter().enumerate() {
            let name = header.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let cell = values.get(i).map(AsRef::as_ref).unwrap_or("");
            if let Err(e) = record.set_raw(name, cell) {
                warnings.push(e);
            }
        }
        tracing::debug!(
            columns = headers.len(),
            warnings = warnings.len(),
            "imported financial record from tabular row"
        );
        (record, warnings)
    }

    /// Build a record from a JSON object, ignoring (with a warning) any key
    /// that is not a recognised field.
    pub fn from_json_map(map: &Map<String, Value>) -> (Self, Vec<FinHealthError>) {
        let mut record = Self::default();
        let warnings = record.merge_json(map);
        (record, warnings)
    }

    /// Apply every key of `map` on top of the current values.
    pub fn merge_json(&mut self, map: &Map<String, Value>) -> Vec<FinHealthError> {
        map.iter()
            .filter_map(|(key, value)| self.set_json(key, value).err())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_import_row_matches_columns() {
        let headers = ["operating_revenue", "cost_of_goods_sold", "three_year_operating_cash_flows"];
        let values = ["1000000", "600000", "100,200,300"];
        let (record, warnings) = FinancialRecord::import_row(&headers, &values);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(record.operating_revenue, 1_000_000.0);
        assert_eq!(record.cost_of_goods_sold, 600_000.0);
        assert_eq!(record.three_year_operating_cash_flows, [100.0, 200.0, 300.0]);
    }

    #[test]
    fn test_import_row_warns_on_unmatched_and_malformed() {
        let headers = ["company", "inventory", "total_assets"];
        let values = ["ACME", "oops", "5000"];
        let (record, warnings) = FinancialRecord::import_row(&headers, &values);
        assert_eq!(warnings.len(), 2);
        assert!(matches!(warnings[0], FinHealthError::UnknownField(_)));
        assert!(matches!(warnings[1], FinHealthError::InvalidNumber { .. }));
        assert_eq!(record.inventory, 0.0);
        assert_eq!(record.total_assets, 5000.0);
    }

    #[test]
    fn test_import_row_short_row_is_blank() {
        let headers = ["operating_revenue", "inventory"];
        let values = ["10"];
        let (record, warnings) = FinancialRecord::import_row(&headers, &values);
        assert!(warnings.is_empty());
        assert_eq!(record.inventory, 0.0);
    }

    #[test]
    fn test_from_json_map_ignores_unknown() {
        let value = json!({
            "operating_revenue": 1000,
            "ticker": "ACME",
            "three_year_operating_cash_flows": [1, 2]
        });
        let map = value.as_object().unwrap();
        let (record, warnings) = FinancialRecord::from_json_map(map);
        assert_eq!(record.operating_revenue, 1000.0);
        assert_eq!(warnings.len(), 2);
        assert_eq!(record.three_year_operating_cash_flows, [0.0; 3]);
    }
}
