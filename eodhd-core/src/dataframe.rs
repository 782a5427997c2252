//! Conversion of record sets into polars `DataFrame`s.

use polars::prelude::{Column, DataFrame, PolarsResult};
use serde_json::Value;

use crate::record::RecordSet;

/// Conversion into a polars `DataFrame`.
pub trait ToDataFrame {
    /// Build a `DataFrame`, one column per field.
    ///
    /// # Errors
    /// Propagates polars construction errors.
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;
}

impl ToDataFrame for RecordSet {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns = self
            .columns()
            .iter()
            .map(|name| {
                let cells: Vec<Option<&Value>> = self
                    .iter()
                    .map(|r| r.get(name).filter(|v| !v.is_null()))
                    .collect();
                infer_column(name, &cells)
            })
            .collect();
        DataFrame::new(columns)
    }
}

// Int64 if every present cell is an integer, Float64 if every one is a number,
// Boolean if every one is a bool, String otherwise. Missing cells become null.
fn infer_column(name: &str, cells: &[Option<&Value>]) -> Column {
    let mut present = cells.iter().flatten().peekable();
    if present.peek().is_none() {
        return Column::new(name.into(), vec![None::<String>; cells.len()]);
    }

    if cells.iter().flatten().all(|v| v.is_i64()) {
        let vals: Vec<Option<i64>> = cells.iter().map(|c| c.and_then(Value::as_i64)).collect();
        return Column::new(name.into(), vals);
    }
    if cells.iter().flatten().all(|v| v.is_number()) {
        let vals: Vec<Option<f64>> = cells.iter().map(|c| c.and_then(Value::as_f64)).collect();
        return Column::new(name.into(), vals);
    }
    if cells.iter().flatten().all(|v| v.is_boolean()) {
        let vals: Vec<Option<bool>> = cells.iter().map(|c| c.and_then(Value::as_bool)).collect();
        return Column::new(name.into(), vals);
    }

    let vals: Vec<Option<String>> = cells
        .iter()
        .map(|c| {
            c.map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        })
        .collect();
    Column::new(name.into(), vals)
}
