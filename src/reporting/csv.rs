use csv::Writer;
use serde_json::Value;
use crate::errors::ReportError;
use crate::models::ReportBatch;

/// Render one JSON value as a CSV cell.
///
/// Strings are written verbatim, null as an empty cell, and nested arrays or
/// objects as compact JSON.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Flatten a batch into CSV bytes. Returns `None` for an empty batch so the
/// caller never produces a header-only file.
///
/// Cells are looked up by column name, so records whose keys are missing or
/// reordered still land under the right header.
pub fn render_csv(batch: &ReportBatch) -> Result<Option<Vec<u8>>, ReportError> {
    let columns = batch.columns();
    // Records without any fields have nothing to put under a header
    if batch.is_empty() || columns.is_empty() {
        return Ok(None);
    }

    let mut wtr = Writer::from_writer(vec![]);
    wtr.write_record(&columns)?;

    for record in batch.records() {
        let row: Vec<String> = columns
            .iter()
            .map(|column| record.get(*column).map(format_cell).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| ReportError::Io(e.into_error()))?;
    Ok(Some(data))
}
