use serde_json::{Map, Value};
use crate::errors::ReportError;
use super::envelope::{embedded, EMBEDDED_KEY, FINDINGS_KEY};

/// A single finding. Field set and order are whatever the vendor returned.
pub type FindingRecord = Map<String, Value>;

/// Ordered findings from one completed report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportBatch {
    records: Vec<FindingRecord>,
}

impl ReportBatch {
    pub fn new(records: Vec<FindingRecord>) -> Self {
        Self { records }
    }

    /// Extract the findings list from a completed report body.
    pub fn from_report(body: &Value) -> Result<Self, ReportError> {
        let findings = embedded(body)?
            .get(FINDINGS_KEY)
            .ok_or_else(|| ReportError::MalformedResponse(format!("missing '{}.{}'", EMBEDDED_KEY, FINDINGS_KEY)))?
            .as_array()
            .ok_or_else(|| ReportError::MalformedResponse(format!("'{}' is not an array", FINDINGS_KEY)))?;

        let records = findings
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                entry.as_object().cloned().ok_or_else(|| {
                    ReportError::MalformedResponse(format!("finding {} is not an object", i))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { records })
    }

    pub fn records(&self) -> &[FindingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Union of field names across all records, in first-seen order.
    ///
    /// For a batch where every record has the same shape this is exactly the
    /// first record's key order.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for record in &self.records {
            for key in record.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }
        columns
    }

    /// Whether every record carries the same keys in the same order.
    pub fn is_uniform(&self) -> bool {
        match self.records.split_first() {
            None => true,
            Some((first, rest)) => rest.iter().all(|r| r.keys().eq(first.keys())),
        }
    }
}
