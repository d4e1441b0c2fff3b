use anyhow::Context;
use serde::Deserialize;

use crate::model::gravity::ImpedanceRecord;

#[derive(Debug, Deserialize)]
struct ImpedanceRow {
    row: u64,
    column: u64,
    free_flow_time: f64,
}

/// Load sparse impedance records from a CSV file with columns:
/// `row,column,free_flow_time` (origin zone, destination zone, seconds).
/// Negative or non-finite costs are rejected here; a zero cost passes this
/// boundary and is rejected at friction time unless the diagonal constant
/// overwrites it first.
pub fn load_impedance_records(path: &str) -> anyhow::Result<Vec<ImpedanceRecord>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open impedance CSV: {}", path))?;
    let mut records = Vec::new();
    for result in rdr.deserialize::<ImpedanceRow>() {
        let row = result.with_context(|| format!("Malformed impedance row in {}", path))?;
        anyhow::ensure!(
            row.free_flow_time.is_finite() && row.free_flow_time >= 0.0,
            "free_flow_time {} -> {} must be a non-negative number, got {}",
            row.row,
            row.column,
            row.free_flow_time
        );
        records.push(ImpedanceRecord {
            orig: row.row,
            dest: row.column,
            seconds: row.free_flow_time,
        });
    }
    Ok(records)
}
