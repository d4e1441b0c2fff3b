use anyhow::Context;

use crate::model::gravity::DemandRecord;

/// Write demand records as CSV with header `ZoneOrig,ZoneDest,Demand`, one
/// line per record in the given order. Output is byte-deterministic for
/// identical input.
pub fn write_demand_csv(path: &str, records: &[DemandRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create demand CSV: {}", path))?;
    for rec in records {
        wtr.serialize(rec)
            .with_context(|| format!("Failed to write demand record to {}", path))?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to flush demand CSV: {}", path))?;
    Ok(())
}
