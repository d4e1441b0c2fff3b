use anyhow::Context;
use serde::Deserialize;

use crate::model::gravity::ZoneRoster;

#[derive(Debug, Deserialize)]
struct TripRow {
    centroid_id: u64,
    productions: f64,
    attractions: f64,
}

/// Load the zone roster from a CSV file with columns:
/// `centroid_id,productions,attractions`. Row order fixes the zone order of
/// every matrix built downstream.
pub fn load_trip_generation(path: &str) -> anyhow::Result<ZoneRoster> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open trip generation CSV: {}", path))?;
    let mut ids = Vec::new();
    let mut productions = Vec::new();
    let mut attractions = Vec::new();
    for result in rdr.deserialize::<TripRow>() {
        let row = result.with_context(|| format!("Malformed trip generation row in {}", path))?;
        ids.push(row.centroid_id);
        productions.push(row.productions);
        attractions.push(row.attractions);
    }
    ZoneRoster::new(ids, productions, attractions)
        .with_context(|| format!("Invalid trip generation data in {}", path))
}
