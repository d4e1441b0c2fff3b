use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::math::matrix::SquareMatrix;

/// Synthetic impedance used for travel within a zone, in seconds. Input
/// records never set the diagonal; this constant does.
pub const DEFAULT_INTRA_ZONAL_SECONDS: f64 = 90.0;

pub type ZoneId = u64;

/// Ordered zone roster with trip generation totals. The id order fixes the
/// row and column order of every matrix derived from it.
#[derive(Debug, Clone)]
pub struct ZoneRoster {
    pub ids: Vec<ZoneId>,
    pub productions: Vec<f64>,
    pub attractions: Vec<f64>,
}

impl ZoneRoster {
    pub fn new(
        ids: Vec<ZoneId>,
        productions: Vec<f64>,
        attractions: Vec<f64>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(!ids.is_empty(), "zone roster is empty");
        anyhow::ensure!(
            productions.len() == ids.len() && attractions.len() == ids.len(),
            "roster columns disagree on zone count ({} ids, {} productions, {} attractions)",
            ids.len(),
            productions.len(),
            attractions.len()
        );
        let mut seen = HashSet::with_capacity(ids.len());
        for (k, id) in ids.iter().enumerate() {
            anyhow::ensure!(seen.insert(*id), "duplicate zone id {}", id);
            let p = productions[k];
            let a = attractions[k];
            anyhow::ensure!(
                p.is_finite() && p >= 0.0,
                "zone {}: productions must be a non-negative number, got {}",
                id,
                p
            );
            anyhow::ensure!(
                a.is_finite() && a >= 0.0,
                "zone {}: attractions must be a non-negative number, got {}",
                id,
                a
            );
        }
        Ok(Self {
            ids,
            productions,
            attractions,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// One sparse impedance observation: travel cost in seconds from `orig` to
/// `dest`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpedanceRecord {
    pub orig: ZoneId,
    pub dest: ZoneId,
    pub seconds: f64,
}

/// Assemble the square impedance matrix for the given zone order.
///
/// Records naming a zone outside the roster are dropped; duplicate (orig,
/// dest) records apply in input order, last write wins. The diagonal is
/// filled with `intra_zonal_seconds` afterwards, overwriting any supplied
/// intra-zonal record. Pairs with no record stay missing (`None`) so that
/// incomplete coverage surfaces downstream instead of becoming a zero.
pub fn build_impedance_matrix(
    ids: &[ZoneId],
    records: &[ImpedanceRecord],
    intra_zonal_seconds: f64,
) -> SquareMatrix {
    let n = ids.len();
    let index: HashMap<ZoneId, usize> = ids.iter().copied().zip(0..n).collect();
    let mut f_time = SquareMatrix::new(n);
    for rec in records {
        if let (Some(&i), Some(&j)) = (index.get(&rec.orig), index.get(&rec.dest)) {
            f_time.set(i, j, rec.seconds);
        }
    }
    for i in 0..n {
        f_time.set(i, i, intra_zonal_seconds);
    }
    f_time
}

/// Elementwise friction factor 1/t² over the impedance matrix. Missing cells
/// stay missing. A present cell of zero seconds has no defined friction and
/// is rejected with the offending zone pair named.
pub fn friction_factors(f_time: &SquareMatrix, ids: &[ZoneId]) -> anyhow::Result<SquareMatrix> {
    let n = f_time.n();
    anyhow::ensure!(
        ids.len() == n,
        "impedance matrix is {}x{} but roster has {} zones",
        n,
        n,
        ids.len()
    );
    let mut friction = SquareMatrix::new(n);
    for i in 0..n {
        for j in 0..n {
            if let Some(t) = f_time.get(i, j) {
                anyhow::ensure!(
                    t > 0.0,
                    "impedance {} -> {} is {} seconds; friction 1/t^2 is undefined",
                    ids[i],
                    ids[j],
                    t
                );
                friction.set(i, j, 1.0 / (t * t));
            }
        }
    }
    Ok(friction)
}

/// Why a single origin row of the demand matrix could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowError {
    /// At least one destination has no impedance value; `dest` is the first.
    MissingImpedance { dest: ZoneId },
    /// Attraction-weighted friction sums to zero over all destinations, so
    /// the production total cannot be apportioned.
    ZeroWeight,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::MissingImpedance { dest } => write!(f, "no impedance to zone {}", dest),
            RowError::ZeroWeight => write!(f, "attraction-weighted friction sums to zero"),
        }
    }
}

/// Zone-to-zone demand, one row per origin in roster order. Rows are kept
/// individually so one invalid origin does not discard the others.
#[derive(Debug, Clone)]
pub struct DemandMatrix {
    pub zones: Vec<ZoneId>,
    pub rows: Vec<Result<Vec<f64>, RowError>>,
}

/// One flattened demand cell, ready for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DemandRecord {
    pub zone_orig: ZoneId,
    pub zone_dest: ZoneId,
    pub demand: i64,
}

impl DemandMatrix {
    /// Origins whose demand row could not be computed, with the reason.
    pub fn invalid_origins(&self) -> Vec<(ZoneId, RowError)> {
        self.zones
            .iter()
            .zip(self.rows.iter())
            .filter_map(|(z, row)| row.as_ref().err().map(|e| (*z, *e)))
            .collect()
    }

    /// Round every cell to the nearest integer (ties away from zero, per
    /// `f64::round`) and flatten to one record per ordered zone pair, in
    /// row-major roster order. Fails if any origin row is invalid, naming
    /// each one.
    ///
    /// Cells are rounded independently, so a row's integer sum can drift
    /// from the rounded production total by a few trips; no rebalancing is
    /// applied.
    pub fn rounded_records(&self) -> anyhow::Result<Vec<DemandRecord>> {
        let invalid = self.invalid_origins();
        if !invalid.is_empty() {
            let detail: Vec<String> = invalid
                .iter()
                .map(|(z, e)| format!("zone {}: {}", z, e))
                .collect();
            anyhow::bail!(
                "demand is undefined for {} origin(s): {}",
                invalid.len(),
                detail.join("; ")
            );
        }
        let n = self.zones.len();
        let mut out = Vec::with_capacity(n * n);
        for (i, row) in self.rows.iter().enumerate() {
            if let Ok(values) = row {
                for (j, v) in values.iter().enumerate() {
                    out.push(DemandRecord {
                        zone_orig: self.zones[i],
                        zone_dest: self.zones[j],
                        demand: v.round() as i64,
                    });
                }
            }
        }
        Ok(out)
    }
}

/// Production-constrained distribution: apportion each origin's production
/// total across destinations in proportion to attraction-weighted friction.
///
/// For every valid origin i the row sum equals `productions[i]` up to
/// floating-point rounding, since the row is its weight vector rescaled to
/// that total. Attractions shape relative pull only; column sums are not
/// constrained. Single closed-form pass, no iteration.
pub fn distribute(friction: &SquareMatrix, roster: &ZoneRoster) -> anyhow::Result<DemandMatrix> {
    let n = roster.len();
    anyhow::ensure!(
        friction.n() == n,
        "friction matrix is {}x{} but roster has {} zones",
        friction.n(),
        friction.n(),
        n
    );
    let rows = (0..n).map(|i| distribute_row(friction, roster, i)).collect();
    Ok(DemandMatrix {
        zones: roster.ids.clone(),
        rows,
    })
}

fn distribute_row(
    friction: &SquareMatrix,
    roster: &ZoneRoster,
    i: usize,
) -> Result<Vec<f64>, RowError> {
    let n = roster.len();
    let mut weights = vec![0.0; n];
    let mut denom = 0.0;
    for j in 0..n {
        let f = friction.get(i, j).ok_or(RowError::MissingImpedance {
            dest: roster.ids[j],
        })?;
        weights[j] = f * roster.attractions[j];
        denom += weights[j];
    }
    if denom <= 0.0 {
        return Err(RowError::ZeroWeight);
    }
    let p = roster.productions[i];
    Ok(weights.iter().map(|w| w * p / denom).collect())
}
