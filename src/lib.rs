pub mod io;
pub mod math;
pub mod model;

pub use model::gravity::{
    build_impedance_matrix, distribute, friction_factors, DemandMatrix, DemandRecord,
    ImpedanceRecord, RowError, ZoneId, ZoneRoster, DEFAULT_INTRA_ZONAL_SECONDS,
};
