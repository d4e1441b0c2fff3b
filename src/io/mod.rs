pub mod demand_out;
pub mod impedance;
pub mod trip_generation;
