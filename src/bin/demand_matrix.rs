use tripdist::io::demand_out::write_demand_csv;
use tripdist::io::impedance::load_impedance_records;
use tripdist::io::trip_generation::load_trip_generation;
use tripdist::math::matrix::SquareMatrix;
use tripdist::model::gravity::{
    build_impedance_matrix, distribute, friction_factors, ZoneRoster, DEFAULT_INTRA_ZONAL_SECONDS,
};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let trips_path = args
        .next()
        .unwrap_or_else(|| "trip_generation.csv".to_string());
    let impedance_path = args
        .next()
        .unwrap_or_else(|| "free_flow_time.csv".to_string());
    let output_path = args.next().unwrap_or_else(|| "demand_matrix.csv".to_string());

    let roster = load_trip_generation(&trips_path)?;
    println!("Trip generation ({} zones):", roster.len());
    println!("centroid_id,productions,attractions");
    for k in 0..roster.len() {
        println!(
            "{},{},{}",
            roster.ids[k], roster.productions[k], roster.attractions[k]
        );
    }

    let records = load_impedance_records(&impedance_path)?;
    let f_time = build_impedance_matrix(&roster.ids, &records, DEFAULT_INTRA_ZONAL_SECONDS);
    println!("Impedance matrix (seconds):");
    print_matrix(&roster, &f_time);

    let friction = friction_factors(&f_time, &roster.ids)?;
    let demand = distribute(&friction, &roster)?;
    let out_records = demand.rounded_records()?;
    write_demand_csv(&output_path, &out_records)?;
    println!("Saved {}", output_path);
    Ok(())
}

fn print_matrix(roster: &ZoneRoster, m: &SquareMatrix) {
    let header: Vec<String> = roster.ids.iter().map(|z| z.to_string()).collect();
    println!("ZoneOrig\\ZoneDest,{}", header.join(","));
    for i in 0..m.n() {
        let cells: Vec<String> = (0..m.n())
            .map(|j| match m.get(i, j) {
                Some(v) => format!("{}", v),
                None => "-".to_string(),
            })
            .collect();
        println!("{},{}", roster.ids[i], cells.join(","));
    }
}
