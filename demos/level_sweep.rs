//! Sweeps several levels and writes them to a JSON file.
//!
//! Run with: cargo run --example level_sweep -- [output.json]

use std::fs::File;
use std::io::{BufWriter, Write};

use isoline::{
    compute_interior_levels, write_levels_json, ContourEngine, ContourNetwork, ContourOptions,
    Domain,
};

fn main() -> isoline::Result<()> {
    isoline::init_logging();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "level_sweep.json".to_string());

    let engine = ContourEngine::with_options(
        |x: f64, y: f64| (3.0 * x).sin() * (2.0 * y).cos() + 0.25 * x * y,
        Domain::new([-3.0, 3.0], [-3.0, 3.0]),
        [400, 400],
        ContourOptions::default().with_min_rows_per_band(32),
    )?;

    let levels = compute_interior_levels(&engine, 12);
    for level in &levels {
        println!(
            "level {:>7.3}: {:>5} vertices, {:>5} edges",
            level.level,
            level.contour.num_vertices(),
            level.contour.num_edges()
        );
    }

    let network = ContourNetwork::from_levels("sweep", &levels)?;
    println!(
        "stacked network: {} nodes, {} edges, total length {:.2}",
        network.num_nodes(),
        network.num_edges(),
        network.total_length()
    );

    let mut writer = BufWriter::new(File::create(&output)?);
    write_levels_json(&levels, &mut writer)?;
    writer.flush()?;
    println!("wrote {output}");

    Ok(())
}
