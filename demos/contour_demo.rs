//! Contour extraction demonstration.
//!
//! Run with: cargo run --example contour_demo

use isoline::{ContourEngine, ContourNetwork, Domain, Segment};

fn main() -> isoline::Result<()> {
    isoline::init_logging();

    let engine = ContourEngine::new(
        |x: f64, y: f64| (x * x + y * y).sin() - (x * y).cos(),
        Domain::new([-10.0, 10.0], [-10.0, 10.0]),
        [250, 250],
    )?;

    let (min, max) = engine.grid().value_range();
    println!("sampled values in [{min:.3}, {max:.3}]");

    // Naive segments
    let segments = engine.compute_segments(0.5);
    let length: f64 = segments.iter().map(Segment::length).sum();
    println!("segments: {} (total length {length:.2})", segments.len());

    // Indexed line list
    let contour = engine.compute_indexed(0.5);
    println!(
        "indexed: {} vertices, {} edges ({} bytes of vertex data)",
        contour.num_vertices(),
        contour.num_edges(),
        contour.vertex_bytes().len()
    );

    let network = ContourNetwork::from_contour("level 0.5", &contour, 0.0)?;
    println!(
        "network '{}': {} open ends, length scale {:.2}",
        network.name(),
        network.num_open_ends(),
        network.length_scale()
    );

    Ok(())
}
