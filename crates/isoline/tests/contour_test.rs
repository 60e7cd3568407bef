//! End-to-end tests for contour extraction through the public API.

use std::cmp::Ordering;

use isoline::*;

fn wavy(x: f64, y: f64) -> f64 {
    (x * x + y * y).sin() - (x * y).cos()
}

fn wavy_engine() -> ContourEngine {
    ContourEngine::new(
        wavy,
        Domain::new([-10.0, 10.0], [-10.0, 10.0]),
        [250, 250],
    )
    .expect("engine construction failed")
}

fn compare(a: &Segment, b: &Segment) -> Ordering {
    let key = |s: &Segment| [s.start.x, s.start.y, s.end.x, s.end.y];
    key(a)
        .iter()
        .zip(key(b).iter())
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn sorted_canonical(segments: impl IntoIterator<Item = Segment>) -> Vec<Segment> {
    let mut segments: Vec<Segment> = segments.into_iter().map(Segment::canonical).collect();
    segments.sort_by(compare);
    segments
}

#[test]
fn test_wavy_field_both_modes_agree() {
    let engine = wavy_engine();
    let segments = engine.compute_segments(0.5);
    let indexed = engine.compute_indexed(0.5);

    assert!(!segments.is_empty());
    assert!(!indexed.is_empty());
    assert_eq!(segments.len(), indexed.num_edges());
    assert_eq!(
        sorted_canonical(segments),
        sorted_canonical(indexed.segments())
    );
}

#[test]
fn test_wavy_field_indexed_output_is_deduplicated() {
    let engine = wavy_engine();
    let indexed = engine.compute_indexed(0.5);

    assert_eq!(indexed.validate(), Ok(()));
    assert!(indexed.num_vertices() <= 2 * indexed.num_edges());
    assert!(indexed.num_vertices() < 2 * indexed.num_edges());

    // No two vertices coincide.
    let mut keys: Vec<(u64, u64)> = indexed
        .vertices
        .iter()
        .map(|v| (v.x.to_bits(), v.y.to_bits()))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), indexed.num_vertices());
}

#[test]
fn test_segment_count_bounded_by_cells() {
    let engine = wavy_engine();
    for level in [-1.5, -0.5, 0.0, 0.5, 1.5] {
        let segments = engine.compute_segments(level);
        assert!(segments.len() <= 2 * engine.grid().num_cells());
    }
}

#[test]
fn test_vertices_stay_inside_domain() {
    let domain = Domain::new([-10.0, 10.0], [-10.0, 10.0]);
    let engine = wavy_engine();
    for vertex in &engine.compute_indexed(0.5).vertices {
        assert!(vertex.x >= domain.x[0] && vertex.x <= domain.x[1]);
        assert!(vertex.y >= domain.y[0] && vertex.y <= domain.y[1]);
    }
}

#[test]
fn test_level_outside_range_is_empty() {
    let engine = wavy_engine();
    let (min, max) = engine.grid().value_range();
    for level in [min - 1.0, max + 1.0, f64::NAN] {
        assert!(engine.compute_segments(level).is_empty());
        assert!(engine.compute_indexed(level).is_empty());
    }
}

#[test]
fn test_repeated_extraction_is_deterministic() {
    let engine = wavy_engine();
    assert_eq!(engine.compute_segments(0.25), engine.compute_segments(0.25));
    assert_eq!(engine.compute_indexed(0.25), engine.compute_indexed(0.25));
}

#[test]
fn test_parallel_matches_sequential() {
    let domain = Domain::new([-10.0, 10.0], [-10.0, 10.0]);
    let parallel = ContourEngine::with_options(
        wavy,
        domain,
        [120, 301],
        ContourOptions::default().with_min_rows_per_band(8),
    )
    .unwrap();
    let sequential = ContourEngine::with_options(
        wavy,
        domain,
        [120, 301],
        ContourOptions::default().with_parallel(false),
    )
    .unwrap();

    assert_eq!(parallel.grid().values(), sequential.grid().values());
    assert_eq!(parallel.compute_segments(0.5), sequential.compute_segments(0.5));
    assert_eq!(parallel.compute_indexed(0.5), sequential.compute_indexed(0.5));
}

#[test]
fn test_circle_converges_with_resolution() {
    let domain = Domain::new([-2.0, 2.0], [-2.0, 2.0]);
    let errors: Vec<f64> = [20, 40, 80, 160]
        .into_iter()
        .map(|n| {
            let engine = ContourEngine::new(|x: f64, y: f64| x * x + y * y, domain, [n, n]).unwrap();
            let circle = engine.compute_indexed(1.0);

            // A closed curve away from the boundary: every vertex has two edges.
            assert_eq!(circle.num_vertices(), circle.num_edges());

            circle
                .vertices
                .iter()
                .map(|v| (v.length() - 1.0).abs())
                .fold(0.0, f64::max)
        })
        .collect();

    assert!(errors[0] < 0.05, "errors: {errors:?}");
    assert!(errors[3] < 1e-3, "errors: {errors:?}");
    assert!(errors[3] < errors[0] / 4.0, "errors: {errors:?}");
}

#[test]
fn test_straight_line_is_exact() {
    let engine = ContourEngine::new(
        |x: f64, y: f64| x + y,
        Domain::new([0.0, 1.0], [0.0, 1.0]),
        [11, 11],
    )
    .unwrap();
    // Node sums are multiples of 0.1, so the line never passes through a node.
    let segments = engine.compute_segments(1.05);
    assert!(!segments.is_empty());
    for segment in &segments {
        assert!((segment.start.x + segment.start.y - 1.05).abs() < 1e-12);
        assert!((segment.end.x + segment.end.y - 1.05).abs() < 1e-12);
    }
    let total: f64 = segments.iter().map(Segment::length).sum();
    assert!((total - 0.95 * std::f64::consts::SQRT_2).abs() < 1e-9);
}

#[test]
fn test_construction_errors() {
    let unit = Domain::new([0.0, 1.0], [0.0, 1.0]);

    let err = ContourEngine::new(|x: f64, _y: f64| x, unit, [1, 5]).unwrap_err();
    assert!(matches!(err, ContourError::InvalidResolution { nx: 1, ny: 5 }));

    let err = ContourEngine::new(|x: f64, _y: f64| x, Domain::new([1.0, 0.0], [0.0, 1.0]), [4, 4])
        .unwrap_err();
    assert!(matches!(err, ContourError::InvalidDomain { axis: 'x', .. }));

    let err = ContourEngine::new(
        |x: f64, _y: f64| x,
        Domain::new([0.0, 1.0], [0.0, f64::INFINITY]),
        [4, 4],
    )
    .unwrap_err();
    assert!(matches!(err, ContourError::InvalidDomain { axis: 'y', .. }));

    let err = ContourEngine::new(
        |x: f64, _y: f64| if x > 0.5 { f64::NAN } else { x },
        unit,
        [5, 5],
    )
    .unwrap_err();
    match err {
        ContourError::NonFiniteSample { x, y, value } => {
            assert_eq!((x, y), (0.75, 0.0));
            assert!(value.is_nan());
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = ContourEngine::new(|x: f64, _y: f64| x, unit, [100_000, 100_000]).unwrap_err();
    assert!(matches!(err, ContourError::ResolutionTooLarge { .. }));
}

#[test]
fn test_gpu_buffers() {
    let engine = ContourEngine::new(
        |x: f64, y: f64| x * x + y * y,
        Domain::new([-1.0, 1.0], [-1.0, 1.0]),
        [32, 32],
    )
    .unwrap();
    let circle = engine.compute_indexed(0.25);

    let vertices = circle.gpu_vertices();
    assert_eq!(vertices.len(), circle.num_vertices());
    assert!(vertices.iter().all(|v| v.position[2] == 0.0));

    let indices = circle.index_buffer();
    assert_eq!(indices.len(), 2 * circle.num_edges());
    assert!(indices.iter().all(|&i| (i as usize) < circle.num_vertices()));

    assert_eq!(circle.vertex_bytes().len(), 12 * circle.num_vertices());
    assert_eq!(circle.index_bytes().len(), 4 * indices.len());
}

#[test]
fn test_levels_network_and_export() {
    let engine = ContourEngine::new(
        |x: f64, y: f64| x * x + y * y,
        Domain::new([-1.0, 1.0], [-1.0, 1.0]),
        [48, 48],
    )
    .unwrap();

    let levels = compute_levels(&engine, &linspace(0.1, 0.7, 4));
    assert_eq!(levels.len(), 4);

    let network = ContourNetwork::from_levels("rings", &levels).unwrap();
    let total_edges: usize = levels.iter().map(|l| l.contour.num_edges()).sum();
    assert_eq!(network.num_edges(), total_edges);
    assert_eq!(network.num_open_ends(), 0);

    let mut buffer = Vec::new();
    write_levels_json(&levels, &mut buffer).unwrap();
    let documents: Vec<ContourDocument> = serde_json::from_slice(&buffer).unwrap();
    for (document, level) in documents.iter().zip(&levels) {
        assert_eq!(document.level, level.level);
        assert_eq!(document.to_contour(), level.contour);
    }
}

#[test]
fn test_options_from_json() {
    let options =
        ContourOptions::from_json_str(r#"{"parallel": false, "saddle_rule": "CenterSample"}"#)
            .unwrap();
    assert!(!options.parallel);
    assert_eq!(options.saddle_rule, SaddleRule::CenterSample);

    let engine = ContourEngine::with_options(
        wavy,
        Domain::new([-3.0, 3.0], [-3.0, 3.0]),
        [60, 60],
        options,
    )
    .unwrap();
    assert_eq!(engine.options().saddle_rule, SaddleRule::CenterSample);
    assert!(!engine.compute_indexed(0.5).is_empty());
}
