//! Extracting several contour levels from one engine.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use isoline_core::{ContourEngine, IndexedContour};

/// An indexed contour together with the level it was extracted at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelContour {
    pub level: f64,
    pub contour: IndexedContour,
}

/// `count` evenly spaced values from `min` to `max` inclusive.
#[must_use]
pub fn linspace(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|k| min + (k as f64) * (max - min) / last)
                .collect()
        }
    }
}

/// `count` evenly spaced levels strictly inside `(min, max)`.
///
/// The extremes are skipped because a level at the global minimum or maximum
/// usually only touches isolated nodes.
#[must_use]
pub fn interior_levels((min, max): (f64, f64), count: usize) -> Vec<f64> {
    let steps = (count + 1) as f64;
    (1..=count)
        .map(|k| min + (k as f64) * (max - min) / steps)
        .collect()
}

/// Extracts every level in `levels`, returning results in input order.
#[must_use]
pub fn compute_levels(engine: &ContourEngine, levels: &[f64]) -> Vec<LevelContour> {
    let contours: Vec<LevelContour> = levels
        .par_iter()
        .map(|&level| LevelContour {
            level,
            contour: engine.compute_indexed(level),
        })
        .collect();
    log::debug!(
        "extracted {} levels, {} segments total",
        contours.len(),
        contours.iter().map(|c| c.contour.num_edges()).sum::<usize>()
    );
    contours
}

/// Extracts `count` levels spread evenly over the engine's sampled value range.
#[must_use]
pub fn compute_interior_levels(engine: &ContourEngine, count: usize) -> Vec<LevelContour> {
    compute_levels(engine, &interior_levels(engine.grid().value_range(), count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use isoline_core::Domain;

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_interior_levels() {
        assert_eq!(interior_levels((0.0, 4.0), 3), vec![1.0, 2.0, 3.0]);
        assert!(interior_levels((0.0, 4.0), 0).is_empty());
    }

    #[test]
    fn test_compute_levels_keeps_order() {
        let engine = ContourEngine::new(
            |x: f64, y: f64| x * x + y * y,
            Domain::new([-1.0, 1.0], [-1.0, 1.0]),
            [40, 40],
        )
        .unwrap();
        let levels = [0.5, 0.1, 0.3, 5.0];
        let contours = compute_levels(&engine, &levels);
        assert_eq!(contours.len(), 4);
        for (contour, &level) in contours.iter().zip(&levels) {
            assert_eq!(contour.level, level);
            assert_eq!(contour.contour, engine.compute_indexed(level));
        }
        assert!(contours[3].contour.is_empty());
        // Larger circles need more segments.
        assert!(contours[0].contour.num_edges() > contours[2].contour.num_edges());
        assert!(contours[2].contour.num_edges() > contours[1].contour.num_edges());
    }

    #[test]
    fn test_interior_levels_are_never_empty_for_smooth_fields() {
        let engine = ContourEngine::new(
            |x: f64, y: f64| x + 2.0 * y,
            Domain::new([0.0, 1.0], [0.0, 1.0]),
            [16, 16],
        )
        .unwrap();
        for contour in compute_interior_levels(&engine, 6) {
            assert!(!contour.contour.is_empty(), "level {}", contour.level);
        }
    }
}
