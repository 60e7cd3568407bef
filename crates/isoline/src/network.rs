//! Contours lifted into 3D curve networks.

#![allow(clippy::cast_possible_truncation)]

use glam::Vec3;
use isoline_core::{ContourError, IndexedContour, Result};

use crate::levels::LevelContour;

/// A curve network (nodes connected by edges) built from contour output.
///
/// Contour vertices become nodes at a fixed height, or at `z = level` when
/// several levels are stacked into one network.
#[derive(Debug, Clone)]
pub struct ContourNetwork {
    name: String,

    // Geometry
    node_positions: Vec<Vec3>,
    edge_tail_inds: Vec<u32>,
    edge_tip_inds: Vec<u32>,

    // Computed geometry
    edge_centers: Vec<Vec3>,
    node_degrees: Vec<usize>,
}

impl ContourNetwork {
    /// Creates a new network from nodes and edges.
    ///
    /// Fails if an edge refers to a node past the end of `nodes`.
    pub fn new(name: impl Into<String>, nodes: Vec<Vec3>, edges: Vec<[u32; 2]>) -> Result<Self> {
        let num_nodes = nodes.len();
        if let Some(&index) = edges.iter().flatten().find(|&&i| i as usize >= num_nodes) {
            return Err(ContourError::EdgeIndexOutOfRange { index, num_nodes });
        }

        let edge_tail_inds: Vec<u32> = edges.iter().map(|e| e[0]).collect();
        let edge_tip_inds: Vec<u32> = edges.iter().map(|e| e[1]).collect();

        let mut network = Self {
            name: name.into(),
            node_positions: nodes,
            edge_tail_inds,
            edge_tip_inds,
            edge_centers: Vec::new(),
            node_degrees: Vec::new(),
        };
        network.recompute_geometry();
        Ok(network)
    }

    /// Lifts a single contour to the plane `z`.
    pub fn from_contour(name: impl Into<String>, contour: &IndexedContour, z: f32) -> Result<Self> {
        let nodes = contour
            .vertices
            .iter()
            .map(|v| Vec3::new(v.x as f32, v.y as f32, z))
            .collect();
        Self::new(name, nodes, contour.edges.clone())
    }

    /// Stacks several levels into one network, each at `z = level`.
    ///
    /// Fails if the combined vertex count does not fit 32-bit indices.
    pub fn from_levels(name: impl Into<String>, levels: &[LevelContour]) -> Result<Self> {
        let total: usize = levels.iter().map(|l| l.contour.num_vertices()).sum();
        if u32::try_from(total).is_err() {
            return Err(ContourError::TooManyVertices { count: total });
        }

        let mut nodes = Vec::with_capacity(total);
        let mut edges = Vec::with_capacity(levels.iter().map(|l| l.contour.num_edges()).sum());

        for LevelContour { level, contour } in levels {
            let offset = u32::try_from(nodes.len())
                .map_err(|_| ContourError::TooManyVertices { count: total })?;
            let z = *level as f32;
            nodes.extend(
                contour
                    .vertices
                    .iter()
                    .map(|v| Vec3::new(v.x as f32, v.y as f32, z)),
            );
            for &[a, b] in &contour.edges {
                let shift = |i: u32| {
                    i.checked_add(offset)
                        .ok_or(ContourError::TooManyVertices { count: total })
                };
                edges.push([shift(a)?, shift(b)?]);
            }
        }

        Self::new(name, nodes, edges)
    }

    /// Returns the network name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.node_positions.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edge_tail_inds.len()
    }

    /// Returns the node positions.
    #[must_use]
    pub fn nodes(&self) -> &[Vec3] {
        &self.node_positions
    }

    /// Returns the edge tail indices.
    #[must_use]
    pub fn edge_tail_inds(&self) -> &[u32] {
        &self.edge_tail_inds
    }

    /// Returns the edge tip indices.
    #[must_use]
    pub fn edge_tip_inds(&self) -> &[u32] {
        &self.edge_tip_inds
    }

    /// Returns the edges as `[tail, tip]` pairs.
    pub fn edges(&self) -> impl Iterator<Item = [u32; 2]> + '_ {
        self.edge_tail_inds
            .iter()
            .zip(&self.edge_tip_inds)
            .map(|(&tail, &tip)| [tail, tip])
    }

    /// Returns the midpoint of every edge.
    #[must_use]
    pub fn edge_centers(&self) -> &[Vec3] {
        &self.edge_centers
    }

    /// Returns how many edges meet at each node.
    #[must_use]
    pub fn node_degrees(&self) -> &[usize] {
        &self.node_degrees
    }

    /// Nodes touched by exactly one edge. Contours only end where they leave
    /// the sampled domain, so a network of closed curves has none.
    #[must_use]
    pub fn num_open_ends(&self) -> usize {
        self.node_degrees.iter().filter(|&&d| d == 1).count()
    }

    /// Sum of all edge lengths.
    #[must_use]
    pub fn total_length(&self) -> f32 {
        self.edges()
            .map(|[tail, tip]| {
                self.node_positions[tail as usize].distance(self.node_positions[tip as usize])
            })
            .sum()
    }

    /// Axis-aligned bounds of all nodes.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        if self.node_positions.is_empty() {
            return None;
        }

        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for &p in &self.node_positions {
            min = min.min(p);
            max = max.max(p);
        }

        Some((min, max))
    }

    /// Diagonal of the bounding box, or 1 for an empty network.
    #[must_use]
    pub fn length_scale(&self) -> f32 {
        self.bounding_box()
            .map_or(1.0, |(min, max)| (max - min).length())
    }

    fn recompute_geometry(&mut self) {
        self.edge_centers = self
            .edges()
            .map(|[tail, tip]| {
                (self.node_positions[tail as usize] + self.node_positions[tip as usize]) * 0.5
            })
            .collect();

        self.node_degrees = vec![0; self.node_positions.len()];
        for &tail in &self.edge_tail_inds {
            self.node_degrees[tail as usize] += 1;
        }
        for &tip in &self.edge_tip_inds {
            self.node_degrees[tip as usize] += 1;
        }
    }
}
