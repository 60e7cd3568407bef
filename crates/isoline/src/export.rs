//! JSON export of extracted contours.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use isoline_core::{DVec2, IndexedContour, Result};

use crate::levels::LevelContour;

/// Plain-array form of an indexed contour, for plotting tools and files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourDocument {
    pub level: f64,
    pub vertices: Vec<[f64; 2]>,
    pub edges: Vec<[u32; 2]>,
}

impl ContourDocument {
    /// Copies `contour` into a document tagged with `level`.
    #[must_use]
    pub fn from_contour(level: f64, contour: &IndexedContour) -> Self {
        Self {
            level,
            vertices: contour.vertices.iter().map(|v| v.to_array()).collect(),
            edges: contour.edges.clone(),
        }
    }

    /// Converts back into an [`IndexedContour`].
    #[must_use]
    pub fn to_contour(&self) -> IndexedContour {
        IndexedContour {
            vertices: self.vertices.iter().copied().map(DVec2::from).collect(),
            edges: self.edges.clone(),
        }
    }

    /// Serializes to a compact JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Writes pretty-printed JSON to `writer`.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Saves to a JSON file at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        log::info!("saved contour at level {} to {}", self.level, path.display());
        Ok(())
    }

    /// Loads a document saved with [`Self::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl From<&LevelContour> for ContourDocument {
    fn from(level: &LevelContour) -> Self {
        Self::from_contour(level.level, &level.contour)
    }
}

/// Writes several levels as one JSON array.
pub fn write_levels_json<W: Write>(levels: &[LevelContour], writer: W) -> Result<()> {
    let documents: Vec<ContourDocument> = levels.iter().map(ContourDocument::from).collect();
    serde_json::to_writer(writer, &documents)?;
    Ok(())
}
