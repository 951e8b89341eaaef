//! Mesh builders: point lattices, Voronoi import and literal fixtures.

pub mod fixtures;
pub mod grid;
pub mod voronoi;

pub use fixtures::{ThreeFacesArrays, three_faces_sheet, three_faces_sheet_array};
pub use grid::{GridNoise, HEX_ROW_PITCH, hexa_grid2d, hexa_grid3d};
pub use voronoi::{Voronoi, from_2d_voronoi, from_3d_voronoi};

use crate::mesh_error::EpiMeshError;

fn invalid_geometry(message: impl Into<String>) -> EpiMeshError {
    EpiMeshError::InvalidGeometry(message.into())
}
