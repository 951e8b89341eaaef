//! Triangle-soup view of a sheet for rendering and triangle-only geometry.
//!
//! Each face-bound half-edge `srce -> trgt` of face `f` yields the triangle
//! `(srce, trgt, f)`, where face `f` is represented by its reference point.
//! The half-edge winding carries over to the triangle unchanged.

use crate::data::datasets::Datasets;
use crate::data::schema::{Axis, MeshFlavor};
use crate::mesh_error::EpiMeshError;
use crate::topology::point::EntityId;

/// Combined vertex array, triangles and face-center mask.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriangularMesh {
    /// Number of coordinates per entry of `vertices`.
    pub dimension: usize,
    /// Face reference points, then mesh vertices, flattened with stride
    /// `dimension`.
    pub vertices: Vec<f64>,
    /// Rows of `vertices` forming each triangle.
    pub triangles: Vec<[usize; 3]>,
    /// `true` for the face reference points.
    pub face_mask: Vec<bool>,
}

impl TriangularMesh {
    /// Number of rows in the combined vertex array.
    pub fn len(&self) -> usize {
        self.face_mask.len()
    }

    pub fn is_empty(&self) -> bool {
        self.face_mask.is_empty()
    }

    /// Coordinates of combined row `i`.
    pub fn vertex(&self, i: usize) -> Option<&[f64]> {
        let start = i.checked_mul(self.dimension)?;
        self.vertices.get(start..start + self.dimension)
    }
}

/// Triangulate a sheet, keeping the coordinates named by `axes`.
///
/// Face-less (anchor) edges produce no triangle.
pub fn triangular_mesh(datasets: &Datasets, axes: &[Axis]) -> Result<TriangularMesh, EpiMeshError> {
    if datasets.flavor == MeshFlavor::Bulk {
        return Err(EpiMeshError::UnsupportedFlavor {
            found: datasets.flavor.name(),
            expected: "planar or flat_sheet",
        });
    }
    if axes.is_empty() {
        return Err(EpiMeshError::invalid_param("axes", "[]", "at least one axis is required"));
    }
    if let Some(axis) = axes.iter().find(|a| a.index() >= datasets.dimension()) {
        return Err(EpiMeshError::invalid_param(
            "axes",
            axis,
            "axis is beyond the mesh dimension",
        ));
    }

    let nf = datasets.nf();
    let points = datasets
        .face
        .rows()
        .iter()
        .map(|f| f.pos)
        .chain(datasets.vert.rows().iter().map(|v| v.pos));
    let vertices: Vec<f64> = points
        .flat_map(|pos| axes.iter().map(move |a| pos[a.index()]))
        .collect();

    let triangles = datasets
        .edge
        .rows()
        .iter()
        .filter_map(|e| {
            e.face
                .map(|f| [e.srce.index() + nf, e.trgt.index() + nf, f.index()])
        })
        .collect();

    let face_mask = (0..nf + datasets.nv()).map(|i| i < nf).collect();

    Ok(TriangularMesh {
        dimension: axes.len(),
        vertices,
        triangles,
        face_mask,
    })
}
