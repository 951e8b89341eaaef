//! Literal meshes used as canonical small test inputs.

use crate::data::datasets::Datasets;
use crate::data::records::Edge;
use crate::data::schema::{MeshFlavor, MeshSchema};
use crate::data::table::Table;
use crate::debug_invariants::check_generation;
use crate::mesh_error::EpiMeshError;
use crate::topology::half_edge::reset_opposites;
use crate::topology::point::{FaceId, VertId};
use crate::topology::validation::ValidationOptions;

/// Vertices of three packed hexagons with side length 1.0 +/- 1e-3.
pub const THREE_FACES_POINTS: [[f64; 2]; 13] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.5, 0.866],
    [1.0, 1.732],
    [0.0, 1.732],
    [-0.5, 0.866],
    [-1.5, 0.866],
    [-2.0, 0.0],
    [-1.5, -0.866],
    [-0.5, -0.866],
    [0.0, -1.732],
    [1.0, -1.732],
    [1.5, -0.866],
];

/// Undirected junctions of the three hexagons.
pub const THREE_FACES_EDGES: [[usize; 2]; 15] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 4],
    [4, 5],
    [5, 0],
    [5, 6],
    [6, 7],
    [7, 8],
    [8, 9],
    [9, 0],
    [9, 10],
    [10, 11],
    [11, 12],
    [12, 1],
];

/// `(srce, trgt, face)` of the 18 half-edges.
const THREE_FACES_HALF_EDGES: [[u32; 3]; 18] = [
    [0, 1, 0],
    [1, 2, 0],
    [2, 3, 0],
    [3, 4, 0],
    [4, 5, 0],
    [5, 0, 0],
    [0, 5, 1],
    [5, 6, 1],
    [6, 7, 1],
    [7, 8, 1],
    [8, 9, 1],
    [9, 0, 1],
    [0, 9, 2],
    [9, 10, 2],
    [10, 11, 2],
    [11, 12, 2],
    [12, 1, 2],
    [1, 0, 2],
];

/// Raw arrays of the three-faces sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct ThreeFacesArrays {
    pub points: [[f64; 2]; 13],
    pub edges: [[usize; 2]; 15],
    /// `(faces, vertices, edges)`.
    pub counts: (usize, usize, usize),
}

pub fn three_faces_sheet_array() -> ThreeFacesArrays {
    ThreeFacesArrays {
        points: THREE_FACES_POINTS,
        edges: THREE_FACES_EDGES,
        counts: (3, THREE_FACES_POINTS.len(), THREE_FACES_EDGES.len()),
    }
}

/// The three-faces sheet as tables, together with its column schema.
///
/// With `zaxis` the mesh is a [`MeshFlavor::FlatSheet`] lying in `z = 0`,
/// otherwise it is [`MeshFlavor::Planar`]. Face positions keep their default
/// (origin) values.
pub fn three_faces_sheet(zaxis: bool) -> Result<(Datasets, MeshSchema), EpiMeshError> {
    let flavor = if zaxis {
        MeshFlavor::FlatSheet
    } else {
        MeshFlavor::Planar
    };
    let (nf, nv, _) = three_faces_sheet_array().counts;
    let mut datasets = Datasets::with_counts(flavor, nv, 0, nf, 0)?;
    for (row, [x, y]) in datasets.vert.rows_mut().iter_mut().zip(THREE_FACES_POINTS) {
        row.pos = [x, y, 0.0];
    }
    let edges = THREE_FACES_HALF_EDGES
        .iter()
        .map(|&[s, t, f]| {
            Edge::with_ends(
                flavor,
                VertId::new(s),
                VertId::new(t),
                Some(FaceId::new(f)),
            )
        })
        .collect();
    datasets.edge = Table::from_rows(edges)?;
    reset_opposites(&mut datasets);

    check_generation(&datasets, &ValidationOptions::strict(), "three_faces_sheet");
    Ok((datasets, MeshSchema::for_flavor(flavor)))
}
