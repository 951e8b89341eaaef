//! Topology edits producing a new mesh generation from an existing one.

pub mod boundary;
pub mod extrude;
pub mod renumber;
pub mod subdivide;
pub mod triangulate;

pub use boundary::{BoundaryClassification, classify_boundary_edges, create_anchors};
pub use extrude::{ExtrudeMethod, ExtrudeOptions, extrude};
pub use renumber::{renumber_edges, sort_edges_by_cell};
pub use subdivide::{SubdivideOptions, subdivide_faces};
pub use triangulate::{TriangularMesh, triangular_mesh};
