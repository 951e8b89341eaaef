#![cfg_attr(docsrs, feature(doc_cfg))]
//! # epimesh
//!
//! epimesh models the topology of epithelial tissue as a generalized
//! half-edge mesh. Vertices, half-edges, faces and (for volumetric meshes)
//! cells live in dense tables whose row position is the identifier, and
//! every cross reference (`srce`, `trgt`, `face`, `cell`, `opposite`) is a
//! typed handle.
//!
//! ## Features
//! - Builders: offset hexagonal point lattices, 2D and 3D Voronoi import,
//!   and a literal three-hexagon fixture
//! - Topology edits: extrusion of a sheet into a single-layer epithelium,
//!   boundary anchoring, fan subdivision of faces
//! - Triangle-soup export of sheets
//! - Structural validation (references, pairing, face closure, cell
//!   consistency, outward orientation)
//!
//! ## Generations
//!
//! Every builder and edit borrows its input and returns a fresh
//! [`Datasets`](crate::data::datasets::Datasets). A failed operation leaves
//! the caller's tables untouched. Post-conditions are checked in debug
//! builds, and in release builds with the `strict-invariants` or
//! `check-invariants` feature.
//!
//! ## Determinism
//!
//! Grid noise is drawn from a `SmallRng` seeded by the caller, so identical
//! seeds give identical lattices.
//!
//! ## Usage
//! ```rust
//! # fn try_main() -> Result<(), epimesh::mesh_error::EpiMeshError> {
//! use epimesh::prelude::*;
//!
//! let (datasets, _schema) = three_faces_sheet(true)?;
//! let sheet = Sheet::new("three", datasets)?;
//! let anchored = sheet.create_anchors()?;
//! assert_eq!(anchored.nv(), sheet.nv() + 12);
//!
//! let mono = sheet.extrude(ExtrudeOptions::default())?;
//! mono.validate(&ValidationOptions::strict())?;
//! # Ok(())
//! # }
//! # try_main().unwrap();
//! ```

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod epithelium;
pub mod geometry;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::{
        ExtrudeMethod, ExtrudeOptions, SubdivideOptions, TriangularMesh, create_anchors, extrude,
        subdivide_faces, triangular_mesh,
    };
    pub use crate::data::{
        Axis, Cell, Datasets, Edge, EntityKind, Face, MeshFlavor, MeshSchema, Record, Segment,
        Table, Vertex, make_table, spec,
    };
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::epithelium::{Epithelium, Sheet};
    pub use crate::mesh_error::EpiMeshError;
    pub use crate::mesh_generation::{
        GridNoise, Voronoi, from_2d_voronoi, from_3d_voronoi, hexa_grid2d, hexa_grid3d,
        three_faces_sheet, three_faces_sheet_array,
    };
    pub use crate::topology::{
        CellId, EdgeId, EntityId, FaceId, NonManifoldHandling, ValidationOptions, VertId,
    };
}
