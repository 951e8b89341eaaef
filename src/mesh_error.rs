//! EpiMeshError: unified error type for epimesh public APIs
//!
//! Every builder, topology edit and validation routine returns this error
//! instead of panicking, so a failed operation leaves the caller holding the
//! previous, still-consistent generation of tables.

use thiserror::Error;

use crate::data::schema::EntityKind;
use crate::topology::point::{CellId, EdgeId, FaceId, VertId};

/// Unified error type for epimesh operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EpiMeshError {
    /// `extrude` was asked for a method it does not know.
    #[error("unknown extrusion method `{value}`, supported values are {expected}")]
    UnknownExtrudeMethod {
        value: String,
        expected: &'static str,
    },
    /// A numeric parameter is out of its accepted range.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
    /// The operation does not apply to this mesh flavor.
    #[error("unsupported mesh flavor {found}, expected {expected}")]
    UnsupportedFlavor {
        found: &'static str,
        expected: &'static str,
    },
    /// Raw geometric input is inconsistent (lengths, indices, ...).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A bounded Voronoi ridge has too few vertices to bound a face.
    #[error("ridge {ridge} has {found} vertices, expected {expected}")]
    DegenerateRidge {
        ridge: usize,
        found: usize,
        expected: &'static str,
    },
    /// The orientation sign test returned exactly zero.
    #[error("ridge {ridge}: edge ({srce}, {trgt}) has a zero orientation sign")]
    DegenerateOrientation {
        ridge: usize,
        srce: usize,
        trgt: usize,
    },
    /// A face selection names a face that is not in the table.
    #[error("face {face} is not in the face table ({len} rows)")]
    UnknownFace { face: usize, len: usize },
    /// A face selection names the same face twice.
    #[error("face {0} selected more than once")]
    DuplicateFace(FaceId),
    /// An identifier does not fit the `u32` handle range.
    #[error("{kind} index {index} exceeds the identifier range")]
    IdOverflow { kind: EntityKind, index: usize },
    /// An edge points at a row that does not exist.
    #[error("edge {edge} references missing {kind} {index}")]
    DanglingReference {
        edge: EdgeId,
        kind: EntityKind,
        index: usize,
    },
    /// `opposite` is not the reversed half-edge, or the relation is not symmetric.
    #[error("edge {edge}: opposite {opposite} is not its reverse half-edge")]
    OppositeMismatch { edge: EdgeId, opposite: EdgeId },
    /// The edges of a face do not chain into closed cycles.
    #[error("face {face} has an open boundary at vertex {vertex}")]
    OpenFace { face: FaceId, vertex: VertId },
    /// The edges of a face form more than one closed cycle.
    #[error("face {face} boundary splits into {cycles} cycles, expected one")]
    MultipleCycles { face: FaceId, cycles: usize },
    /// The edges of a face belong to different cells.
    #[error("face {face} is bounded by edges of cells {first} and {second}")]
    MixedFaceCells {
        face: FaceId,
        first: CellId,
        second: CellId,
    },
    /// A face is wound inward with respect to its cell.
    #[error("edge {edge} of face {face} winds inward relative to cell {cell}")]
    InwardFace {
        edge: EdgeId,
        face: FaceId,
        cell: CellId,
    },
    /// More than one half-edge runs between the same ordered vertex pair.
    #[error("non-manifold edge: {count} half-edges run {srce} -> {trgt}")]
    NonManifoldEdge {
        srce: VertId,
        trgt: VertId,
        count: usize,
    },
    /// An edge reordering is not a permutation of the edge table.
    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),
    /// A bulk mesh lacks its cell table, or a sheet carries one.
    #[error("cell table is {0}")]
    MissingCellTable(&'static str),
}

impl EpiMeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        EpiMeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
