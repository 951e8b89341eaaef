//! Half-edge topology: typed identifiers, opposite-edge derivation,
//! orientation predicates and structural validation.

pub mod half_edge;
pub mod orientation;
pub mod point;
pub mod validation;

pub use half_edge::{opposite_edges, reset_opposites};
pub use orientation::Orientation;
pub use point::{CellId, EdgeId, EntityId, FaceId, VertId};
pub use validation::{
    NonManifoldHandling, ValidationOptions, has_multi_cycle_faces, validate_datasets,
};
