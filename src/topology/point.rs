//! Typed, zero-cost handles for mesh entities
//!
//! Every row of an entity table is addressed by its position, wrapped in a
//! kind-specific newtype so that a face index can never be used where a
//! vertex index is expected. Foreign keys that may be absent are written as
//! `Option<Id>`; the `-1` sentinel only exists at the raw-array boundary
//! (see [`EntityId::from_raw`] and [`EntityId::to_raw_or_sentinel`]).
//!
//! # Memory layout
//! Each handle is `repr(transparent)` over `u32`, which covers the
//! 10^3..10^6 entity range these meshes live in.

use std::fmt;

use crate::data::schema::EntityKind;
use crate::mesh_error::EpiMeshError;

/// Common behavior of the four identifier newtypes.
pub trait EntityId:
    Copy + Eq + Ord + std::hash::Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Which table this identifier indexes.
    const KIND: EntityKind;

    /// Wraps a dense row index, failing if it exceeds the `u32` range.
    fn try_from_index(index: usize) -> Result<Self, EpiMeshError>;

    /// Wraps a raw `u32` handle.
    fn from_u32(raw: u32) -> Self;

    /// Row index of this identifier.
    fn index(self) -> usize;

    /// Interprets a raw signed value where negative means "no relation".
    fn from_raw(raw: i64) -> Result<Option<Self>, EpiMeshError> {
        if raw < 0 {
            Ok(None)
        } else {
            Self::try_from_index(raw as usize).map(Some)
        }
    }

    /// Raw signed value with `-1` standing for `None`.
    fn to_raw_or_sentinel(id: Option<Self>) -> i64 {
        id.map_or(-1, |id| id.index() as i64)
    }
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a row index.
            ///
            /// Indices come from table lengths, which are bounded by the
            /// `u32` range checked in [`EntityId::try_from_index`]; this
            /// constructor is for literal fixtures and tests.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            /// Returns the inner `u32` value.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl EntityId for $name {
            const KIND: EntityKind = $kind;

            #[inline]
            fn try_from_index(index: usize) -> Result<Self, EpiMeshError> {
                u32::try_from(index)
                    .map($name)
                    .map_err(|_| EpiMeshError::IdOverflow { kind: $kind, index })
            }

            #[inline]
            fn from_u32(raw: u32) -> Self {
                $name(raw)
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_entity_id!(
    /// Handle of a row in the vertex table.
    VertId,
    EntityKind::Vert
);
define_entity_id!(
    /// Handle of a row in the (half-)edge table.
    EdgeId,
    EntityKind::Edge
);
define_entity_id!(
    /// Handle of a row in the face table.
    FaceId,
    EntityKind::Face
);
define_entity_id!(
    /// Handle of a row in the cell table.
    CellId,
    EntityKind::Cell
);

/// Shifts an identifier by `offset` rows, as needed when a block of rows is
/// appended after an existing table.
#[inline]
pub(crate) fn offset_id<I: EntityId>(id: I, offset: usize) -> Result<I, EpiMeshError> {
    I::try_from_index(id.index() + offset)
}

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::{assert_eq_align, assert_eq_size};

    assert_eq_size!(VertId, u32);
    assert_eq_size!(EdgeId, u32);
    assert_eq_size!(FaceId, u32);
    assert_eq_size!(CellId, u32);
    assert_eq_align!(Option<FaceId>, Option<u32>);
}
