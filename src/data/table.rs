//! Dense entity tables.
//!
//! A `Table<R>` is a `Vec<R>` whose positions are the identifiers. Rows are
//! only ever appended (or whole tables rebuilt), so identifiers stay a
//! contiguous `0..len` range after every edit.

use std::ops::{Index, IndexMut};

use crate::data::records::Record;
use crate::data::schema::MeshFlavor;
use crate::mesh_error::EpiMeshError;
use crate::topology::point::EntityId;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R: Record> Table<R> {
    /// Wraps rows already laid out in identifier order.
    pub fn from_rows(rows: Vec<R>) -> Result<Self, EpiMeshError> {
        if !rows.is_empty() {
            R::Id::try_from_index(rows.len() - 1)?;
        }
        Ok(Self { rows })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for `id`, if in range.
    #[inline]
    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.rows.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: R::Id) -> Option<&mut R> {
        self.rows.get_mut(id.index())
    }

    /// Whether `id` addresses an existing row.
    #[inline]
    pub fn contains(&self, id: R::Id) -> bool {
        id.index() < self.rows.len()
    }

    /// Identifier the next appended row will receive.
    pub fn next_id(&self) -> Result<R::Id, EpiMeshError> {
        R::Id::try_from_index(self.rows.len())
    }

    /// Appends a row and returns its identifier.
    pub fn push(&mut self, row: R) -> Result<R::Id, EpiMeshError> {
        let id = self.next_id()?;
        self.rows.push(row);
        Ok(id)
    }

    /// Appends all rows of `other`, whose identifiers shift by `self.len()`.
    pub fn append(&mut self, other: Table<R>) -> Result<(), EpiMeshError> {
        let total = self.rows.len() + other.rows.len();
        if total > 0 {
            R::Id::try_from_index(total - 1)?;
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    /// All identifiers in ascending order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = R::Id> + '_ {
        // `from_rows`/`push`/`append` keep len within the u32 range.
        (0..self.rows.len() as u32).map(R::Id::from_u32)
    }

    /// `(id, row)` pairs in ascending identifier order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (R::Id, &R)> + '_ {
        self.ids().zip(self.rows.iter())
    }

    /// Rows in identifier order.
    #[inline]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    #[inline]
    pub fn rows_mut(&mut self) -> &mut [R] {
        &mut self.rows
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

impl<R: Record> Index<R::Id> for Table<R> {
    type Output = R;

    #[inline]
    fn index(&self, id: R::Id) -> &R {
        &self.rows[id.index()]
    }
}

impl<R: Record> IndexMut<R::Id> for Table<R> {
    #[inline]
    fn index_mut(&mut self, id: R::Id) -> &mut R {
        &mut self.rows[id.index()]
    }
}

/// Builds a table with `len` rows, each initialized to the defaults of
/// `flavor`.
pub fn make_table<R: Record>(len: usize, flavor: MeshFlavor) -> Result<Table<R>, EpiMeshError> {
    Table::from_rows(vec![R::default_for(flavor); len])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::{Face, Vertex};
    use crate::topology::point::{FaceId, VertId};

    #[test]
    fn make_table_fills_defaults() {
        let t: Table<Vertex> = make_table(4, MeshFlavor::Planar).unwrap();
        assert_eq!(t.len(), 4);
        assert!(t.rows().iter().all(|v| v.is_active));
        let ids: Vec<_> = t.ids().collect();
        assert_eq!(ids, (0..4).map(VertId::new).collect::<Vec<_>>());
    }

    #[test]
    fn push_and_append_stay_dense() {
        let mut a: Table<Face> = make_table(2, MeshFlavor::FlatSheet).unwrap();
        let id = a.push(Face::default_for(MeshFlavor::FlatSheet)).unwrap();
        assert_eq!(id, FaceId::new(2));

        let b: Table<Face> = make_table(3, MeshFlavor::FlatSheet).unwrap();
        a.append(b).unwrap();
        assert_eq!(a.len(), 6);
        assert_eq!(a.next_id().unwrap(), FaceId::new(6));
        assert!(a.contains(FaceId::new(5)));
        assert!(!a.contains(FaceId::new(6)));
        assert!(a.get(FaceId::new(6)).is_none());
    }

    #[test]
    fn index_by_typed_id() {
        let mut t: Table<Vertex> = make_table(2, MeshFlavor::FlatSheet).unwrap();
        t[VertId::new(1)].pos = [1.0, 2.0, 3.0];
        assert_eq!(t[VertId::new(1)].pos, [1.0, 2.0, 3.0]);
        assert_eq!(t[VertId::new(0)].pos, [0.0; 3]);
    }
}
