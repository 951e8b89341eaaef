//! The named table collection handed between builders and topology edits.

use crate::data::records::{Cell, Edge, Face, Vertex};
use crate::data::schema::{EntityKind, MeshFlavor, MeshSchema};
use crate::data::table::{Table, make_table};
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::EpiMeshError;
use crate::topology::point::{EdgeId, FaceId};
use crate::topology::validation::{ValidationOptions, validate_datasets};

/// Vertex, edge, face and (for bulk meshes) cell tables of one mesh
/// generation.
///
/// `cell` is `Some` exactly when `flavor` is [`MeshFlavor::Bulk`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Datasets {
    pub flavor: MeshFlavor,
    pub vert: Table<Vertex>,
    pub edge: Table<Edge>,
    pub face: Table<Face>,
    pub cell: Option<Table<Cell>>,
}

impl Datasets {
    /// Empty tables of `flavor`.
    pub fn empty(flavor: MeshFlavor) -> Self {
        Self {
            flavor,
            vert: Table::default(),
            edge: Table::default(),
            face: Table::default(),
            cell: flavor.has_cells().then(Table::default),
        }
    }

    /// Tables with the given row counts, every row at its flavor default.
    pub fn with_counts(
        flavor: MeshFlavor,
        nv: usize,
        ne: usize,
        nf: usize,
        nc: usize,
    ) -> Result<Self, EpiMeshError> {
        Ok(Self {
            flavor,
            vert: make_table(nv, flavor)?,
            edge: make_table(ne, flavor)?,
            face: make_table(nf, flavor)?,
            cell: if flavor.has_cells() {
                Some(make_table(nc, flavor)?)
            } else {
                None
            },
        })
    }

    #[inline]
    pub fn nv(&self) -> usize {
        self.vert.len()
    }

    #[inline]
    pub fn ne(&self) -> usize {
        self.edge.len()
    }

    #[inline]
    pub fn nf(&self) -> usize {
        self.face.len()
    }

    /// Number of cells, 0 for sheets.
    #[inline]
    pub fn nc(&self) -> usize {
        self.cell.as_ref().map_or(0, Table::len)
    }

    /// Row count of table `kind`.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Vert => self.nv(),
            EntityKind::Edge => self.ne(),
            EntityKind::Face => self.nf(),
            EntityKind::Cell => self.nc(),
        }
    }

    /// Number of embedding coordinates.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.flavor.dimension()
    }

    /// Column schema of this mesh's flavor.
    pub fn schema(&self) -> MeshSchema {
        MeshSchema::for_flavor(self.flavor)
    }

    /// Edges bounding `face`, in ascending id order.
    pub fn face_edges(&self, face: FaceId) -> impl Iterator<Item = EdgeId> + '_ {
        self.edge
            .iter()
            .filter(move |(_, e)| e.face == Some(face))
            .map(|(id, _)| id)
    }

    /// Edge ids grouped by face, indexed by face id. Face-less edges are
    /// left out.
    pub fn edges_by_face(&self) -> Vec<Vec<EdgeId>> {
        let mut groups = vec![Vec::new(); self.nf()];
        for (id, e) in self.edge.iter() {
            if let Some(slot) = e.face.and_then(|f| groups.get_mut(f.get() as usize)) {
                slot.push(id);
            }
        }
        groups
    }

    /// Runs the structural checks selected in `options`.
    pub fn validate(&self, options: &ValidationOptions) -> Result<(), EpiMeshError> {
        validate_datasets(self, options)
    }
}

impl DebugInvariants for Datasets {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Datasets");
    }

    fn validate_invariants(&self) -> Result<(), EpiMeshError> {
        validate_datasets(self, &ValidationOptions::default())
    }
}
