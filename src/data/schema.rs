//! Column schema per entity kind and mesh flavor.
//!
//! Records carry a fixed field set; the flavor decides which of those fields
//! are meaningful ("recognized") and what their defaults are. [`spec`] is the
//! introspectable view of that decision and [`crate::data::table::make_table`]
//! materializes rows from it.

use std::fmt;

use crate::data::records::Segment;

/// The four entity tables of a mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EntityKind {
    Vert,
    Edge,
    Face,
    Cell,
}

impl EntityKind {
    /// Table name used in the dataset collection.
    pub const fn name(self) -> &'static str {
        match self {
            EntityKind::Vert => "vert",
            EntityKind::Edge => "edge",
            EntityKind::Face => "face",
            EntityKind::Cell => "cell",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which column set a mesh uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MeshFlavor {
    /// 2D mesh in a 2D space.
    Planar,
    /// 2D sheet embedded in 3D space.
    FlatSheet,
    /// Single-layer (or Voronoi) volumetric mesh with a cell table.
    Bulk,
}

impl MeshFlavor {
    /// Number of embedding coordinates.
    pub const fn dimension(self) -> usize {
        match self {
            MeshFlavor::Planar => 2,
            MeshFlavor::FlatSheet | MeshFlavor::Bulk => 3,
        }
    }

    /// Whether meshes of this flavor carry a cell table.
    pub const fn has_cells(self) -> bool {
        matches!(self, MeshFlavor::Bulk)
    }

    pub const fn name(self) -> &'static str {
        match self {
            MeshFlavor::Planar => "planar",
            MeshFlavor::FlatSheet => "flat_sheet",
            MeshFlavor::Bulk => "bulk",
        }
    }

    /// Coordinate column names, in storage order.
    pub fn coords(self) -> &'static [&'static str] {
        &COORDS[..self.dimension()]
    }

    /// Embedding axes, in storage order.
    pub fn axes(self) -> &'static [Axis] {
        &Axis::ALL[..self.dimension()]
    }
}

const COORDS: [&str; 3] = ["x", "y", "z"];

/// A coordinate axis of the `pos` arrays.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in a `pos` array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        COORDS[self as usize]
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed default value for one column.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ColumnValue {
    Float(f64),
    Int(i64),
    Bool(bool),
    Segment(Option<Segment>),
    /// A foreign key; `None` is the "no relation" default.
    Id(Option<u32>),
}

/// One recognized column and its default.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub default: ColumnValue,
}

const fn col(name: &'static str, default: ColumnValue) -> ColumnSpec {
    ColumnSpec { name, default }
}

/// Recognized columns and defaults for `kind` in meshes of `flavor`.
///
/// Returns an empty list for [`EntityKind::Cell`] on flavors without cells.
pub fn spec(kind: EntityKind, flavor: MeshFlavor) -> Vec<ColumnSpec> {
    use ColumnValue as V;

    let coords = flavor
        .coords()
        .iter()
        .map(|&name| col(name, V::Float(0.0)));

    match kind {
        EntityKind::Vert => coords
            .chain([
                col("is_active", V::Bool(true)),
                col("is_anchor", V::Bool(false)),
                col("at_border", V::Bool(false)),
                col("subdiv", V::Bool(false)),
                col("segment", V::Segment(None)),
            ])
            .collect(),
        EntityKind::Edge => {
            let mut cols = vec![
                col("srce", V::Int(0)),
                col("trgt", V::Int(0)),
                col("face", V::Id(None)),
            ];
            if flavor.has_cells() {
                cols.push(col("cell", V::Id(None)));
            }
            cols.extend([
                col("opposite", V::Id(None)),
                col("line_tension", V::Float(0.0)),
                col("at_border", V::Bool(false)),
                col("is_anchor", V::Bool(false)),
                col("subdiv", V::Bool(false)),
                col("segment", V::Segment(None)),
            ]);
            cols
        }
        EntityKind::Face => coords
            .chain([
                col("is_alive", V::Bool(true)),
                col("at_border", V::Bool(false)),
                col("subdiv", V::Bool(false)),
                col("segment", V::Segment(None)),
            ])
            .collect(),
        EntityKind::Cell if flavor.has_cells() => {
            coords.chain([col("is_alive", V::Bool(true))]).collect()
        }
        EntityKind::Cell => Vec::new(),
    }
}

/// The full column set of one flavor, as returned alongside fixtures.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MeshSchema {
    pub flavor: MeshFlavor,
    pub vert: Vec<ColumnSpec>,
    pub edge: Vec<ColumnSpec>,
    pub face: Vec<ColumnSpec>,
    pub cell: Vec<ColumnSpec>,
}

impl MeshSchema {
    pub fn for_flavor(flavor: MeshFlavor) -> Self {
        Self {
            flavor,
            vert: spec(EntityKind::Vert, flavor),
            edge: spec(EntityKind::Edge, flavor),
            face: spec(EntityKind::Face, flavor),
            cell: spec(EntityKind::Cell, flavor),
        }
    }

    /// Columns of `kind`.
    pub fn columns(&self, kind: EntityKind) -> &[ColumnSpec] {
        match kind {
            EntityKind::Vert => &self.vert,
            EntityKind::Edge => &self.edge,
            EntityKind::Face => &self.face,
            EntityKind::Cell => &self.cell,
        }
    }

    /// Default of column `name` in table `kind`, if recognized.
    pub fn default_of(&self, kind: EntityKind, name: &str) -> Option<ColumnValue> {
        self.columns(kind)
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.default)
    }
}
