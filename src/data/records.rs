//! Row types of the four entity tables.
//!
//! Fields are fixed per kind; [`Record::default_for`] fills them from the
//! flavor's column defaults (see [`crate::data::schema::spec`]), so a column
//! the flavor does not recognize keeps its zero value.

use crate::data::schema::{ColumnSpec, ColumnValue, EntityKind, MeshFlavor, spec};
use crate::topology::point::{CellId, EdgeId, EntityId, FaceId, VertId};

/// Portion of an extruded epithelium a row belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Segment {
    Apical,
    Basal,
    Sagittal,
}

/// Behavior shared by the row types.
pub trait Record: Clone + std::fmt::Debug {
    /// Identifier type indexing tables of this record.
    type Id: EntityId;

    /// Kind of table this record lives in.
    const KIND: EntityKind;

    /// Row with every field zeroed / unset.
    fn blank() -> Self;

    /// Writes one column value, returning `false` if the column is not a
    /// field of this record or the value has the wrong type.
    fn set_column(&mut self, column: &ColumnSpec) -> bool;

    /// Row initialized from the defaults of `flavor`.
    fn default_for(flavor: MeshFlavor) -> Self {
        let mut row = Self::blank();
        for column in spec(Self::KIND, flavor) {
            let known = row.set_column(&column);
            debug_assert!(known, "column `{}` has no field in {}", column.name, Self::KIND);
        }
        row
    }
}

fn set_coord(pos: &mut [f64; 3], name: &str, value: ColumnValue) -> Option<bool> {
    let axis = match name {
        "x" => 0,
        "y" => 1,
        "z" => 2,
        _ => return None,
    };
    Some(match value {
        ColumnValue::Float(v) => {
            pos[axis] = v;
            true
        }
        _ => false,
    })
}

fn bool_of(value: ColumnValue, slot: &mut bool) -> bool {
    match value {
        ColumnValue::Bool(b) => {
            *slot = b;
            true
        }
        _ => false,
    }
}

fn segment_of(value: ColumnValue, slot: &mut Option<Segment>) -> bool {
    match value {
        ColumnValue::Segment(s) => {
            *slot = s;
            true
        }
        _ => false,
    }
}

fn id_of<I: EntityId>(value: ColumnValue, slot: &mut Option<I>) -> bool {
    match value {
        ColumnValue::Id(raw) => match raw.map(|r| I::try_from_index(r as usize)).transpose() {
            Ok(id) => {
                *slot = id;
                true
            }
            Err(_) => false,
        },
        _ => false,
    }
}

/// A junction vertex.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vertex {
    /// Coordinates; `z` stays 0 on planar meshes.
    pub pos: [f64; 3],
    pub is_active: bool,
    pub is_anchor: bool,
    pub at_border: bool,
    /// Inserted by face subdivision.
    pub subdiv: bool,
    pub segment: Option<Segment>,
}

impl Record for Vertex {
    type Id = VertId;
    const KIND: EntityKind = EntityKind::Vert;

    fn blank() -> Self {
        Self {
            pos: [0.0; 3],
            is_active: false,
            is_anchor: false,
            at_border: false,
            subdiv: false,
            segment: None,
        }
    }

    fn set_column(&mut self, column: &ColumnSpec) -> bool {
        if let Some(ok) = set_coord(&mut self.pos, column.name, column.default) {
            return ok;
        }
        match column.name {
            "is_active" => bool_of(column.default, &mut self.is_active),
            "is_anchor" => bool_of(column.default, &mut self.is_anchor),
            "at_border" => bool_of(column.default, &mut self.at_border),
            "subdiv" => bool_of(column.default, &mut self.subdiv),
            "segment" => segment_of(column.default, &mut self.segment),
            _ => false,
        }
    }
}

/// A directed half-edge bounding at most one face.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    pub srce: VertId,
    pub trgt: VertId,
    /// `None` for anchor edges.
    pub face: Option<FaceId>,
    /// Only set on volumetric meshes.
    pub cell: Option<CellId>,
    /// Reverse half-edge; `None` on the boundary.
    pub opposite: Option<EdgeId>,
    pub line_tension: f64,
    pub segment: Option<Segment>,
    pub at_border: bool,
    pub is_anchor: bool,
    pub subdiv: bool,
}

impl Edge {
    /// `srce -> trgt` bounding `face`, other columns left at their defaults.
    pub fn with_ends(
        flavor: MeshFlavor,
        srce: VertId,
        trgt: VertId,
        face: Option<FaceId>,
    ) -> Self {
        Self {
            srce,
            trgt,
            face,
            ..Self::default_for(flavor)
        }
    }
}

impl Record for Edge {
    type Id = EdgeId;
    const KIND: EntityKind = EntityKind::Edge;

    fn blank() -> Self {
        Self {
            srce: VertId::new(0),
            trgt: VertId::new(0),
            face: None,
            cell: None,
            opposite: None,
            line_tension: 0.0,
            segment: None,
            at_border: false,
            is_anchor: false,
            subdiv: false,
        }
    }

    fn set_column(&mut self, column: &ColumnSpec) -> bool {
        let value = column.default;
        match (column.name, value) {
            ("srce", ColumnValue::Int(v)) if v >= 0 => {
                self.srce = VertId::new(v as u32);
                true
            }
            ("trgt", ColumnValue::Int(v)) if v >= 0 => {
                self.trgt = VertId::new(v as u32);
                true
            }
            ("face", _) => id_of(value, &mut self.face),
            ("cell", _) => id_of(value, &mut self.cell),
            ("opposite", _) => id_of(value, &mut self.opposite),
            ("line_tension", ColumnValue::Float(v)) => {
                self.line_tension = v;
                true
            }
            ("segment", _) => segment_of(value, &mut self.segment),
            ("at_border", _) => bool_of(value, &mut self.at_border),
            ("is_anchor", _) => bool_of(value, &mut self.is_anchor),
            ("subdiv", _) => bool_of(value, &mut self.subdiv),
            _ => false,
        }
    }
}

/// A polygonal face (an apical cell outline on sheets).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Face {
    /// Reference point (generator point or centroid).
    pub pos: [f64; 3],
    pub segment: Option<Segment>,
    pub is_alive: bool,
    pub at_border: bool,
    pub subdiv: bool,
}

impl Record for Face {
    type Id = FaceId;
    const KIND: EntityKind = EntityKind::Face;

    fn blank() -> Self {
        Self {
            pos: [0.0; 3],
            segment: None,
            is_alive: false,
            at_border: false,
            subdiv: false,
        }
    }

    fn set_column(&mut self, column: &ColumnSpec) -> bool {
        if let Some(ok) = set_coord(&mut self.pos, column.name, column.default) {
            return ok;
        }
        match column.name {
            "is_alive" => bool_of(column.default, &mut self.is_alive),
            "at_border" => bool_of(column.default, &mut self.at_border),
            "subdiv" => bool_of(column.default, &mut self.subdiv),
            "segment" => segment_of(column.default, &mut self.segment),
            _ => false,
        }
    }
}

/// A volumetric cell.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub pos: [f64; 3],
    pub is_alive: bool,
}

impl Record for Cell {
    type Id = CellId;
    const KIND: EntityKind = EntityKind::Cell;

    fn blank() -> Self {
        Self {
            pos: [0.0; 3],
            is_alive: false,
        }
    }

    fn set_column(&mut self, column: &ColumnSpec) -> bool {
        if let Some(ok) = set_coord(&mut self.pos, column.name, column.default) {
            return ok;
        }
        match column.name {
            "is_alive" => bool_of(column.default, &mut self.is_alive),
            _ => false,
        }
    }
}
