//! Extrude a flat sheet into a single-layer epithelium.
//!
//! Every apical face becomes one cell bounded by:
//! - the apical face itself,
//! - a basal copy of it with reversed winding,
//! - one quadrilateral sagittal face per apical edge.
//!
//! Rows are concatenated as apical, basal, sagittal for each table, so the
//! apical identifiers are unchanged and the other blocks are contiguous
//! continuations of them.
//!
//! # Example
//! ```rust
//! # fn try_main() -> Result<(), epimesh::mesh_error::EpiMeshError> {
//! use epimesh::algs::extrude::{ExtrudeOptions, extrude};
//! use epimesh::mesh_generation::three_faces_sheet;
//!
//! let (sheet, _) = three_faces_sheet(true)?;
//! let mono = extrude(&sheet, ExtrudeOptions::default())?;
//! assert_eq!(mono.nv(), 2 * sheet.nv());
//! assert_eq!(mono.ne(), 6 * sheet.ne());
//! assert_eq!(mono.nc(), sheet.nf());
//! # Ok(())
//! # }
//! # try_main().unwrap();
//! ```

use std::fmt;
use std::str::FromStr;

use crate::data::datasets::Datasets;
use crate::data::records::{Cell, Edge, Face, Record, Segment, Vertex};
use crate::data::schema::MeshFlavor;
use crate::data::table::Table;
use crate::debug_invariants::check_generation;
use crate::geometry::{add, centroid, scale};
use crate::mesh_error::EpiMeshError;
use crate::topology::half_edge::reset_opposites;
use crate::topology::point::{CellId, EdgeId, EntityId, FaceId, offset_id};
use crate::topology::validation::{ValidationOptions, validate_datasets};

/// Basal face coordinates are always this fraction of the apical ones,
/// whatever the vertex placement method.
pub const BASAL_FACE_SCALE: f64 = 1.0 / 3.0;

const METHODS: &str = "'homotecy' or 'translation'";

/// How basal vertices are placed from apical ones.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExtrudeMethod {
    /// Uniform scaling about the origin by [`ExtrudeOptions::scale`].
    #[default]
    Homotecy,
    /// Rigid translation by [`ExtrudeOptions::vector`].
    Translation,
}

impl ExtrudeMethod {
    pub const fn name(self) -> &'static str {
        match self {
            ExtrudeMethod::Homotecy => "homotecy",
            ExtrudeMethod::Translation => "translation",
        }
    }
}

impl fmt::Display for ExtrudeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExtrudeMethod {
    type Err = EpiMeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "homotecy" => Ok(ExtrudeMethod::Homotecy),
            "translation" => Ok(ExtrudeMethod::Translation),
            other => Err(EpiMeshError::UnknownExtrudeMethod {
                value: other.to_owned(),
                expected: METHODS,
            }),
        }
    }
}

/// Options controlling extrusion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtrudeOptions {
    pub method: ExtrudeMethod,
    /// Homothety factor, used by [`ExtrudeMethod::Homotecy`].
    pub scale: f64,
    /// Translation, used by [`ExtrudeMethod::Translation`].
    pub vector: [f64; 3],
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            method: ExtrudeMethod::Homotecy,
            scale: 1.0 / 3.0,
            vector: [0.0, 0.0, -1.0],
        }
    }
}

impl ExtrudeOptions {
    /// Homothety about the origin by `scale`.
    pub fn homotecy(scale: f64) -> Self {
        Self {
            method: ExtrudeMethod::Homotecy,
            scale,
            ..Self::default()
        }
    }

    /// Translation by `vector`.
    pub fn translation(vector: [f64; 3]) -> Self {
        Self {
            method: ExtrudeMethod::Translation,
            vector,
            ..Self::default()
        }
    }

    /// Parses `method` and keeps the other defaults.
    pub fn with_method(method: &str) -> Result<Self, EpiMeshError> {
        Ok(Self {
            method: method.parse()?,
            ..Self::default()
        })
    }

    fn check(&self) -> Result<(), EpiMeshError> {
        match self.method {
            ExtrudeMethod::Homotecy if !(self.scale.is_finite() && self.scale > 0.0) => Err(
                EpiMeshError::invalid_param("scale", self.scale, "must be positive and finite"),
            ),
            ExtrudeMethod::Translation if !self.vector.iter().all(|c| c.is_finite()) => {
                Err(EpiMeshError::invalid_param(
                    "vector",
                    format!("{:?}", self.vector),
                    "must be finite",
                ))
            }
            _ => Ok(()),
        }
    }

    /// Basal position of an apical vertex at `pos`.
    fn place(&self, pos: [f64; 3]) -> [f64; 3] {
        match self.method {
            ExtrudeMethod::Homotecy => scale(pos, self.scale),
            ExtrudeMethod::Translation => add(pos, self.vector),
        }
    }
}

/// Extrude a flat sheet into a volumetric mesh with one cell per face.
///
/// The sheet must be a [`MeshFlavor::FlatSheet`] without a cell table,
/// every edge must bound a face, and the sheet must pass
/// [`ValidationOptions::strict`]: a face that is open or splits into several
/// cycles cannot bound a prism.
pub fn extrude(apical: &Datasets, options: ExtrudeOptions) -> Result<Datasets, EpiMeshError> {
    options.check()?;
    if apical.flavor != MeshFlavor::FlatSheet || apical.cell.is_some() {
        return Err(EpiMeshError::UnsupportedFlavor {
            found: apical.flavor.name(),
            expected: MeshFlavor::FlatSheet.name(),
        });
    }
    let (nv, ne, nf) = (apical.nv(), apical.ne(), apical.nf());

    // Face of every apical edge, which is also its cell.
    let faces: Vec<FaceId> = apical
        .edge
        .iter()
        .map(|(id, e)| {
            e.face.ok_or_else(|| {
                EpiMeshError::InvalidGeometry(format!("edge {id} has no face to extrude"))
            })
        })
        .collect::<Result<_, _>>()?;
    validate_datasets(apical, &ValidationOptions::strict())?;

    let flavor = MeshFlavor::Bulk;

    let apical_verts = apical.vert.rows().iter().map(|v| Vertex {
        segment: Some(Segment::Apical),
        is_active: true,
        ..v.clone()
    });
    let basal_verts = apical.vert.rows().iter().map(|v| Vertex {
        pos: options.place(v.pos),
        segment: Some(Segment::Basal),
        is_active: true,
        ..v.clone()
    });
    let vert = Table::from_rows(apical_verts.chain(basal_verts).collect())?;

    let mut edges = Vec::with_capacity(6 * ne);
    for (e, &face) in apical.edge.rows().iter().zip(&faces) {
        edges.push(Edge {
            cell: Some(CellId::try_from_index(face.index())?),
            segment: Some(Segment::Apical),
            ..e.clone()
        });
    }
    for (e, &face) in apical.edge.rows().iter().zip(&faces) {
        edges.push(Edge {
            srce: offset_id(e.trgt, nv)?,
            trgt: offset_id(e.srce, nv)?,
            face: Some(offset_id(face, nf)?),
            cell: Some(CellId::try_from_index(face.index())?),
            opposite: None,
            segment: Some(Segment::Basal),
            ..e.clone()
        });
    }
    let mut sagittal_faces = Vec::with_capacity(ne);
    for (i, (e, &face)) in apical.edge.rows().iter().zip(&faces).enumerate() {
        let side = FaceId::try_from_index(2 * nf + i)?;
        let cell = Some(CellId::try_from_index(face.index())?);
        let (s, t) = (e.srce, e.trgt);
        let (sb, tb) = (offset_id(s, nv)?, offset_id(t, nv)?);
        for (srce, trgt) in [(t, s), (s, sb), (sb, tb), (tb, t)] {
            edges.push(Edge {
                cell,
                segment: Some(Segment::Sagittal),
                ..Edge::with_ends(flavor, srce, trgt, Some(side))
            });
        }
        let quad = centroid([s, t, tb, sb].map(|v| vert[v].pos)).unwrap_or_default();
        sagittal_faces.push(Face {
            pos: quad,
            segment: Some(Segment::Sagittal),
            is_alive: true,
            ..Face::default_for(flavor)
        });
    }

    let apical_faces = apical.face.rows().iter().map(|f| Face {
        segment: Some(Segment::Apical),
        ..f.clone()
    });
    let basal_faces = apical.face.rows().iter().map(|f| Face {
        pos: scale(f.pos, BASAL_FACE_SCALE),
        segment: Some(Segment::Basal),
        ..f.clone()
    });
    let face = Table::from_rows(
        apical_faces
            .chain(basal_faces)
            .chain(sagittal_faces)
            .collect(),
    )?;

    let cell = Table::from_rows(
        apical
            .face
            .rows()
            .iter()
            .map(|f| Cell {
                pos: f.pos,
                is_alive: f.is_alive,
            })
            .collect(),
    )?;

    let mut datasets = Datasets {
        flavor,
        vert,
        edge: Table::from_rows(edges)?,
        face,
        cell: Some(cell),
    };
    reset_opposites(&mut datasets);

    log::debug!(
        "extrude ({}): {} vertices, {} edges, {} faces, {} cells",
        options.method,
        datasets.nv(),
        datasets.ne(),
        datasets.nf(),
        datasets.nc()
    );
    check_generation(&datasets, &ValidationOptions::strict(), "extrude");
    Ok(datasets)
}

/// Identifier of sagittal edge `k` (0..4) built on apical edge `apical`.
pub fn sagittal_edge(apical: EdgeId, k: usize, ne: usize) -> Result<EdgeId, EpiMeshError> {
    EdgeId::try_from_index(2 * ne + 4 * apical.index() + k)
}
