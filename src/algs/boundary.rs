//! Boundary classification and anchoring.
//!
//! A face-bound half-edge without an opposite lies on the free boundary of
//! the mesh. Anchoring gives every boundary vertex a fixed partner vertex
//! slightly outside the tissue, linked to it by a face-less edge.

use itertools::Itertools;

use crate::data::datasets::Datasets;
use crate::data::records::{Edge, Vertex};
use crate::data::table::Table;
use crate::debug_invariants::check_generation;
use crate::geometry::scale;
use crate::mesh_error::EpiMeshError;
use crate::topology::half_edge::reset_opposites;
use crate::topology::point::{EdgeId, EntityId, FaceId, VertId};
use crate::topology::validation::{ValidationOptions, validate_datasets};

/// Radial factor applied to boundary vertex coordinates to place anchors.
pub const ANCHOR_OFFSET: f64 = 1.01;

/// Classified boundary/interior half-edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundaryClassification {
    /// Face-bound edges without an opposite, in id order.
    pub free: Vec<EdgeId>,
    /// Face-bound edges with an opposite, in id order.
    pub interior: Vec<EdgeId>,
    /// Sources of free edges, unique, in first-seen order.
    pub vertices: Vec<VertId>,
    /// Faces of free edges, unique, in first-seen order.
    pub faces: Vec<FaceId>,
}

/// Classify face-bound half-edges by whether they have an opposite.
///
/// Face-less edges (anchors) are in neither set.
pub fn classify_boundary_edges(datasets: &Datasets) -> BoundaryClassification {
    let (free, interior): (Vec<_>, Vec<_>) = datasets
        .edge
        .iter()
        .filter(|(_, e)| e.face.is_some())
        .partition(|(_, e)| e.opposite.is_none());

    let vertices = free.iter().map(|(_, e)| e.srce).unique().collect();
    let faces = free.iter().filter_map(|(_, e)| e.face).unique().collect();

    BoundaryClassification {
        free: free.into_iter().map(|(id, _)| id).collect(),
        interior: interior.into_iter().map(|(id, _)| id).collect(),
        vertices,
        faces,
    }
}

/// Marks the boundary and appends one anchor vertex and one anchor edge per
/// boundary vertex.
///
/// Opposites should be current on the input (see
/// [`reset_opposites`](crate::topology::half_edge::reset_opposites)). The
/// input is validated first; faces that already split into several cycles
/// (after an unsplit subdivision) are accepted and left as they are.
pub fn create_anchors(datasets: &Datasets) -> Result<Datasets, EpiMeshError> {
    let checks = ValidationOptions::default().matching_cycles_of(datasets);
    validate_datasets(datasets, &checks)?;
    let boundary = classify_boundary_edges(datasets);
    let mut out = datasets.clone();

    for &e in &boundary.free {
        out.edge[e].at_border = true;
    }
    for &v in &boundary.vertices {
        out.vert[v].at_border = true;
    }
    for &f in &boundary.faces {
        out.face[f].at_border = true;
    }

    let nv = datasets.nv();
    let anchors: Vec<Vertex> = boundary
        .vertices
        .iter()
        .map(|&v| Vertex {
            pos: scale(datasets.vert[v].pos, ANCHOR_OFFSET),
            is_anchor: true,
            at_border: false,
            is_active: false,
            ..datasets.vert[v].clone()
        })
        .collect();
    let anchor_edges: Vec<Edge> = boundary
        .vertices
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            Ok(Edge {
                line_tension: 0.0,
                is_anchor: true,
                at_border: false,
                ..Edge::with_ends(out.flavor, v, VertId::try_from_index(nv + i)?, None)
            })
        })
        .collect::<Result<_, EpiMeshError>>()?;

    out.vert.append(Table::from_rows(anchors)?)?;
    out.edge.append(Table::from_rows(anchor_edges)?)?;
    reset_opposites(&mut out);

    log::debug!(
        "create_anchors: {} boundary vertices anchored ({} vertices, {} edges)",
        boundary.vertices.len(),
        out.nv(),
        out.ne()
    );
    check_generation(&out, &checks, "create_anchors");
    Ok(out)
}
