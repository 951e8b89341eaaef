//! Fan subdivision of selected faces around a new center vertex.
//!
//! For every edge `srce -> trgt` of a selected face two half-edges are
//! added, `trgt -> center` and `center -> srce`, so that together with the
//! original edge they close the triangle `(srce, trgt, center)`.

use hashbrown::HashSet;

use crate::data::datasets::Datasets;
use crate::data::records::{Edge, Face, Record, Vertex};
use crate::data::table::Table;
use crate::debug_invariants::check_generation;
use crate::geometry::centroid;
use crate::mesh_error::EpiMeshError;
use crate::topology::half_edge::reset_opposites;
use crate::topology::point::{EdgeId, EntityId, FaceId, VertId};
use crate::topology::validation::{ValidationOptions, validate_datasets};

/// Options controlling subdivision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubdivideOptions {
    /// Give every fan triangle its own face and soft-delete the original.
    ///
    /// When `false` the face keeps its identifier and its boundary becomes
    /// one triangle cycle per original edge.
    pub split_faces: bool,
}

fn check_selection(datasets: &Datasets, faces: &[FaceId]) -> Result<(), EpiMeshError> {
    let mut seen = HashSet::with_capacity(faces.len());
    for &f in faces {
        if !datasets.face.contains(f) {
            return Err(EpiMeshError::UnknownFace {
                face: f.index(),
                len: datasets.nf(),
            });
        }
        if !seen.insert(f) {
            return Err(EpiMeshError::DuplicateFace(f));
        }
    }
    Ok(())
}

/// Subdivide `faces` around one new center vertex each.
///
/// Center vertices get ids from `Nv` in selection order and sit at the
/// face reference coordinates. New edges get ids from `Ne`: first all the
/// `trgt -> center` edges, then all the `center -> srce` edges, each block
/// following the selected edges (grouped by face in selection order, then
/// by id).
///
/// The input is validated first with the default options, relaxed to
/// accept faces that already hold several cycles.
pub fn subdivide_faces(
    datasets: &Datasets,
    faces: &[FaceId],
    options: SubdivideOptions,
) -> Result<Datasets, EpiMeshError> {
    check_selection(datasets, faces)?;
    let input_checks = ValidationOptions::default().matching_cycles_of(datasets);
    validate_datasets(datasets, &input_checks)?;
    if faces.is_empty() {
        return Ok(datasets.clone());
    }
    let (nv, ne, nf) = (datasets.nv(), datasets.ne(), datasets.nf());
    let flavor = datasets.flavor;

    let by_face = datasets.edges_by_face();
    let selected: Vec<(EdgeId, VertId)> = faces
        .iter()
        .enumerate()
        .map(|(i, f)| Ok((VertId::try_from_index(nv + i)?, &by_face[f.index()])))
        .collect::<Result<Vec<_>, EpiMeshError>>()?
        .into_iter()
        .flat_map(|(center, edges)| edges.iter().map(move |&e| (e, center)))
        .collect();

    let centers = faces.iter().map(|&f| Vertex {
        pos: datasets.face[f].pos,
        subdiv: true,
        ..Vertex::default_for(flavor)
    });

    let spoke = |e: EdgeId, srce: VertId, trgt: VertId| {
        let orig = &datasets.edge[e];
        Edge {
            cell: orig.cell,
            segment: orig.segment,
            subdiv: true,
            ..Edge::with_ends(flavor, srce, trgt, orig.face)
        }
    };
    let inward = selected
        .iter()
        .map(|&(e, c)| spoke(e, datasets.edge[e].trgt, c));
    let outward = selected
        .iter()
        .map(|&(e, c)| spoke(e, c, datasets.edge[e].srce));

    let mut out = datasets.clone();
    out.vert.append(Table::from_rows(centers.collect())?)?;
    out.edge
        .append(Table::from_rows(inward.chain(outward).collect())?)?;

    if options.split_faces {
        let nse = selected.len();
        let mut new_faces = Vec::with_capacity(nse);
        for (j, &(e, c)) in selected.iter().enumerate() {
            let orig = &datasets.edge[e];
            let Some(parent) = orig.face else { continue };
            let tri = FaceId::try_from_index(nf + j)?;
            for id in [e.index(), ne + j, ne + nse + j] {
                out.edge[EdgeId::try_from_index(id)?].face = Some(tri);
            }
            let corners = [orig.srce, orig.trgt, c].map(|v| out.vert[v].pos);
            new_faces.push(Face {
                pos: centroid(corners).unwrap_or_default(),
                segment: datasets.face[parent].segment,
                subdiv: true,
                ..Face::default_for(flavor)
            });
        }
        for &f in faces {
            out.face[f].is_alive = false;
        }
        out.face.append(Table::from_rows(new_faces)?)?;
    }
    reset_opposites(&mut out);

    log::debug!(
        "subdivide_faces: {} faces, {} edges split ({} vertices, {} edges, {} faces)",
        faces.len(),
        selected.len(),
        out.nv(),
        out.ne(),
        out.nf()
    );
    let checks = if options.split_faces {
        input_checks
    } else {
        input_checks.allow_multiple_cycles()
    };
    check_generation(&out, &checks, "subdivide_faces");
    Ok(out)
}
