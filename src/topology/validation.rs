//! Structural validation of a mesh generation.

use hashbrown::HashMap;

use crate::data::datasets::Datasets;
use crate::data::schema::EntityKind;
use crate::geometry::face_centroids;
use crate::mesh_error::EpiMeshError;
use crate::topology::half_edge::edges_by_pair;
use crate::topology::orientation::{Orientation, orient_face};
use crate::topology::point::{CellId, EdgeId, EntityId, FaceId, VertId};

/// Optional validation toggles for mesh checks.
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    /// Every foreign key addresses an existing row.
    pub check_references: bool,
    /// `opposite` is the symmetric reverse half-edge (same cell on bulk meshes).
    pub check_pairing: bool,
    /// Edges of every alive face chain into closed cycles.
    pub check_face_closure: bool,
    /// Closed faces must be a single cycle.
    pub require_single_cycle: bool,
    /// All edges of a face carry the same cell.
    pub check_cell_consistency: bool,
    /// Faces of bulk meshes wind outward relative to their cell.
    pub check_outward_orientation: bool,
    /// How to handle duplicated half-edges.
    pub non_manifold: NonManifoldHandling,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_references: true,
            check_pairing: true,
            check_face_closure: true,
            require_single_cycle: true,
            check_cell_consistency: true,
            check_outward_orientation: false,
            non_manifold: NonManifoldHandling::Warn,
        }
    }
}

impl ValidationOptions {
    /// Every combinatorial check, with non-manifold edges as errors.
    pub fn strict() -> Self {
        Self {
            non_manifold: NonManifoldHandling::Error,
            ..Self::default()
        }
    }

    /// Enable all checks, including the geometric orientation test.
    pub fn all() -> Self {
        Self {
            check_outward_orientation: true,
            ..Self::strict()
        }
    }

    /// Faces may split into several closed cycles.
    pub fn allow_multiple_cycles(self) -> Self {
        Self {
            require_single_cycle: false,
            ..self
        }
    }

    /// These options, with the single-cycle rule dropped if some alive face
    /// of `datasets` already splits into several closed cycles.
    ///
    /// Edits that leave faces alone use this to check their input and
    /// output with the same rules.
    pub fn matching_cycles_of(self, datasets: &Datasets) -> Self {
        if has_multi_cycle_faces(datasets) {
            self.allow_multiple_cycles()
        } else {
            self
        }
    }
}

/// `true` if some alive face is closed but made of more than one cycle.
pub fn has_multi_cycle_faces(datasets: &Datasets) -> bool {
    let by_face = datasets.edges_by_face();
    matches!(
        validate_face_closure(datasets, &by_face, true),
        Err(EpiMeshError::MultipleCycles { .. })
    )
}

/// Behavior for non-manifold detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonManifoldHandling {
    /// Skip non-manifold detection.
    Ignore,
    /// Log a warning on non-manifold edges.
    Warn,
    /// Return an error on non-manifold edges.
    Error,
}

/// Validate `datasets` against the checks enabled in `options`.
///
/// References are always checked first when enabled, since the other checks
/// index tables through them.
pub fn validate_datasets(
    datasets: &Datasets,
    options: &ValidationOptions,
) -> Result<(), EpiMeshError> {
    match (datasets.flavor.has_cells(), datasets.cell.is_some()) {
        (true, false) => return Err(EpiMeshError::MissingCellTable("missing on a bulk mesh")),
        (false, true) => return Err(EpiMeshError::MissingCellTable("present on a sheet")),
        _ => {}
    }

    if options.check_references {
        validate_references(datasets)?;
    }
    if options.check_pairing {
        validate_pairing(datasets)?;
    }
    let by_face = datasets.edges_by_face();
    if options.check_face_closure {
        validate_face_closure(datasets, &by_face, options.require_single_cycle)?;
    }
    if options.check_cell_consistency && datasets.flavor.has_cells() {
        validate_face_cells(datasets, &by_face)?;
    }
    if options.check_outward_orientation && datasets.flavor.has_cells() {
        validate_outward_orientation(datasets)?;
    }
    validate_non_manifold(datasets, options.non_manifold)
}

fn check_ref<I: EntityId>(edge: EdgeId, id: I, len: usize) -> Result<(), EpiMeshError> {
    if id.index() < len {
        Ok(())
    } else {
        Err(EpiMeshError::DanglingReference {
            edge,
            kind: I::KIND,
            index: id.index(),
        })
    }
}

fn validate_references(datasets: &Datasets) -> Result<(), EpiMeshError> {
    let (nv, ne, nf, nc) = (datasets.nv(), datasets.ne(), datasets.nf(), datasets.nc());
    for (id, e) in datasets.edge.iter() {
        check_ref(id, e.srce, nv)?;
        check_ref(id, e.trgt, nv)?;
        if let Some(face) = e.face {
            check_ref(id, face, nf)?;
        }
        if let Some(cell) = e.cell {
            check_ref(id, cell, nc)?;
        }
        if let Some(opp) = e.opposite {
            check_ref(id, opp, ne)?;
        }
    }
    Ok(())
}

fn validate_pairing(datasets: &Datasets) -> Result<(), EpiMeshError> {
    let with_cells = datasets.flavor.has_cells();
    for (id, e) in datasets.edge.iter() {
        let Some(opp_id) = e.opposite else { continue };
        let mismatch = EpiMeshError::OppositeMismatch {
            edge: id,
            opposite: opp_id,
        };
        let Some(opp) = datasets.edge.get(opp_id) else {
            return Err(mismatch);
        };
        let reversed = opp.srce == e.trgt && opp.trgt == e.srce;
        let symmetric = opp.opposite == Some(id);
        let same_cell = !with_cells || opp.cell == e.cell;
        if !(reversed && symmetric && same_cell) {
            return Err(mismatch);
        }
    }
    Ok(())
}

/// Number of closed walks the edges of one face split into.
///
/// Fails with [`EpiMeshError::OpenFace`] if some vertex has unequal in and
/// out degree within the face.
fn count_cycles(
    datasets: &Datasets,
    face: FaceId,
    edges: &[EdgeId],
) -> Result<usize, EpiMeshError> {
    let mut out: HashMap<VertId, Vec<EdgeId>> = HashMap::new();
    let mut balance: HashMap<VertId, i64> = HashMap::new();
    for &id in edges {
        let e = &datasets.edge[id];
        out.entry(e.srce).or_default().push(id);
        *balance.entry(e.srce).or_default() += 1;
        *balance.entry(e.trgt).or_default() -= 1;
    }
    if let Some((&vertex, _)) = balance.iter().filter(|(_, b)| **b != 0).min_by_key(|(v, _)| **v) {
        return Err(EpiMeshError::OpenFace { face, vertex });
    }

    // Walk unused out-edges until each walk returns to its start vertex.
    let mut cursor: HashMap<VertId, usize> = HashMap::new();
    let mut used = 0usize;
    let mut cycles = 0usize;
    for &start_edge in edges {
        let start = datasets.edge[start_edge].srce;
        let mut at = start;
        let mut walked = false;
        loop {
            let next = out.get(&at).and_then(|list| {
                let c = cursor.entry(at).or_default();
                let id = list.get(*c).copied();
                if id.is_some() {
                    *c += 1;
                }
                id
            });
            let Some(id) = next else { break };
            walked = true;
            used += 1;
            at = datasets.edge[id].trgt;
            if at == start {
                break;
            }
        }
        if walked {
            cycles += 1;
        }
        if used == edges.len() {
            break;
        }
    }
    Ok(cycles)
}

fn validate_face_closure(
    datasets: &Datasets,
    by_face: &[Vec<EdgeId>],
    require_single_cycle: bool,
) -> Result<(), EpiMeshError> {
    for (face, row) in datasets.face.iter() {
        let edges = &by_face[face.index()];
        if !row.is_alive || edges.is_empty() {
            continue;
        }
        let cycles = count_cycles(datasets, face, edges)?;
        if require_single_cycle {
            let branching = edges.len()
                != edges
                    .iter()
                    .map(|&e| datasets.edge[e].srce)
                    .collect::<hashbrown::HashSet<_>>()
                    .len();
            if cycles != 1 || branching {
                return Err(EpiMeshError::MultipleCycles {
                    face,
                    cycles: cycles.max(2),
                });
            }
        }
    }
    Ok(())
}

fn validate_face_cells(datasets: &Datasets, by_face: &[Vec<EdgeId>]) -> Result<(), EpiMeshError> {
    for (face, edges) in by_face.iter().enumerate() {
        let mut cells = edges.iter().filter_map(|&e| datasets.edge[e].cell);
        let Some(first) = cells.next() else { continue };
        if let Some(second) = cells.find(|&c| c != first) {
            return Err(EpiMeshError::MixedFaceCells {
                face: FaceId::try_from_index(face)?,
                first,
                second,
            });
        }
    }
    Ok(())
}

fn validate_outward_orientation(datasets: &Datasets) -> Result<(), EpiMeshError> {
    let Some(cells) = datasets.cell.as_ref() else {
        return Ok(());
    };
    let centroids = face_centroids(datasets);
    for (id, e) in datasets.edge.iter() {
        let (Some(face), Some(cell)) = (e.face, e.cell) else {
            continue;
        };
        if !datasets.face[face].is_alive {
            continue;
        }
        let Some(center) = centroids[face.index()] else {
            continue;
        };
        let side = orient_face(
            center,
            datasets.vert[e.srce].pos,
            datasets.vert[e.trgt].pos,
            cells[cell].pos,
        );
        if side != Orientation::Outward {
            return Err(EpiMeshError::InwardFace {
                edge: id,
                face,
                cell,
            });
        }
    }
    Ok(())
}

/// Detect half-edges duplicated between the same ordered vertex pair
/// (within one cell on bulk meshes).
fn validate_non_manifold(
    datasets: &Datasets,
    handling: NonManifoldHandling,
) -> Result<(), EpiMeshError> {
    if handling == NonManifoldHandling::Ignore {
        return Ok(());
    }
    let mut duplicated: Vec<((VertId, VertId, Option<CellId>), usize)> = edges_by_pair(datasets)
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(k, ids)| (k, ids.len()))
        .collect();
    duplicated.sort_unstable_by_key(|(k, _)| *k);

    for ((srce, trgt, cell), count) in duplicated {
        match handling {
            NonManifoldHandling::Warn => {
                log::warn!(
                    "Non-manifold edge detected: {srce} -> {trgt} (cell {cell:?}) appears {count} times"
                );
            }
            NonManifoldHandling::Error => {
                return Err(EpiMeshError::NonManifoldEdge { srce, trgt, count });
            }
            NonManifoldHandling::Ignore => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::Edge;
    use crate::data::schema::MeshFlavor;
    use crate::data::table::Table;
    use crate::topology::half_edge::reset_opposites;

    fn square(cycle: &[(u32, u32)]) -> Datasets {
        let mut d = Datasets::with_counts(MeshFlavor::FlatSheet, 5, 0, 1, 0).unwrap();
        let rows = cycle
            .iter()
            .map(|&(s, t)| {
                Edge::with_ends(
                    MeshFlavor::FlatSheet,
                    VertId::new(s),
                    VertId::new(t),
                    Some(FaceId::new(0)),
                )
            })
            .collect();
        d.edge = Table::from_rows(rows).unwrap();
        reset_opposites(&mut d);
        d
    }

    #[test]
    fn closed_square_is_valid() {
        let d = square(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
        validate_datasets(&d, &ValidationOptions::all()).unwrap();
    }

    #[test]
    fn open_face_is_reported() {
        let d = square(&[(0, 1), (1, 2), (2, 3)]);
        let err = validate_datasets(&d, &ValidationOptions::default()).unwrap_err();
        assert_eq!(
            err,
            EpiMeshError::OpenFace {
                face: FaceId::new(0),
                vertex: VertId::new(0),
            }
        );
    }

    #[test]
    fn two_triangles_in_one_face() {
        let d = square(&[(0, 1), (1, 4), (4, 0), (1, 2), (2, 4), (4, 1)]);
        let err = validate_datasets(&d, &ValidationOptions::default()).unwrap_err();
        assert!(matches!(err, EpiMeshError::MultipleCycles { .. }));
        validate_datasets(&d, &ValidationOptions::default().allow_multiple_cycles()).unwrap();
    }

    #[test]
    fn cycle_rule_follows_the_mesh() {
        let split = square(&[(0, 1), (1, 4), (4, 0), (1, 2), (2, 4), (4, 1)]);
        assert!(has_multi_cycle_faces(&split));
        let relaxed = ValidationOptions::strict().matching_cycles_of(&split);
        assert!(!relaxed.require_single_cycle);
        assert_eq!(relaxed.non_manifold, NonManifoldHandling::Error);
        validate_datasets(&split, &relaxed).unwrap();

        let closed = square(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert!(!has_multi_cycle_faces(&closed));
        assert!(ValidationOptions::default().matching_cycles_of(&closed).require_single_cycle);
    }

    #[test]
    fn dangling_vertex_is_reported() {
        let mut d = square(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
        d.edge[EdgeId::new(2)].trgt = VertId::new(9);
        let err = validate_datasets(&d, &ValidationOptions::default()).unwrap_err();
        assert_eq!(
            err,
            EpiMeshError::DanglingReference {
                edge: EdgeId::new(2),
                kind: EntityKind::Vert,
                index: 9,
            }
        );
    }

    #[test]
    fn asymmetric_opposite_is_reported() {
        let mut d = square(&[(0, 1), (1, 0)]);
        d.face[FaceId::new(0)].is_alive = false;
        d.edge[EdgeId::new(1)].opposite = None;
        let err = validate_datasets(&d, &ValidationOptions::default()).unwrap_err();
        assert_eq!(
            err,
            EpiMeshError::OppositeMismatch {
                edge: EdgeId::new(0),
                opposite: EdgeId::new(1),
            }
        );
    }

    #[test]
    fn duplicated_edge_is_non_manifold_when_strict() {
        let mut d = square(&[(0, 1), (1, 2), (2, 0)]);
        d.face[FaceId::new(0)].is_alive = false;
        let mut rows = d.edge.clone().into_rows();
        rows.push(rows[0].clone());
        d.edge = Table::from_rows(rows).unwrap();
        validate_datasets(&d, &ValidationOptions::default()).unwrap();
        let err = validate_datasets(&d, &ValidationOptions::strict()).unwrap_err();
        assert_eq!(
            err,
            EpiMeshError::NonManifoldEdge {
                srce: VertId::new(0),
                trgt: VertId::new(1),
                count: 2,
            }
        );
    }

    #[test]
    fn sheet_with_cell_table_is_rejected() {
        let mut d = square(&[(0, 1), (1, 2), (2, 0)]);
        d.cell = Some(Table::default());
        assert!(matches!(
            validate_datasets(&d, &ValidationOptions::default()),
            Err(EpiMeshError::MissingCellTable(_))
        ));
    }
}
