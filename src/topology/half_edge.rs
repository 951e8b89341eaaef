//! Opposite half-edge derivation.
//!
//! The opposite of `srce -> trgt` is the unique half-edge `trgt -> srce`;
//! on volumetric meshes it must also belong to the same cell, so that the
//! two faces of a shared ridge are never paired across cells. When either
//! direction is duplicated the relation is ambiguous and left unset on
//! every edge involved, which keeps it symmetric.

use hashbrown::HashMap;

use crate::data::datasets::Datasets;
use crate::data::records::Edge;
use crate::topology::point::{CellId, EdgeId, VertId};

/// Key under which a half-edge is looked up by its reverse.
type PairKey = (VertId, VertId, Option<CellId>);

fn key(edge: &Edge, with_cells: bool) -> PairKey {
    (edge.srce, edge.trgt, edge.cell.filter(|_| with_cells))
}

/// Half-edges grouped by `(srce, trgt[, cell])`, in id order.
pub(crate) fn edges_by_pair(datasets: &Datasets) -> HashMap<PairKey, Vec<EdgeId>> {
    let with_cells = datasets.flavor.has_cells();
    let mut map: HashMap<PairKey, Vec<EdgeId>> = HashMap::with_capacity(datasets.ne());
    for (id, e) in datasets.edge.iter() {
        map.entry(key(e, with_cells)).or_default().push(id);
    }
    map
}

/// Computes the opposite of every half-edge, indexed by edge id.
pub fn opposite_edges(datasets: &Datasets) -> Vec<Option<EdgeId>> {
    let with_cells = datasets.flavor.has_cells();
    let by_pair = edges_by_pair(datasets);
    let mut ambiguous = 0usize;

    let opposites = datasets
        .edge
        .iter()
        .map(|(id, e)| {
            let own = key(e, with_cells);
            let reverse = (own.1, own.0, own.2);
            let unique = by_pair.get(&own).is_some_and(|ids| ids.len() == 1);
            match by_pair.get(&reverse).map(Vec::as_slice) {
                Some([single]) if unique => Some(*single),
                Some([]) | None => None,
                Some(_) => {
                    log::debug!("edge {id}: reverse of {} -> {} is not unique", e.srce, e.trgt);
                    ambiguous += 1;
                    None
                }
            }
        })
        .collect();

    if ambiguous > 0 {
        log::warn!("{ambiguous} half-edges have more than one reverse candidate; left unpaired");
    }
    opposites
}

/// Overwrites every `opposite` column with freshly derived values.
pub fn reset_opposites(datasets: &mut Datasets) {
    let opposites = opposite_edges(datasets);
    for (e, opp) in datasets.edge.rows_mut().iter_mut().zip(opposites) {
        e.opposite = opp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::MeshFlavor;
    use crate::data::table::Table;
    use crate::topology::point::FaceId;

    fn sheet(pairs: &[(u32, u32)]) -> Datasets {
        let mut d = Datasets::with_counts(MeshFlavor::FlatSheet, 4, 0, 1, 0).unwrap();
        let rows = pairs
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
        d
    }

    #[test]
    fn reverse_pairs_are_matched() {
        let mut d = sheet(&[(0, 1), (1, 0), (1, 2)]);
        reset_opposites(&mut d);
        let opp: Vec<_> = d.edge.rows().iter().map(|e| e.opposite).collect();
        assert_eq!(opp, vec![Some(EdgeId::new(1)), Some(EdgeId::new(0)), None]);
    }

    #[test]
    fn ambiguous_reverse_is_unset() {
        let d = sheet(&[(0, 1), (1, 0), (1, 0), (2, 3), (3, 2)]);
        let opp = opposite_edges(&d);
        assert_eq!(opp[..3], [None, None, None]);
        assert_eq!(opp[3], Some(EdgeId::new(4)));
        assert_eq!(opp[4], Some(EdgeId::new(3)));
    }

    #[test]
    fn bulk_pairs_stay_within_cell() {
        let mut d = Datasets::with_counts(MeshFlavor::Bulk, 2, 0, 2, 2).unwrap();
        let mk = |s, t, c| Edge {
            cell: Some(CellId::new(c)),
            ..Edge::with_ends(
                MeshFlavor::Bulk,
                VertId::new(s),
                VertId::new(t),
                Some(FaceId::new(c)),
            )
        };
        d.edge = Table::from_rows(vec![mk(0, 1, 0), mk(1, 0, 1)]).unwrap();
        assert_eq!(opposite_edges(&d), vec![None, None]);
    }
}
