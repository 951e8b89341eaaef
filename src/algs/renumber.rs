//! Renumbering utilities for the edge table.

use crate::data::datasets::Datasets;
use crate::data::table::Table;
use crate::mesh_error::EpiMeshError;
use crate::topology::point::{EdgeId, EntityId};

/// Edge ids ordered by owning cell, ties kept in id order.
///
/// Edges without a cell come last.
pub fn edge_permutation_by_cell(datasets: &Datasets) -> Vec<EdgeId> {
    let mut order: Vec<EdgeId> = datasets.edge.ids().collect();
    order.sort_by_key(|&e| {
        let cell = datasets.edge[e].cell;
        (cell.is_none(), cell)
    });
    order
}

/// Renumber edges using a provided permutation.
///
/// The permutation lists old ids in their new order: entry `i` becomes
/// `EdgeId(i)`. `opposite` columns are remapped consistently.
pub fn renumber_edges(
    datasets: &Datasets,
    permutation: &[EdgeId],
) -> Result<Datasets, EpiMeshError> {
    let ne = datasets.ne();
    if permutation.len() != ne {
        return Err(EpiMeshError::InvalidPermutation(format!(
            "expected {ne} entries, found {}",
            permutation.len()
        )));
    }
    let mut old_to_new: Vec<Option<EdgeId>> = vec![None; ne];
    for (new, &old) in permutation.iter().enumerate() {
        let slot = old_to_new.get_mut(old.index()).ok_or_else(|| {
            EpiMeshError::InvalidPermutation(format!("edge {old} is out of range"))
        })?;
        if slot.is_some() {
            return Err(EpiMeshError::InvalidPermutation(format!(
                "edge {old} appears more than once"
            )));
        }
        *slot = Some(EdgeId::try_from_index(new)?);
    }

    let rows = permutation
        .iter()
        .map(|&old| {
            let mut row = datasets.edge[old].clone();
            row.opposite = row.opposite.and_then(|o| old_to_new[o.index()]);
            row
        })
        .collect();

    Ok(Datasets {
        edge: Table::from_rows(rows)?,
        ..datasets.clone()
    })
}

/// Stable sort of the edge table by owning cell, keeping each cell's edges
/// contiguous.
pub fn sort_edges_by_cell(datasets: &Datasets) -> Result<Datasets, EpiMeshError> {
    renumber_edges(datasets, &edge_permutation_by_cell(datasets))
}
