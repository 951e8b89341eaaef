//! Import of Voronoi tessellations into half-edge tables.
//!
//! A tessellation is described by its vertex coordinates, its generator
//! points and, per ridge, the ridge's vertex cycle and the two generators it
//! separates. Ridges reaching the unbounded region are dropped, and the faces
//! they would have closed are kept as soft-deleted rows so that identifiers
//! stay aligned with the input.

use crate::algs::renumber::sort_edges_by_cell;
use crate::data::datasets::Datasets;
use crate::data::records::Edge;
use crate::data::schema::MeshFlavor;
use crate::data::table::Table;
use crate::geometry::{centroid, lift};
use crate::mesh_error::EpiMeshError;
use crate::topology::half_edge::reset_opposites;
use crate::topology::orientation::{Orientation, orient_edge2d, orient_face};
use crate::topology::point::{CellId, EntityId, FaceId, VertId};
use crate::topology::validation::{ValidationOptions, validate_datasets};

use super::invalid_geometry;

/// Raw index of the vertex at infinity.
pub const AT_INFINITY: i64 = -1;

/// A Voronoi tessellation in `D` dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Voronoi<const D: usize> {
    pub vertices: Vec<[f64; D]>,
    /// Generator points.
    pub points: Vec<[f64; D]>,
    /// Vertex cycle of each ridge; `None` is the vertex at infinity.
    pub ridge_vertices: Vec<Vec<Option<usize>>>,
    /// The two generators each ridge separates.
    pub ridge_points: Vec<[usize; 2]>,
}

impl<const D: usize> Voronoi<D> {
    /// Builds a tessellation from the raw layout where `-1` marks the vertex
    /// at infinity. Any other negative index is an error.
    pub fn from_raw(
        vertices: Vec<[f64; D]>,
        points: Vec<[f64; D]>,
        ridge_vertices: Vec<Vec<i64>>,
        ridge_points: Vec<[usize; 2]>,
    ) -> Result<Self, EpiMeshError> {
        let ridge_vertices = ridge_vertices
            .into_iter()
            .enumerate()
            .map(|(r, rv)| {
                rv.into_iter()
                    .map(|v| match v {
                        AT_INFINITY => Ok(None),
                        _ => usize::try_from(v).map(Some).map_err(|_| {
                            invalid_geometry(format!("ridge {r} has invalid vertex index {v}"))
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<_, _>>()?;
        let voro = Self {
            vertices,
            points,
            ridge_vertices,
            ridge_points,
        };
        voro.check_indices()?;
        Ok(voro)
    }

    /// Checks ridge list lengths and every vertex / point index.
    pub fn check_indices(&self) -> Result<(), EpiMeshError> {
        if self.ridge_vertices.len() != self.ridge_points.len() {
            return Err(invalid_geometry(format!(
                "{} ridge vertex lists for {} ridge point pairs",
                self.ridge_vertices.len(),
                self.ridge_points.len()
            )));
        }
        for (r, (rv, rp)) in self
            .ridge_vertices
            .iter()
            .zip(&self.ridge_points)
            .enumerate()
        {
            if let Some(v) = rv.iter().flatten().find(|&&v| v >= self.vertices.len()) {
                return Err(invalid_geometry(format!(
                    "ridge {r} references missing vertex {v}"
                )));
            }
            if let Some(p) = rp.iter().find(|&&p| p >= self.points.len()) {
                return Err(invalid_geometry(format!(
                    "ridge {r} references missing point {p}"
                )));
            }
            if rp[0] == rp[1] {
                return Err(invalid_geometry(format!(
                    "ridge {r} separates point {} from itself",
                    rp[0]
                )));
            }
        }
        Ok(())
    }

    /// Vertex cycle of ridge `r` if it is bounded.
    fn bounded(&self, r: usize) -> Option<Vec<usize>> {
        self.ridge_vertices[r].iter().copied().collect()
    }

    fn vertex(&self, v: usize) -> [f64; 3] {
        lift(self.vertices[v])
    }
}

/// `(vertex, cyclic predecessor)` pairs of a ridge cycle.
fn with_predecessor(cycle: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let n = cycle.len();
    (0..n).map(move |i| (cycle[i], cycle[(i + n - 1) % n]))
}

fn vid(v: usize) -> Result<VertId, EpiMeshError> {
    VertId::try_from_index(v)
}

/// Planar mesh from a 2D tessellation; face `i` is the region of point `i`.
pub fn from_2d_voronoi(voro: &Voronoi<2>) -> Result<Datasets, EpiMeshError> {
    voro.check_indices()?;
    let flavor = MeshFlavor::Planar;
    let mut datasets =
        Datasets::with_counts(flavor, voro.vertices.len(), 0, voro.points.len(), 0)?;
    for (row, v) in datasets.vert.rows_mut().iter_mut().zip(&voro.vertices) {
        row.pos = lift(*v);
    }
    for (row, p) in datasets.face.rows_mut().iter_mut().zip(&voro.points) {
        row.pos = lift(*p);
    }

    let mut edges = Vec::new();
    let mut unbounded = 0usize;
    for (r, rp) in voro.ridge_points.iter().enumerate() {
        let Some(cycle) = voro.bounded(r) else {
            unbounded += 1;
            for &p in rp {
                datasets.face[FaceId::try_from_index(p)?].is_alive = false;
            }
            continue;
        };
        if cycle.len() != 2 {
            return Err(EpiMeshError::DegenerateRidge {
                ridge: r,
                found: cycle.len(),
                expected: "exactly 2",
            });
        }
        let generator = voro.points[rp[0]];
        for (v, pred) in with_predecessor(&cycle) {
            let face = match orient_edge2d(generator, voro.vertices[v], voro.vertices[pred]) {
                Orientation::Outward => rp[0],
                Orientation::Inward => rp[1],
                Orientation::Degenerate => {
                    return Err(EpiMeshError::DegenerateOrientation {
                        ridge: r,
                        srce: v,
                        trgt: pred,
                    });
                }
            };
            edges.push(Edge::with_ends(
                flavor,
                vid(v)?,
                vid(pred)?,
                Some(FaceId::try_from_index(face)?),
            ));
        }
    }
    datasets.edge = Table::from_rows(edges)?;
    reset_opposites(&mut datasets);

    log::debug!(
        "from_2d_voronoi: {} vertices, {} edges, {} faces ({unbounded} unbounded ridges dropped)",
        datasets.nv(),
        datasets.ne(),
        datasets.nf()
    );
    validate_datasets(&datasets, &ValidationOptions::default())?;
    Ok(datasets)
}

/// Volumetric mesh from a 3D tessellation; cell `i` is the region of point
/// `i` and ridge `r` yields face `2r` (seen from `ridge_points[r][0]`) and
/// face `2r + 1` (seen from `ridge_points[r][1]`).
pub fn from_3d_voronoi(voro: &Voronoi<3>) -> Result<Datasets, EpiMeshError> {
    voro.check_indices()?;
    let flavor = MeshFlavor::Bulk;
    let nridges = voro.ridge_points.len();
    let mut datasets = Datasets::with_counts(
        flavor,
        voro.vertices.len(),
        0,
        2 * nridges,
        voro.points.len(),
    )?;
    for (row, v) in datasets.vert.rows_mut().iter_mut().zip(&voro.vertices) {
        row.pos = *v;
    }
    if let Some(cells) = datasets.cell.as_mut() {
        for (row, p) in cells.rows_mut().iter_mut().zip(&voro.points) {
            row.pos = *p;
        }
    }

    let mut edges = Vec::new();
    let mut unbounded = 0usize;
    for (r, rp) in voro.ridge_points.iter().enumerate() {
        let (front, back) = (
            FaceId::try_from_index(2 * r)?,
            FaceId::try_from_index(2 * r + 1)?,
        );
        let Some(cycle) = voro.bounded(r) else {
            unbounded += 1;
            let finite = voro.ridge_vertices[r].iter().flatten();
            let center = centroid(finite.map(|&v| voro.vertex(v))).unwrap_or_default();
            for face in [front, back] {
                datasets.face[face].pos = center;
                datasets.face[face].is_alive = false;
            }
            continue;
        };
        if cycle.len() < 3 {
            return Err(EpiMeshError::DegenerateRidge {
                ridge: r,
                found: cycle.len(),
                expected: "at least 3",
            });
        }
        let center = centroid(cycle.iter().map(|&v| voro.vertex(v))).unwrap_or_default();
        datasets.face[front].pos = center;
        datasets.face[back].pos = center;

        let (c0, c1) = (
            CellId::try_from_index(rp[0])?,
            CellId::try_from_index(rp[1])?,
        );
        let generator = voro.points[rp[0]];
        for (v, pred) in with_predecessor(&cycle) {
            let (a, b) = (vid(v)?, vid(pred)?);
            let (front_ends, back_ends) =
                match orient_face(center, voro.vertex(v), voro.vertex(pred), generator) {
                    Orientation::Outward => ((a, b), (b, a)),
                    Orientation::Inward => ((b, a), (a, b)),
                    Orientation::Degenerate => {
                        return Err(EpiMeshError::DegenerateOrientation {
                            ridge: r,
                            srce: v,
                            trgt: pred,
                        });
                    }
                };
            for ((s, t), face, cell) in [(front_ends, front, c0), (back_ends, back, c1)] {
                edges.push(Edge {
                    cell: Some(cell),
                    ..Edge::with_ends(flavor, s, t, Some(face))
                });
            }
        }
    }
    datasets.edge = Table::from_rows(edges)?;
    let mut datasets = sort_edges_by_cell(&datasets)?;
    reset_opposites(&mut datasets);

    log::debug!(
        "from_3d_voronoi: {} vertices, {} edges, {} faces, {} cells ({unbounded} unbounded ridges dropped)",
        datasets.nv(),
        datasets.ne(),
        datasets.nf(),
        datasets.nc()
    );
    validate_datasets(&datasets, &ValidationOptions::default())?;
    Ok(datasets)
}
