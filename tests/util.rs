#![allow(dead_code)]
use epimesh::data::datasets::Datasets;
use epimesh::data::records::Edge;
use epimesh::data::schema::MeshFlavor;
use epimesh::data::table::Table;
use epimesh::topology::half_edge::reset_opposites;
use epimesh::topology::point::{EdgeId, FaceId, VertId};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub fn vid(u: u32) -> VertId {
    VertId::new(u)
}

pub fn fid(u: u32) -> FaceId {
    FaceId::new(u)
}

pub fn eid(u: u32) -> EdgeId {
    EdgeId::new(u)
}

/// A flat sheet of `nx * ny` unit squares, each wound counter-clockwise,
/// with vertex positions jittered by up to `jitter` using `seed`.
///
/// Face positions are the square centers.
pub fn square_sheet(nx: u32, ny: u32, jitter: f64, seed: u64) -> Datasets {
    let flavor = MeshFlavor::FlatSheet;
    let nv = ((nx + 1) * (ny + 1)) as usize;
    let nf = (nx * ny) as usize;
    let mut d = Datasets::with_counts(flavor, nv, 0, nf, 0).unwrap();
    let mut rng = SmallRng::seed_from_u64(seed);
    for j in 0..=ny {
        for i in 0..=nx {
            let v = (j * (nx + 1) + i) as usize;
            let dx = if jitter > 0.0 { rng.gen_range(-jitter..jitter) } else { 0.0 };
            let dy = if jitter > 0.0 { rng.gen_range(-jitter..jitter) } else { 0.0 };
            d.vert.rows_mut()[v].pos = [i as f64 + dx, j as f64 + dy, 0.0];
        }
    }
    let corner = |i: u32, j: u32| vid(j * (nx + 1) + i);
    let mut edges = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            let f = fid(j * nx + i);
            let ring = [corner(i, j), corner(i + 1, j), corner(i + 1, j + 1), corner(i, j + 1)];
            for k in 0..4 {
                edges.push(Edge::with_ends(flavor, ring[k], ring[(k + 1) % 4], Some(f)));
            }
            d.face.rows_mut()[f.get() as usize].pos = [i as f64 + 0.5, j as f64 + 0.5, 0.0];
        }
    }
    d.edge = Table::from_rows(edges).unwrap();
    reset_opposites(&mut d);
    d
}

/// Asserts `opposite` is a symmetric reversal wherever set.
pub fn assert_paired(d: &Datasets) {
    for (id, e) in d.edge.iter() {
        if let Some(o) = e.opposite {
            let opp = &d.edge[o];
            assert_eq!((opp.srce, opp.trgt), (e.trgt, e.srce), "edge {id}");
            assert_eq!(opp.opposite, Some(id), "edge {id}");
        }
    }
}
