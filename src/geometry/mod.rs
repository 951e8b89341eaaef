//! Small vector helpers on `[f64; 3]` and the centroid computations the
//! builders and edits need.

use crate::data::datasets::Datasets;
use crate::topology::point::EntityId;

#[inline]
pub fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn scale(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

#[inline]
pub fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

/// Arithmetic mean of `points`; `None` when empty.
pub fn centroid<I>(points: I) -> Option<[f64; 3]>
where
    I: IntoIterator<Item = [f64; 3]>,
{
    let mut sum = [0.0; 3];
    let mut n = 0usize;
    for p in points {
        sum = add(sum, p);
        n += 1;
    }
    (n > 0).then(|| scale(sum, 1.0 / n as f64))
}

/// Lifts a `D`-dimensional point into 3D, padding with zeros.
#[inline]
pub fn lift<const D: usize>(p: [f64; D]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (o, v) in out.iter_mut().zip(p) {
        *o = v;
    }
    out
}

/// Mean source-vertex position of each face's edges, indexed by face.
///
/// Faces without edges get `None`.
pub fn face_centroids(datasets: &Datasets) -> Vec<Option<[f64; 3]>> {
    let mut sums = vec![([0.0; 3], 0usize); datasets.nf()];
    for e in datasets.edge.rows() {
        let Some(face) = e.face else { continue };
        let Some(vert) = datasets.vert.get(e.srce) else {
            continue;
        };
        if let Some((sum, n)) = sums.get_mut(face.index()) {
            *sum = add(*sum, vert.pos);
            *n += 1;
        }
    }
    sums.into_iter()
        .map(|(sum, n)| (n > 0).then(|| scale(sum, 1.0 / n as f64)))
        .collect()
}
