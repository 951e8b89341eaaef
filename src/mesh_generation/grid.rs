//! Offset hexagonal lattices of generator points.
//!
//! Odd rows are shifted by half a spacing and the row pitch is scaled by
//! `sqrt(3)/2`, so that unit spacings give centers of regular hexagons.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Normal};

use crate::mesh_error::EpiMeshError;

/// Row pitch of a regular hexagonal lattice with unit spacing.
pub const HEX_ROW_PITCH: f64 = 0.866_025_403_784_438_6;

/// Optional Gaussian jitter added to every coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridNoise {
    /// Standard deviation of the zero-mean perturbation.
    pub scale: f64,
    /// Seed of the `SmallRng` drawing the perturbation.
    pub seed: u64,
}

impl GridNoise {
    pub fn new(scale: f64, seed: u64) -> Self {
        Self { scale, seed }
    }
}

fn check_count(name: &'static str, n: usize) -> Result<(), EpiMeshError> {
    if n == 0 {
        return Err(EpiMeshError::invalid_param(name, n, "must be at least 1"));
    }
    Ok(())
}

fn check_spacing(name: &'static str, d: f64) -> Result<(), EpiMeshError> {
    if !(d.is_finite() && d > 0.0) {
        return Err(EpiMeshError::invalid_param(
            name,
            d,
            "must be positive and finite",
        ));
    }
    Ok(())
}

/// Sampler for `noise`, validated up front so no point is produced on error.
fn jitter(noise: Option<GridNoise>) -> Result<Option<(SmallRng, Normal<f64>)>, EpiMeshError> {
    let Some(GridNoise { scale, seed }) = noise else {
        return Ok(None);
    };
    if !(scale.is_finite() && scale >= 0.0) {
        return Err(EpiMeshError::invalid_param(
            "noise.scale",
            scale,
            "must be non-negative and finite",
        ));
    }
    let normal = Normal::new(0.0, scale)
        .map_err(|_| EpiMeshError::invalid_param("noise.scale", scale, "rejected by sampler"))?;
    Ok(Some((SmallRng::seed_from_u64(seed), normal)))
}

fn apply_jitter<const D: usize>(
    points: &mut [[f64; D]],
    sampler: Option<(SmallRng, Normal<f64>)>,
) {
    if let Some((mut rng, normal)) = sampler {
        for p in points.iter_mut() {
            for c in p.iter_mut() {
                *c += normal.sample(&mut rng);
            }
        }
    }
}

#[inline]
fn half_shift(index: usize) -> f64 {
    if index % 2 == 1 { 0.5 } else { 0.0 }
}

/// `nx * ny` points, row-major with `x` fastest.
///
/// ```
/// use epimesh::mesh_generation::hexa_grid2d;
/// let pts = hexa_grid2d(2, 2, 1.0, 1.0, None).unwrap();
/// assert_eq!(pts[2], [0.5, 0.866_025_403_784_438_6]);
/// ```
pub fn hexa_grid2d(
    nx: usize,
    ny: usize,
    distx: f64,
    disty: f64,
    noise: Option<GridNoise>,
) -> Result<Vec<[f64; 2]>, EpiMeshError> {
    check_count("nx", nx)?;
    check_count("ny", ny)?;
    check_spacing("distx", distx)?;
    check_spacing("disty", disty)?;
    let sampler = jitter(noise)?;

    let mut points = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        let y = j as f64 * HEX_ROW_PITCH * disty;
        for i in 0..nx {
            points.push([(i as f64 + half_shift(j)) * distx, y]);
        }
    }
    apply_jitter(&mut points, sampler);
    log::debug!("hexa_grid2d: {nx}x{ny} points");
    Ok(points)
}

/// `nx * ny * nz` points, ordered with `x` fastest then `y` then `z`.
///
/// Odd rows shift `x` by half a spacing and odd slabs shift `y` likewise.
pub fn hexa_grid3d(
    nx: usize,
    ny: usize,
    nz: usize,
    distx: f64,
    disty: f64,
    distz: f64,
    noise: Option<GridNoise>,
) -> Result<Vec<[f64; 3]>, EpiMeshError> {
    check_count("nx", nx)?;
    check_count("ny", ny)?;
    check_count("nz", nz)?;
    check_spacing("distx", distx)?;
    check_spacing("disty", disty)?;
    check_spacing("distz", distz)?;
    let sampler = jitter(noise)?;

    let mut points = Vec::with_capacity(nx * ny * nz);
    for k in 0..nz {
        let z = k as f64 * HEX_ROW_PITCH * distz;
        for j in 0..ny {
            let y = (j as f64 + half_shift(k)) * HEX_ROW_PITCH * disty;
            for i in 0..nx {
                points.push([(i as f64 + half_shift(j)) * distx, y, z]);
            }
        }
    }
    apply_jitter(&mut points, sampler);
    log::debug!("hexa_grid3d: {nx}x{ny}x{nz} points");
    Ok(points)
}
