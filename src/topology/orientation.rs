//! Sign predicates deciding which side of a ridge a half-edge bounds.
//!
//! Both predicates are plain floating-point determinants; an exactly zero
//! value is reported as [`Orientation::Degenerate`] and callers turn it into
//! an error rather than guessing a side.

use crate::geometry::{cross, dot, sub};

/// Outcome of an orientation test.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Counter-clockwise / normal pointing away from the reference point.
    Outward,
    /// Clockwise / normal pointing towards the reference point.
    Inward,
    /// Zero determinant: the points are collinear (2D) or coplanar (3D), so
    /// no side can be chosen.
    Degenerate,
}

impl Orientation {
    /// Maps a determinant to its orientation: positive is
    /// [`Outward`](Self::Outward), negative is [`Inward`](Self::Inward).
    /// Zero and NaN are [`Degenerate`](Self::Degenerate).
    #[inline]
    pub fn from_sign(value: f64) -> Self {
        if value > 0.0 {
            Orientation::Outward
        } else if value < 0.0 {
            Orientation::Inward
        } else {
            Orientation::Degenerate
        }
    }
}

/// Twice the signed area of triangle `(a, b, c)`:
/// - >0 if counter-clockwise
/// - <0 if clockwise
/// - =0 if collinear
#[inline]
pub fn orient2d(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Side of the half-edge `srce -> trgt` as seen from generator `point`.
#[inline]
pub fn orient_edge2d(point: [f64; 2], srce: [f64; 2], trgt: [f64; 2]) -> Orientation {
    Orientation::from_sign(orient2d(point, srce, trgt))
}

/// Orientation of triangle `(center, srce, trgt)` relative to `reference`.
///
/// Evaluates `((srce - center) x (trgt - srce)) . (center - reference)`:
/// positive when the triangle normal points away from `reference`.
#[inline]
pub fn orient_face(
    center: [f64; 3],
    srce: [f64; 3],
    trgt: [f64; 3],
    reference: [f64; 3],
) -> Orientation {
    let normal = cross(sub(srce, center), sub(trgt, srce));
    Orientation::from_sign(dot(normal, sub(center, reference)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_classification() {
        assert_eq!(Orientation::from_sign(1e-300), Orientation::Outward);
        assert_eq!(Orientation::from_sign(-2.0), Orientation::Inward);
        assert_eq!(Orientation::from_sign(0.0), Orientation::Degenerate);
        assert_eq!(Orientation::from_sign(-0.0), Orientation::Degenerate);
        assert_eq!(Orientation::from_sign(f64::NAN), Orientation::Degenerate);
    }

    #[test]
    fn orient2d_sign() {
        assert!(orient2d([0.0, 0.0], [1.0, 0.0], [0.0, 1.0]) > 0.0);
        assert!(orient2d([0.0, 0.0], [0.0, 1.0], [1.0, 0.0]) < 0.0);
        assert_eq!(orient2d([0.0, 0.0], [1.0, 1.0], [2.0, 2.0]), 0.0);
    }

    #[test]
    fn edge_side_flips_with_direction() {
        let p = [0.0, 0.0];
        let a = [1.0, -1.0];
        let b = [1.0, 1.0];
        assert_eq!(orient_edge2d(p, a, b), Orientation::Outward);
        assert_eq!(orient_edge2d(p, b, a), Orientation::Inward);
        assert_eq!(orient_edge2d(p, p, a), Orientation::Degenerate);
    }

    #[test]
    fn face_normal_away_from_reference() {
        // Unit square in the z = 1 plane, seen from below.
        let c = [0.5, 0.5, 1.0];
        let a = [0.0, 0.0, 1.0];
        let b = [1.0, 0.0, 1.0];
        let below = [0.5, 0.5, 0.0];
        assert_eq!(orient_face(c, a, b, below), Orientation::Outward);
        assert_eq!(orient_face(c, b, a, below), Orientation::Inward);
        assert_eq!(
            orient_face(c, a, b, [0.5, 0.5, 1.0]),
            Orientation::Degenerate
        );
    }
}
