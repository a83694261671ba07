//! Small vector helpers layered over `glam`.
//!
//! `glam::Vec3` already provides add/sub/scale/distance; these cover the
//! cases the simulation needs spelled out, chiefly normalization that cannot
//! yield NaN.

use glam::Vec3;
use std::f32::consts::TAU;

pub const AXES: [usize; 3] = [0, 1, 2];

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Wrap an angle into `[0, TAU)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly `TAU`; that
/// case folds back to zero.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Unit vector pointing from `from` towards `to`.
///
/// Returns `None` when the points coincide (or the difference is not
/// finite), so callers skip the push instead of propagating NaN.
#[inline]
pub fn direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    (to - from).try_normalize()
}

/// Uniform sample inside the symmetric box `[-half, half]` per axis.
#[inline]
pub fn sample_in_box<R: rand::Rng + ?Sized>(rng: &mut R, half: Vec3) -> Vec3 {
    Vec3::new(
        symmetric(rng, half.x),
        symmetric(rng, half.y),
        symmetric(rng, half.z),
    )
}

#[inline]
pub fn symmetric<R: rand::Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-half..=half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn direction_of_coincident_points_is_none() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(direction(p, p).is_none());
    }

    #[test]
    fn direction_is_unit_length() {
        let d = direction(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)).unwrap();
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!((d.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn wrap_angle_stays_in_one_turn() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-6);
        for a in [-1e-9, -f32::EPSILON, 1e6, -1e6, TAU] {
            let w = wrap_angle(a);
            assert!((0.0..TAU).contains(&w), "{a} wrapped to {w}");
        }
    }

    #[test]
    fn box_samples_stay_inside() {
        let mut rng = StdRng::seed_from_u64(7);
        let half = Vec3::new(3.0, 1.0, 0.5);
        for _ in 0..500 {
            let p = sample_in_box(&mut rng, half);
            assert!(p.abs().cmple(half).all(), "{p:?} escaped {half:?}");
        }
    }
}
