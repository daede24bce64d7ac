//! Background starfield: uniformly scattered points inside a ball.

use rand::distr::Uniform;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::MeshError;

/// Generate `num_stars` points inside a ball of the given radius.
///
/// With `Some(seed)` the result is reproducible; with `None` the generator
/// is seeded from the thread-local entropy source and differs per run.
///
/// # Errors
///
/// Returns [`MeshError::InvalidRadius`] if `radius` is not finite and positive.
pub fn generate_starfield(
    num_stars: usize,
    radius: f32,
    seed: Option<u64>,
) -> Result<Vec<[f32; 3]>, MeshError> {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_starfield_with(&mut rng, num_stars, radius)
}

/// Generate a starfield drawing from a caller-supplied random source.
///
/// Each star is produced by rejection sampling: a candidate is drawn
/// uniformly from the cube `[-radius, radius]^3` and kept only if it lies
/// within the ball (boundary included). Exactly `num_stars` points come back.
///
/// Coordinates are sampled and tested in `f64`, so any finite radius works,
/// up to `f32::MAX`.
///
/// # Errors
///
/// Returns [`MeshError::InvalidRadius`] if `radius` is not finite and positive.
pub fn generate_starfield_with<R: Rng>(
    rng: &mut R,
    num_stars: usize,
    radius: f32,
) -> Result<Vec<[f32; 3]>, MeshError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(MeshError::InvalidRadius(radius));
    }

    let axis = Uniform::new_inclusive(-f64::from(radius), f64::from(radius))
        .map_err(|_| MeshError::InvalidRadius(radius))?;
    let radius_sq = f64::from(radius) * f64::from(radius);
    let mut stars = Vec::with_capacity(num_stars);
    let mut rejected = 0usize;

    for _ in 0..num_stars {
        loop {
            // Rounding to f32 never moves a coordinate past the radius, but it
            // can nudge a point across the sphere, so test the rounded values.
            let star = [
                rng.sample(&axis) as f32,
                rng.sample(&axis) as f32,
                rng.sample(&axis) as f32,
            ];
            if distance_sq(star) <= radius_sq {
                stars.push(star);
                break;
            }
            rejected += 1;
        }
    }

    log::debug!("Generated {num_stars} stars within r={radius} ({rejected} samples rejected)");

    Ok(stars)
}

fn distance_sq([x, y, z]: [f32; 3]) -> f64 {
    let (x, y, z) = (f64::from(x), f64::from(y), f64::from(z));
    x * x + y * y + z * z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_count_exact() {
        for &n in &[0usize, 1, 17, 1000] {
            let stars = generate_starfield(n, 30.0, Some(42)).unwrap();
            assert_eq!(stars.len(), n);
        }
    }

    #[test]
    fn test_stars_inside_ball() {
        let radius = 30.0_f32;
        let stars = generate_starfield(5000, radius, Some(7)).unwrap();
        for (i, s) in stars.iter().enumerate() {
            assert!(
                distance_sq(*s) <= f64::from(radius * radius),
                "star {i} at {s:?} lies outside r={radius}"
            );
        }
    }

    #[test]
    fn test_unseeded_stars_inside_ball() {
        let stars = generate_starfield(500, 2.0, None).unwrap();
        assert_eq!(stars.len(), 500);
        assert!(stars.iter().all(|s| distance_sq(*s) <= 4.0));
    }

    #[test]
    fn test_same_seed_produces_same_starfield() {
        let a = generate_starfield(1000, 30.0, Some(123)).unwrap();
        let b = generate_starfield(1000, 30.0, Some(123)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_produces_different_starfield() {
        let a = generate_starfield(1000, 30.0, Some(1)).unwrap();
        let b = generate_starfield(1000, 30.0, Some(9999)).unwrap();
        let differences = a.iter().zip(b.iter()).filter(|(p, q)| p != q).count();
        assert!(
            differences > 900,
            "Expected most stars to differ between seeds, only {differences}/1000 differed"
        );
    }

    #[test]
    fn test_injected_rng_is_used() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(5);
        let mut rng_b = ChaCha8Rng::seed_from_u64(5);
        let a = generate_starfield_with(&mut rng_a, 64, 10.0).unwrap();
        let b = generate_starfield_with(&mut rng_b, 64, 10.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_distribution_covers_all_octants() {
        let stars = generate_starfield(8000, 1.0, Some(42)).unwrap();
        let mut octant_counts = [0u32; 8];
        for s in &stars {
            let octant = ((s[0] >= 0.0) as usize)
                | (((s[1] >= 0.0) as usize) << 1)
                | (((s[2] >= 0.0) as usize) << 2);
            octant_counts[octant] += 1;
        }
        for (i, &count) in octant_counts.iter().enumerate() {
            assert!(
                (700..=1300).contains(&count),
                "Octant {i} has {count} stars, expected roughly 1000"
            );
        }
    }

    #[test]
    fn test_invalid_radius() {
        assert_eq!(
            generate_starfield(10, 0.0, Some(1)),
            Err(MeshError::InvalidRadius(0.0))
        );
        assert!(generate_starfield(10, f32::INFINITY, Some(1)).is_err());
        assert!(generate_starfield(10, f32::NAN, Some(1)).is_err());
        assert!(generate_starfield(10, -1.0, Some(1)).is_err());
    }

    #[test]
    fn test_huge_radius_stays_inside_ball() {
        // radius² overflows f32 here.
        let radius = 2.0e19_f32;
        let stars = generate_starfield(2000, radius, Some(3)).unwrap();
        let radius_sq = f64::from(radius) * f64::from(radius);
        let outside = stars.iter().filter(|s| distance_sq(**s) > radius_sq).count();
        assert_eq!(outside, 0, "{outside}/2000 stars outside r={radius}");
    }

    #[test]
    fn test_max_radius_does_not_panic() {
        let stars = generate_starfield(64, f32::MAX, Some(1)).unwrap();
        assert_eq!(stars.len(), 64);
        let radius_sq = f64::from(f32::MAX) * f64::from(f32::MAX);
        for s in &stars {
            assert!(s.iter().all(|c| c.is_finite()));
            assert!(distance_sq(*s) <= radius_sq);
        }
    }
}
