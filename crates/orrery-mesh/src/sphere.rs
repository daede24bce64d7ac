//! Latitude/longitude (UV) sphere tessellation.
//!
//! Vertices sweep the polar angle θ over `[0, π]` and the azimuth φ over
//! `[0, 2π]`, both endpoints inclusive. The φ = 0 / φ = 2π column is
//! duplicated along the seam and the pole rows collapse to a single point,
//! so the first and last latitude bands contain degenerate triangles. Both
//! artifacts are kept: seam vertices carry distinct texture coordinates in
//! any later UV-mapped pipeline.

use std::f32::consts::{PI, TAU};

use crate::{Mesh, MeshError};

/// Smallest accepted latitude band count.
pub const MIN_LAT_SEGMENTS: u32 = 1;

/// Smallest accepted longitude slice count.
pub const MIN_LON_SEGMENTS: u32 = 3;

/// Generate a UV sphere of the given radius centred at the origin.
///
/// Produces `(lat_segments + 1) * (lon_segments + 1)` vertices and
/// `6 * lat_segments * lon_segments` indices. The output is fully
/// deterministic for a given set of inputs.
///
/// # Errors
///
/// Returns [`MeshError`] when `lat_segments < 1`, `lon_segments < 3`, the
/// radius is not a finite positive number, or the vertex count would not fit
/// in a `u32` index.
///
/// # Examples
///
/// ```
/// let mesh = orrery_mesh::generate_sphere(1.0, 4, 8).unwrap();
/// assert_eq!(mesh.vertex_count(), 5 * 9);
/// assert_eq!(mesh.index_count(), 6 * 4 * 8);
/// ```
pub fn generate_sphere(radius: f32, lat_segments: u32, lon_segments: u32) -> Result<Mesh, MeshError> {
    if lat_segments < MIN_LAT_SEGMENTS {
        return Err(MeshError::InvalidLatSegments(lat_segments));
    }
    if lon_segments < MIN_LON_SEGMENTS {
        return Err(MeshError::InvalidLonSegments(lon_segments));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(MeshError::InvalidRadius(radius));
    }

    let stride = lon_segments as u64 + 1;
    let vertex_count = (lat_segments as u64 + 1) * stride;
    if vertex_count > u32::MAX as u64 {
        return Err(MeshError::IndexOverflow {
            lat_segments,
            lon_segments,
        });
    }

    let mut positions = Vec::with_capacity(vertex_count as usize);
    for lat in 0..=lat_segments {
        let theta = lat as f32 * PI / lat_segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for lon in 0..=lon_segments {
            let phi = lon as f32 * TAU / lon_segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            positions.push([
                radius * sin_theta * cos_phi,
                radius * cos_theta,
                radius * sin_theta * sin_phi,
            ]);
        }
    }

    let stride = stride as u32;
    let mut indices = Vec::with_capacity(6 * lat_segments as usize * lon_segments as usize);
    for lat in 0..lat_segments {
        for lon in 0..lon_segments {
            let first = lat * stride + lon;
            let second = first + stride;

            indices.extend_from_slice(&[first, second, first + 1]);
            indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    log::trace!(
        "Generated UV sphere r={radius} ({lat_segments}x{lon_segments}): {} vertices, {} indices",
        positions.len(),
        indices.len()
    );

    Mesh::triangles(positions, indices)
}
