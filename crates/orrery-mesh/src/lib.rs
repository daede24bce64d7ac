//! Procedural geometry for the orrery: a UV-sphere mesh shared by every
//! celestial body and a random point-cloud starfield.
//!
//! Everything here is pure CPU work with no device calls. Meshes are built
//! once at startup and stay read-only for the rest of the process.

mod error;
mod mesh;
pub mod sphere;
pub mod starfield;

pub use error::MeshError;
pub use mesh::Mesh;
pub use sphere::{MIN_LAT_SEGMENTS, MIN_LON_SEGMENTS, generate_sphere};
pub use starfield::{generate_starfield, generate_starfield_with};
