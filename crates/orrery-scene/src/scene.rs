//! Scene composition: turns the body registry and the clock into an ordered
//! list of draw records.

use glam::Mat4;
use orrery_mesh::Mesh;

use crate::{OrbitalBody, PrimitiveKind, Rgb, SceneClock, SceneError};

/// Starfield color.
pub const STAR_COLOR: Rgb = [1.0, 1.0, 1.0];

/// Which of the scene's shared meshes a draw refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneMesh {
    /// The background point cloud.
    Starfield,
    /// The unit sphere instanced by every body.
    Sphere,
}

impl SceneMesh {
    /// Primitive assembly used for this mesh.
    pub fn primitive(self) -> PrimitiveKind {
        match self {
            SceneMesh::Starfield => PrimitiveKind::Points,
            SceneMesh::Sphere => PrimitiveKind::Triangles,
        }
    }

    /// Label used when uploading and logging.
    pub fn label(self) -> &'static str {
        match self {
            SceneMesh::Starfield => "starfield",
            SceneMesh::Sphere => "sphere",
        }
    }
}

/// One draw for one frame. Discarded once the renderer has consumed it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRecord {
    pub mesh: SceneMesh,
    pub transform: Mat4,
    pub color: Rgb,
    pub primitive: PrimitiveKind,
}

/// The fixed set of drawables: starfield, sun, and orbiting bodies.
///
/// The meshes are built once and never change. Bodies keep their
/// registration order, which is also their draw order.
#[derive(Clone, Debug)]
pub struct Scene {
    sphere: Mesh,
    starfield: Mesh,
    bodies: Vec<OrbitalBody>,
}

impl Scene {
    /// A scene containing only the sun.
    pub fn new(sphere: Mesh, starfield: Mesh, sun: OrbitalBody) -> Self {
        Self {
            sphere,
            starfield,
            bodies: vec![sun],
        }
    }

    /// Build from a body list whose first entry is the sun.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::MissingSun`] if `bodies` is empty.
    pub fn from_bodies(
        sphere: Mesh,
        starfield: Mesh,
        bodies: impl IntoIterator<Item = OrbitalBody>,
    ) -> Result<Self, SceneError> {
        let bodies: Vec<_> = bodies.into_iter().collect();
        if bodies.is_empty() {
            return Err(SceneError::MissingSun);
        }
        Ok(Self {
            sphere,
            starfield,
            bodies,
        })
    }

    /// Append a body after all previously registered ones.
    pub fn register(&mut self, body: OrbitalBody) {
        self.bodies.push(body);
    }

    /// The sun, always drawn first among the bodies.
    pub fn sun(&self) -> &OrbitalBody {
        &self.bodies[0]
    }

    /// All bodies in draw order, sun first.
    pub fn bodies(&self) -> &[OrbitalBody] {
        &self.bodies
    }

    /// Number of bodies including the sun.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn mesh(&self, mesh: SceneMesh) -> &Mesh {
        match mesh {
            SceneMesh::Starfield => &self.starfield,
            SceneMesh::Sphere => &self.sphere,
        }
    }

    /// Draw records for the frame at `clock.elapsed()`.
    ///
    /// Output is the starfield (identity transform, white), then the sun,
    /// then every other body in registration order. Identical elapsed time
    /// gives identical output.
    pub fn compose_frame(&self, clock: &SceneClock) -> Vec<DrawRecord> {
        let t = clock.elapsed();
        let mut records = Vec::with_capacity(1 + self.bodies.len());

        records.push(DrawRecord {
            mesh: SceneMesh::Starfield,
            transform: Mat4::IDENTITY,
            color: STAR_COLOR,
            primitive: SceneMesh::Starfield.primitive(),
        });

        records.extend(self.bodies.iter().map(|body| DrawRecord {
            mesh: SceneMesh::Sphere,
            transform: body.transform_at(t),
            color: body.color(),
            primitive: SceneMesh::Sphere.primitive(),
        }));

        records
    }
}
