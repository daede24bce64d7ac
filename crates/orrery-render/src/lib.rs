//! Headless CPU renderer.
//!
//! Implements the [`Renderer`] boundary without a graphics device: uploads are
//! kept in memory and every draw runs its vertices through
//! `projection * view * model` to count how many land inside the clip volume.
//! Used by the application when no window is available and by tests.

use glam::{Mat4, Vec3, Vec4};
use orrery_mesh::Mesh;
use orrery_scene::{FrameView, MeshHandle, PrimitiveKind, RenderError, Renderer, Rgb};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

/// Counters for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameCounters {
    pub draws: u64,
    pub triangles: u64,
    pub points: u64,
    /// Vertices whose clip-space position satisfies `|x|,|y|,|z| <= w`.
    pub visible_vertices: u64,
}

impl FrameCounters {
    fn accumulate(&mut self, other: &FrameCounters) {
        self.draws += other.draws;
        self.triangles += other.triangles;
        self.points += other.points;
        self.visible_vertices += other.visible_vertices;
    }
}

struct StoredMesh {
    label: String,
    positions: Vec<Vec3>,
    triangle_count: u64,
    bounding_radius: f32,
}

/// A [`Renderer`] that does the vertex transform on the CPU and keeps stats.
#[derive(Default)]
pub struct HeadlessRenderer {
    meshes: FxHashMap<MeshHandle, StoredMesh>,
    next_handle: u32,
    view_projection: Mat4,
    frame: FrameCounters,
    last_frame: FrameCounters,
    totals: FrameCounters,
    frames: u64,
    fail_after_draws: Option<u64>,
    released: Vec<MeshHandle>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report device loss once `draws` draw calls have succeeded.
    pub fn with_device_loss_after(mut self, draws: u64) -> Self {
        self.fail_after_draws = Some(draws);
        self
    }

    /// Counters of the most recently completed frame.
    pub fn last_frame(&self) -> FrameCounters {
        self.last_frame
    }

    /// Counters summed over all completed frames.
    pub fn totals(&self) -> FrameCounters {
        self.totals
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of meshes currently uploaded.
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Radius of the origin-centred sphere enclosing an uploaded mesh.
    pub fn bounding_radius(&self, handle: MeshHandle) -> Option<f32> {
        self.meshes.get(&handle).map(|stored| stored.bounding_radius)
    }

    /// Handles released so far, in release order.
    pub fn released(&self) -> &[MeshHandle] {
        &self.released
    }

    fn count_visible(mvp: &Mat4, positions: &[Vec3]) -> u64 {
        positions
            .iter()
            .filter(|p| in_clip_volume(*mvp * p.extend(1.0)))
            .count() as u64
    }
}

fn in_clip_volume(clip: Vec4) -> bool {
    clip.w > 0.0 && clip.x.abs() <= clip.w && clip.y.abs() <= clip.w && clip.z.abs() <= clip.w
}

impl Renderer for HeadlessRenderer {
    fn upload_mesh(&mut self, label: &str, mesh: &Mesh) -> Result<MeshHandle, RenderError> {
        let handle = MeshHandle(self.next_handle);
        self.next_handle = self
            .next_handle
            .checked_add(1)
            .ok_or_else(|| RenderError::UploadFailed {
                label: label.to_string(),
                reason: "mesh handle space exhausted".to_string(),
            })?;

        let bounding_radius = mesh.bounding_radius();
        info!(
            "Uploaded mesh '{label}' as {handle:?}: {} vertices, {} indices ({} bytes), bounds r={bounding_radius:.2}",
            mesh.vertex_count(),
            mesh.index_count(),
            mesh.vertex_bytes().len() + mesh.index_bytes().len()
        );

        self.meshes.insert(
            handle,
            StoredMesh {
                label: label.to_string(),
                positions: mesh.positions().iter().map(|&p| Vec3::from_array(p)).collect(),
                triangle_count: mesh.triangle_count() as u64,
                bounding_radius,
            },
        );
        Ok(handle)
    }

    fn begin_frame(&mut self, frame: &FrameView) -> Result<(), RenderError> {
        self.view_projection = frame.view_projection();
        self.frame = FrameCounters::default();
        Ok(())
    }

    fn draw(
        &mut self,
        mesh: MeshHandle,
        transform: &Mat4,
        _color: Rgb,
        primitive: PrimitiveKind,
    ) -> Result<(), RenderError> {
        if let Some(limit) = self.fail_after_draws
            && self.totals.draws + self.frame.draws >= limit
        {
            return Err(RenderError::DeviceLost(format!(
                "simulated device loss after {limit} draws"
            )));
        }

        let stored = self.meshes.get(&mesh).ok_or(RenderError::UnknownMesh(mesh))?;
        let mvp = self.view_projection * *transform;

        self.frame.draws += 1;
        match primitive {
            PrimitiveKind::Points => self.frame.points += stored.positions.len() as u64,
            PrimitiveKind::Triangles => self.frame.triangles += stored.triangle_count,
        }
        self.frame.visible_vertices += Self::count_visible(&mvp, &stored.positions);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        self.frames += 1;
        self.last_frame = self.frame;
        self.totals.accumulate(&self.frame);
        debug!(
            frame = self.frames,
            draws = self.frame.draws,
            triangles = self.frame.triangles,
            points = self.frame.points,
            visible = self.frame.visible_vertices,
            "headless frame"
        );
        Ok(())
    }

    fn release(&mut self, mesh: MeshHandle) {
        match self.meshes.remove(&mesh) {
            Some(stored) => {
                info!("Released mesh '{}' ({mesh:?})", stored.label);
                self.released.push(mesh);
            }
            None => debug!("Release of unknown mesh {mesh:?} ignored"),
        }
    }
}
