//! The boundary between scene composition and whatever draws it.
//!
//! Implementations own the device. The core uploads each distinct mesh once,
//! issues one draw per [`DrawRecord`](crate::DrawRecord) every frame, and
//! releases the handles at shutdown.

use glam::Mat4;
use orrery_mesh::Mesh;

use crate::Rgb;

/// Opaque handle to a mesh living on the render device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// How the vertices of a mesh are assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// One point per vertex, no index buffer.
    Points,
    /// Indexed triangle list.
    Triangles,
}

/// Per-frame camera and clear state, set once before the draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameView {
    pub view: Mat4,
    pub projection: Mat4,
    pub clear_color: Rgb,
}

impl FrameView {
    /// `projection * view`.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Failures raised across the render boundary. All of them are fatal to
/// the frame loop.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The device refused a mesh upload.
    #[error("failed to upload mesh '{label}': {reason}")]
    UploadFailed { label: String, reason: String },

    /// The device went away mid-session.
    #[error("render device lost: {0}")]
    DeviceLost(String),

    /// A draw or release referenced a handle the renderer does not own.
    #[error("unknown mesh handle {0:?}")]
    UnknownMesh(MeshHandle),
}

/// A sink for uploaded meshes and per-frame draw calls.
pub trait Renderer {
    /// Upload `mesh` once and return a handle for later draws.
    fn upload_mesh(&mut self, label: &str, mesh: &Mesh) -> Result<MeshHandle, RenderError>;

    /// Called once per frame before any draw.
    fn begin_frame(&mut self, _frame: &FrameView) -> Result<(), RenderError> {
        Ok(())
    }

    /// Draw a previously uploaded mesh.
    fn draw(
        &mut self,
        mesh: MeshHandle,
        transform: &Mat4,
        color: Rgb,
        primitive: PrimitiveKind,
    ) -> Result<(), RenderError>;

    /// Called once per frame after the last draw.
    fn end_frame(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Free a mesh obtained from [`upload_mesh`](Self::upload_mesh).
    fn release(&mut self, mesh: MeshHandle);
}
