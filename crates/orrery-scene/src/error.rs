//! Scene-level error types.

use orrery_mesh::MeshError;

use crate::RenderError;

/// Errors that stop a scene from being built or run.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// Mesh generation rejected its parameters.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// The body list was empty, so there is no sun to anchor the scene.
    #[error("scene needs at least one body (the sun)")]
    MissingSun,

    /// The renderer failed; the frame loop has already released its meshes.
    #[error(transparent)]
    Render(#[from] RenderError),
}
