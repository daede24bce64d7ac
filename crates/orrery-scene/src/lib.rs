//! Time-driven scene model for the orrery.
//!
//! [`OrbitalBody`] values are evaluated against a [`SceneClock`] to produce
//! model matrices, [`Scene`] composes them into ordered [`DrawRecord`]s, and
//! [`FrameLoop`] feeds those records to a [`Renderer`] once per frame.

mod body;
mod camera;
mod clock;
mod error;
mod frame_loop;
mod renderer;
mod scene;

pub use body::{OrbitalBody, Rgb, evaluate_transform};
pub use camera::{FreeCamera, MovementInput, Projection};
pub use clock::SceneClock;
pub use error::SceneError;
pub use frame_loop::{
    FrameLoop, FrameSource, FrameStats, SceneHandles, StopSignal, WallClockSource,
};
pub use renderer::{FrameView, MeshHandle, PrimitiveKind, RenderError, Renderer};
pub use scene::{DrawRecord, STAR_COLOR, Scene, SceneMesh};
