//! Orrery application: turns a [`Config`] into a running animation.

pub mod platform;

use glam::Vec3;
use orrery_config::{BodyConfig, CameraConfig, Config};
use orrery_mesh::{Mesh, generate_sphere, generate_starfield};
use orrery_scene::{
    FrameLoop, FrameSource, FrameStats, FreeCamera, OrbitalBody, Projection, Renderer, Scene,
    SceneClock, SceneError, StopSignal,
};
use tracing::info;

/// Convert a configured body (degrees) into an [`OrbitalBody`] (radians).
pub fn body_from_config(body: &BodyConfig) -> OrbitalBody {
    OrbitalBody::new(body.name.clone(), body.base_radius, body.color)
        .with_orbit(body.orbit_radius, body.orbit_speed_deg.to_radians())
        .with_spin(body.spin_speed_deg.to_radians())
        .with_axial_tilt(body.axial_tilt_deg.to_radians())
        .with_phase_offset(body.phase_offset_deg.to_radians())
}

pub fn camera_from_config(camera: &CameraConfig) -> FreeCamera {
    FreeCamera {
        position: Vec3::from_array(camera.position),
        front: Vec3::from_array(camera.front),
        up: Vec3::from_array(camera.up),
        speed: camera.speed,
    }
}

pub fn projection_from_config(config: &Config) -> Projection {
    Projection::from_viewport(
        config.render.fov_y_degrees,
        config.window.width,
        config.window.height,
        config.render.near,
        config.render.far,
    )
}

/// Generate the meshes and register every configured body.
///
/// # Errors
///
/// Fails on invalid sphere/starfield parameters or an empty body list.
pub fn build_scene(config: &Config) -> Result<Scene, SceneError> {
    let render = &config.render;
    let sphere = generate_sphere(1.0, render.sphere_lat_segments, render.sphere_lon_segments)?;
    let stars = generate_starfield(
        render.star_count,
        render.starfield_radius,
        render.starfield_seed,
    )?;

    let scene = Scene::from_bodies(
        sphere,
        Mesh::point_cloud(stars),
        config.bodies.iter().map(body_from_config),
    )?;

    info!(
        "Scene built: {} bodies, {} stars, sphere {}x{}",
        scene.body_count(),
        render.star_count,
        render.sphere_lat_segments,
        render.sphere_lon_segments
    );
    Ok(scene)
}

/// Route Ctrl-C to `stop`, so the loop ends between frames and releases its
/// meshes.
///
/// # Errors
///
/// Fails if a handler is already installed in this process.
pub fn stop_on_interrupt(stop: StopSignal) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        info!("Interrupt received, stopping after the current frame");
        stop.stop();
    })
}

/// Scene state plus the frame loop that draws it.
pub struct Orrery<R> {
    scene: Scene,
    clock: SceneClock,
    camera: FreeCamera,
    frame_loop: FrameLoop<R>,
}

impl<R: Renderer> Orrery<R> {
    pub fn new(config: &Config, renderer: R) -> Result<Self, SceneError> {
        Ok(Self {
            scene: build_scene(config)?,
            clock: SceneClock::new(),
            camera: camera_from_config(&config.camera),
            frame_loop: FrameLoop::new(
                renderer,
                projection_from_config(config),
                config.render.clear_color,
            ),
        })
    }

    /// Run the frame loop until `source` stops it or the renderer fails.
    pub fn run<S: FrameSource>(&mut self, source: &mut S) -> Result<FrameStats, SceneError> {
        self.frame_loop
            .run(&self.scene, &mut self.clock, &mut self.camera, source)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn clock(&self) -> &SceneClock {
        &self.clock
    }

    pub fn camera(&self) -> &FreeCamera {
        &self.camera
    }

    pub fn renderer(&self) -> &R {
        self.frame_loop.renderer()
    }
}
