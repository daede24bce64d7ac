//! Single-threaded frame loop driving a [`Renderer`] from a [`Scene`].
//!
//! Startup uploads the shared meshes, each frame samples the time source
//! once and submits the composed draw records, and shutdown releases every
//! handle. A render error ends the loop after the handles are released.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::{
    FreeCamera, FrameView, MeshHandle, MovementInput, Projection, RenderError, Renderer, Rgb,
    Scene, SceneClock, SceneError, SceneMesh,
};

/// Supplies time, input and the stop decision to the frame loop.
pub trait FrameSource {
    /// Current time in seconds. Queried once per frame.
    fn now(&mut self) -> f64;

    /// Movement keys held this frame.
    fn movement(&mut self) -> MovementInput {
        MovementInput::NONE
    }

    /// Checked between frames; `true` ends the loop.
    fn should_stop(&mut self, frames_completed: u64) -> bool;
}

/// Cloneable flag that asks a running loop to stop after the current frame.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Wall-clock time source with an optional frame budget and frame pacing.
#[derive(Debug)]
pub struct WallClockSource {
    start: Instant,
    max_frames: Option<u64>,
    frame_interval: Option<Duration>,
    last_sample: Option<Instant>,
    stop: StopSignal,
}

impl WallClockSource {
    pub fn new(max_frames: Option<u64>) -> Self {
        Self {
            start: Instant::now(),
            max_frames,
            frame_interval: None,
            last_sample: None,
            stop: StopSignal::new(),
        }
    }

    /// Cap the frame rate by sleeping before each sample. `0` means unlimited.
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.frame_interval = (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64));
        self
    }

    /// A handle that stops this source from elsewhere.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }
}

impl FrameSource for WallClockSource {
    fn now(&mut self) -> f64 {
        if let (Some(interval), Some(last)) = (self.frame_interval, self.last_sample) {
            let wait = interval.saturating_sub(last.elapsed());
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
        }
        let sample = Instant::now();
        self.last_sample = Some(sample);
        sample.duration_since(self.start).as_secs_f64()
    }

    fn should_stop(&mut self, frames_completed: u64) -> bool {
        self.stop.is_stopped() || self.max_frames.is_some_and(|max| frames_completed >= max)
    }
}

/// Totals reported when the loop ends normally.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub draws: u64,
    /// Scene time reached, in seconds.
    pub elapsed: f64,
}

/// Device handles for the scene's shared meshes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneHandles {
    pub sphere: MeshHandle,
    pub starfield: MeshHandle,
}

impl SceneHandles {
    pub fn get(&self, mesh: SceneMesh) -> MeshHandle {
        match mesh {
            SceneMesh::Sphere => self.sphere,
            SceneMesh::Starfield => self.starfield,
        }
    }
}

/// Owns the renderer for the lifetime of the animation.
pub struct FrameLoop<R> {
    renderer: R,
    projection: Projection,
    clear_color: Rgb,
}

impl<R: Renderer> FrameLoop<R> {
    pub fn new(renderer: R, projection: Projection, clear_color: Rgb) -> Self {
        Self {
            renderer,
            projection,
            clear_color,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run until `source` asks to stop or the renderer fails.
    ///
    /// Mesh handles are released on both paths.
    pub fn run<S: FrameSource>(
        &mut self,
        scene: &Scene,
        clock: &mut SceneClock,
        camera: &mut FreeCamera,
        source: &mut S,
    ) -> Result<FrameStats, SceneError> {
        let handles = self.upload(scene)?;
        info!(
            "Uploaded scene meshes: {} bodies, sphere {:?}, starfield {:?}",
            scene.body_count(),
            handles.sphere,
            handles.starfield
        );

        let result = self.frames(scene, handles, clock, camera, source);
        self.release(handles);

        match &result {
            Ok(stats) => info!(
                "Frame loop finished: {} frames, {} draws, {:.2}s scene time",
                stats.frames, stats.draws, stats.elapsed
            ),
            Err(e) => error!("Frame loop halted: {e}"),
        }
        result.map_err(SceneError::from)
    }

    /// Upload the sphere and starfield. If the second upload fails the first
    /// handle is released before returning.
    pub fn upload(&mut self, scene: &Scene) -> Result<SceneHandles, RenderError> {
        let sphere = self
            .renderer
            .upload_mesh(SceneMesh::Sphere.label(), scene.mesh(SceneMesh::Sphere))?;
        let starfield = match self
            .renderer
            .upload_mesh(SceneMesh::Starfield.label(), scene.mesh(SceneMesh::Starfield))
        {
            Ok(handle) => handle,
            Err(e) => {
                self.renderer.release(sphere);
                return Err(e);
            }
        };
        Ok(SceneHandles { sphere, starfield })
    }

    pub fn release(&mut self, handles: SceneHandles) {
        self.renderer.release(handles.starfield);
        self.renderer.release(handles.sphere);
    }

    /// Compose and submit one frame at the clock's current time. Returns the
    /// number of draws issued.
    pub fn render_frame(
        &mut self,
        scene: &Scene,
        handles: SceneHandles,
        clock: &SceneClock,
        camera: &FreeCamera,
    ) -> Result<usize, RenderError> {
        let frame = FrameView {
            view: camera.view_matrix(),
            projection: self.projection.matrix(),
            clear_color: self.clear_color,
        };
        self.renderer.begin_frame(&frame)?;

        let records = scene.compose_frame(clock);
        for record in &records {
            self.renderer.draw(
                handles.get(record.mesh),
                &record.transform,
                record.color,
                record.primitive,
            )?;
        }

        self.renderer.end_frame()?;
        Ok(records.len())
    }

    fn frames<S: FrameSource>(
        &mut self,
        scene: &Scene,
        handles: SceneHandles,
        clock: &mut SceneClock,
        camera: &mut FreeCamera,
        source: &mut S,
    ) -> Result<FrameStats, RenderError> {
        let mut stats = FrameStats::default();
        let mut last = source.now();

        while !source.should_stop(stats.frames) {
            let now = source.now();
            clock.tick(now - last);
            // A regressed sample must not be counted again once time recovers.
            last = last.max(now);

            camera.process_movement(source.movement(), clock.delta() as f32);

            let draws = self.render_frame(scene, handles, clock, camera)?;
            stats.frames += 1;
            stats.draws += draws as u64;
            stats.elapsed = clock.elapsed();

            debug!(
                frame = stats.frames,
                elapsed = clock.elapsed(),
                delta = clock.delta(),
                draws,
                "frame submitted"
            );
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OrbitalBody, PrimitiveKind};
    use glam::{Mat4, Vec3};
    use orrery_mesh::{Mesh, generate_sphere, generate_starfield};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Upload(String),
        Begin,
        Draw(MeshHandle, Mat4, Rgb, PrimitiveKind),
        End,
        Release(MeshHandle),
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<Call>,
        next: u32,
        fail_upload: Option<&'static str>,
        fail_on_draw: Option<usize>,
        draws: usize,
    }

    impl Renderer for RecordingRenderer {
        fn upload_mesh(&mut self, label: &str, _mesh: &Mesh) -> Result<MeshHandle, RenderError> {
            if self.fail_upload == Some(label) {
                return Err(RenderError::UploadFailed {
                    label: label.to_string(),
                    reason: "out of memory".to_string(),
                });
            }
            self.calls.push(Call::Upload(label.to_string()));
            self.next += 1;
            Ok(MeshHandle(self.next))
        }

        fn begin_frame(&mut self, _frame: &FrameView) -> Result<(), RenderError> {
            self.calls.push(Call::Begin);
            Ok(())
        }

        fn draw(
            &mut self,
            mesh: MeshHandle,
            transform: &Mat4,
            color: Rgb,
            primitive: PrimitiveKind,
        ) -> Result<(), RenderError> {
            if self.fail_on_draw == Some(self.draws) {
                return Err(RenderError::DeviceLost("gpu reset".to_string()));
            }
            self.draws += 1;
            self.calls.push(Call::Draw(mesh, *transform, color, primitive));
            Ok(())
        }

        fn end_frame(&mut self) -> Result<(), RenderError> {
            self.calls.push(Call::End);
            Ok(())
        }

        fn release(&mut self, mesh: MeshHandle) {
            self.calls.push(Call::Release(mesh));
        }
    }

    /// Replays fixed timestamps and stops when they run out.
    struct ScriptedSource {
        times: Vec<f64>,
        cursor: usize,
        movement: MovementInput,
    }

    impl ScriptedSource {
        fn new(times: &[f64]) -> Self {
            Self {
                times: times.to_vec(),
                cursor: 0,
                movement: MovementInput::NONE,
            }
        }
    }

    impl FrameSource for ScriptedSource {
        fn now(&mut self) -> f64 {
            let t = self.times[self.cursor.min(self.times.len() - 1)];
            self.cursor += 1;
            t
        }

        fn movement(&mut self) -> MovementInput {
            self.movement
        }

        fn should_stop(&mut self, _frames_completed: u64) -> bool {
            self.cursor >= self.times.len()
        }
    }

    fn scene() -> Scene {
        let sphere = generate_sphere(1.0, 4, 8).unwrap();
        let stars = Mesh::point_cloud(generate_starfield(10, 30.0, Some(3)).unwrap());
        let mut scene = Scene::new(sphere, stars, OrbitalBody::new("sun", 1.0, [1.0, 0.5, 0.2]));
        scene.register(
            OrbitalBody::new("earth", 0.5, [0.2, 0.5, 1.0]).with_orbit(4.0, 20f64.to_radians()),
        );
        scene
    }

    fn frame_loop(renderer: RecordingRenderer) -> FrameLoop<RecordingRenderer> {
        FrameLoop::new(
            renderer,
            Projection::from_viewport(45.0, 800, 600, 0.1, 100.0),
            [0.0, 0.0, 0.05],
        )
    }

    #[test]
    fn test_full_lifecycle_call_order() {
        let scene = scene();
        let mut clock = SceneClock::new();
        let mut camera = FreeCamera::default();
        // First sample is the baseline, then two frames.
        let mut source = ScriptedSource::new(&[0.0, 0.5, 1.0]);
        let mut fl = frame_loop(RecordingRenderer::default());

        let stats = fl.run(&scene, &mut clock, &mut camera, &mut source).unwrap();
        assert_eq!(stats.frames, 2);
        assert_eq!(stats.draws, 6);
        assert!((stats.elapsed - 1.0).abs() < 1e-12);

        let calls = &fl.renderer().calls;
        assert_eq!(calls[0], Call::Upload("sphere".to_string()));
        assert_eq!(calls[1], Call::Upload("starfield".to_string()));
        assert_eq!(calls[2], Call::Begin);
        assert!(matches!(
            calls[3],
            Call::Draw(MeshHandle(2), _, _, PrimitiveKind::Points)
        ));
        assert!(matches!(
            calls[4],
            Call::Draw(MeshHandle(1), _, _, PrimitiveKind::Triangles)
        ));
        assert_eq!(calls[6], Call::End);
        assert_eq!(calls[calls.len() - 2], Call::Release(MeshHandle(2)));
        assert_eq!(calls[calls.len() - 1], Call::Release(MeshHandle(1)));
    }

    #[test]
    fn test_draws_use_clock_elapsed() {
        let scene = scene();
        let mut clock = SceneClock::new();
        let mut camera = FreeCamera::default();
        let mut source = ScriptedSource::new(&[10.0, 14.5]);
        let mut fl = frame_loop(RecordingRenderer::default());
        fl.run(&scene, &mut clock, &mut camera, &mut source).unwrap();

        let earth = fl
            .renderer()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Draw(_, m, color, _) if *color == [0.2, 0.5, 1.0] => Some(*m),
                _ => None,
            })
            .next_back()
            .unwrap();
        let pos = earth.w_axis.truncate();
        assert!((pos - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-5, "earth at {pos:?}");
    }

    #[test]
    fn test_time_regression_is_clamped_and_not_double_counted() {
        let scene = scene();
        let mut clock = SceneClock::new();
        let mut camera = FreeCamera::default();
        let mut source = ScriptedSource::new(&[0.0, 1.0, 0.5, 1.0, 1.5]);
        let mut fl = frame_loop(RecordingRenderer::default());
        let stats = fl.run(&scene, &mut clock, &mut camera, &mut source).unwrap();
        assert_eq!(stats.frames, 4);
        assert!((clock.elapsed() - 1.5).abs() < 1e-12, "elapsed {}", clock.elapsed());
    }

    #[test]
    fn test_camera_moves_with_delta() {
        let scene = scene();
        let mut clock = SceneClock::new();
        let mut camera = FreeCamera {
            position: Vec3::ZERO,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            speed: 5.0,
        };
        let mut source = ScriptedSource::new(&[0.0, 0.2]);
        source.movement = MovementInput {
            forward: true,
            ..MovementInput::NONE
        };
        let mut fl = frame_loop(RecordingRenderer::default());
        fl.run(&scene, &mut clock, &mut camera, &mut source).unwrap();
        assert!((camera.position - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_upload_failure_releases_earlier_handles() {
        let scene = scene();
        let mut clock = SceneClock::new();
        let mut camera = FreeCamera::default();
        let mut source = ScriptedSource::new(&[0.0, 1.0]);
        let mut fl = frame_loop(RecordingRenderer {
            fail_upload: Some("starfield"),
            ..Default::default()
        });

        let result = fl.run(&scene, &mut clock, &mut camera, &mut source);
        assert!(matches!(
            result,
            Err(SceneError::Render(RenderError::UploadFailed { .. }))
        ));
        assert_eq!(
            fl.renderer().calls,
            vec![
                Call::Upload("sphere".to_string()),
                Call::Release(MeshHandle(1))
            ]
        );
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_draw_failure_halts_and_releases() {
        let scene = scene();
        let mut clock = SceneClock::new();
        let mut camera = FreeCamera::default();
        let mut source = ScriptedSource::new(&[0.0, 0.1, 0.2, 0.3, 0.4]);
        let mut fl = frame_loop(RecordingRenderer {
            fail_on_draw: Some(4),
            ..Default::default()
        });

        let result = fl.run(&scene, &mut clock, &mut camera, &mut source);
        assert!(matches!(
            result,
            Err(SceneError::Render(RenderError::DeviceLost(_)))
        ));
        let calls = &fl.renderer().calls;
        assert_eq!(calls[calls.len() - 2], Call::Release(MeshHandle(2)));
        assert_eq!(calls[calls.len() - 1], Call::Release(MeshHandle(1)));
        // Failed during the second frame.
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn test_stop_signal() {
        let mut source = WallClockSource::new(None);
        assert!(!source.should_stop(1000));
        source.stop_signal().stop();
        assert!(source.should_stop(0));
    }

    #[test]
    fn test_wall_clock_is_monotonic_and_paced() {
        let mut source = WallClockSource::new(None).with_target_fps(200);
        let a = source.now();
        let b = source.now();
        assert!(b >= a + 0.004, "expected ~5ms pacing, got {}s", b - a);
    }

    #[test]
    fn test_frame_budget() {
        let mut source = WallClockSource::new(Some(3));
        assert!(!source.should_stop(2));
        assert!(source.should_stop(3));
    }
}
