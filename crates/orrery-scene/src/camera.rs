//! Free camera with a plain directional-velocity model.

use glam::{Mat4, Vec3};

/// Movement keys held during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementInput {
    /// No keys held.
    pub const NONE: Self = Self {
        forward: false,
        backward: false,
        left: false,
        right: false,
    };

    pub fn is_idle(&self) -> bool {
        *self == Self::NONE
    }
}

/// A camera that moves along its facing direction and strafes sideways.
///
/// Orientation is fixed; only the position changes.
#[derive(Clone, Debug, PartialEq)]
pub struct FreeCamera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    /// Units per second.
    pub speed: f32,
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 12.0),
            front: Vec3::new(0.0, -0.3, -1.0),
            up: Vec3::Y,
            speed: 5.0,
        }
    }
}

impl FreeCamera {
    /// Unit vector pointing to the camera's right.
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize_or_zero()
    }

    /// Move according to `input` over `delta_seconds`.
    ///
    /// Forward/backward travel along `front` as given, so a non-unit `front`
    /// scales forward speed. Strafing uses the normalised right vector.
    pub fn process_movement(&mut self, input: MovementInput, delta_seconds: f32) {
        if input.is_idle() || delta_seconds <= 0.0 {
            return;
        }
        let step = self.speed * delta_seconds;
        let right = self.right();

        if input.forward {
            self.position += self.front * step;
        }
        if input.backward {
            self.position -= self.front * step;
        }
        if input.left {
            self.position -= right * step;
        }
        if input.right {
            self.position += right * step;
        }
    }

    /// Right-handed look-at view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }
}

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    /// Build from a field of view in degrees and a viewport size in pixels.
    pub fn from_viewport(fov_y_degrees: f32, width: u32, height: u32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            aspect_ratio: width as f32 / height.max(1) as f32,
            near,
            far,
        }
    }

    /// OpenGL-convention perspective matrix (clip z in `[-w, w]`).
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect_ratio, self.near, self.far)
    }
}
