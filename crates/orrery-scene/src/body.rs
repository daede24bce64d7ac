//! Celestial bodies whose placement is a closed-form function of time.

use glam::{Mat4, Vec3};

/// Linear RGB color with components in `[0, 1]`.
pub type Rgb = [f32; 3];

/// One simulated body: static shape plus circular-orbit, spin and tilt
/// parameters.
///
/// Motion parameters are fixed at construction; only the evaluation time
/// varies. A body with `orbit_radius == 0` stays at the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalBody {
    name: String,
    base_radius: f32,
    orbit_radius: f32,
    orbit_angular_speed: f64,
    spin_angular_speed: f64,
    axial_tilt: f32,
    phase_offset: f64,
    color: Rgb,
}

impl OrbitalBody {
    /// A stationary, non-spinning, untilted body at the origin.
    pub fn new(name: impl Into<String>, base_radius: f32, color: Rgb) -> Self {
        Self {
            name: name.into(),
            base_radius,
            orbit_radius: 0.0,
            orbit_angular_speed: 0.0,
            spin_angular_speed: 0.0,
            axial_tilt: 0.0,
            phase_offset: 0.0,
            color,
        }
    }

    /// Circular orbit in the XZ plane, `angular_speed` in radians per second.
    pub fn with_orbit(mut self, radius: f32, angular_speed: f64) -> Self {
        self.orbit_radius = radius;
        self.orbit_angular_speed = angular_speed;
        self
    }

    /// Spin about the world Y axis in radians per second.
    pub fn with_spin(mut self, angular_speed: f64) -> Self {
        self.spin_angular_speed = angular_speed;
        self
    }

    /// Constant tilt about the world Z axis in radians.
    pub fn with_axial_tilt(mut self, tilt: f32) -> Self {
        self.axial_tilt = tilt;
        self
    }

    /// Constant orbital phase in radians.
    pub fn with_phase_offset(mut self, phase: f64) -> Self {
        self.phase_offset = phase;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }

    pub fn orbit_radius(&self) -> f32 {
        self.orbit_radius
    }

    pub fn orbit_angular_speed(&self) -> f64 {
        self.orbit_angular_speed
    }

    pub fn spin_angular_speed(&self) -> f64 {
        self.spin_angular_speed
    }

    pub fn axial_tilt(&self) -> f32 {
        self.axial_tilt
    }

    pub fn phase_offset(&self) -> f64 {
        self.phase_offset
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// True for bodies that never leave the origin.
    pub fn is_stationary(&self) -> bool {
        self.orbit_radius == 0.0
    }

    /// Orbital position at time `t` seconds. Always has `y == 0`.
    pub fn orbital_position(&self, t: f64) -> Vec3 {
        // Angles stay in f64 so long sessions do not lose precision.
        let angle = self.orbit_angular_speed * t + self.phase_offset;
        let r = self.orbit_radius as f64;
        Vec3::new((r * angle.cos()) as f32, 0.0, (r * angle.sin()) as f32)
    }

    /// Model matrix at time `t`. See [`evaluate_transform`].
    pub fn transform_at(&self, t: f64) -> Mat4 {
        evaluate_transform(self, t)
    }
}

/// Model matrix of `body` at time `t` seconds.
///
/// Composed as `translate * spin_y * tilt_z * scale`, so a unit-sphere vertex
/// is scaled, tilted about world Z, spun about world Y, then moved onto the
/// orbit. Spinning after the tilt makes the tilted pole sweep around Y.
/// Stationary bodies run the same pipeline with zero angles.
pub fn evaluate_transform(body: &OrbitalBody, t: f64) -> Mat4 {
    let spin = (body.spin_angular_speed * t).rem_euclid(std::f64::consts::TAU) as f32;

    Mat4::from_translation(body.orbital_position(t))
        * Mat4::from_rotation_y(spin)
        * Mat4::from_rotation_z(body.axial_tilt)
        * Mat4::from_scale(Vec3::splat(body.base_radius))
}
