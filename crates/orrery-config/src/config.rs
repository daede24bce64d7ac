//! Configuration structs with defaults matching the stock scene, plus RON
//! persistence.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level orrery configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewport settings.
    pub window: WindowConfig,
    /// Geometry and projection settings.
    pub render: RenderConfig,
    /// Initial camera placement and speed.
    pub camera: CameraConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
    /// Registered bodies in draw order. The first entry is the sun.
    pub bodies: Vec<BodyConfig>,
}

/// Viewport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    pub title: String,
}

/// Geometry and projection configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Latitude bands of the shared body sphere.
    pub sphere_lat_segments: u32,
    /// Longitude slices of the shared body sphere.
    pub sphere_lon_segments: u32,
    /// Number of background stars.
    pub star_count: usize,
    /// Radius of the ball the stars are scattered in.
    pub starfield_radius: f32,
    /// Fixed starfield seed. `None` gives a different sky every run.
    pub starfield_seed: Option<u64>,
    /// Background color.
    pub clear_color: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Frame rate cap (0 = unlimited).
    pub target_fps: u32,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Facing direction. Not required to be unit length.
    pub front: [f32; 3],
    pub up: [f32; 3],
    /// Movement speed in units per second.
    pub speed: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Stop after this many frames. `None` runs until stopped externally.
    pub max_frames: Option<u64>,
}

/// One celestial body. Angles are in degrees for readability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    pub name: String,
    /// Visual radius.
    pub base_radius: f32,
    /// Distance from the origin. Zero keeps the body fixed at the centre.
    pub orbit_radius: f32,
    pub orbit_speed_deg: f64,
    pub spin_speed_deg: f64,
    pub axial_tilt_deg: f32,
    pub phase_offset_deg: f64,
    pub color: [f32; 3],
}

impl BodyConfig {
    /// The stock sun: fixed at the origin, orange.
    pub fn sun() -> Self {
        Self {
            name: "Sun".to_string(),
            base_radius: 1.0,
            color: [1.0, 0.5, 0.2],
            ..Self::default()
        }
    }

    /// The stock earth: tilted, mid-distance, blue.
    pub fn earth() -> Self {
        Self {
            name: "Earth".to_string(),
            base_radius: 0.5,
            orbit_radius: 4.0,
            orbit_speed_deg: 20.0,
            spin_speed_deg: 50.0,
            axial_tilt_deg: 23.5,
            phase_offset_deg: 0.0,
            color: [0.2, 0.5, 1.0],
        }
    }

    /// The stock venus: inner orbit, opposite phase to earth, slow spin.
    pub fn venus() -> Self {
        Self {
            name: "Venus".to_string(),
            base_radius: 0.4,
            orbit_radius: 2.5,
            orbit_speed_deg: 35.0,
            spin_speed_deg: 30.0,
            axial_tilt_deg: 0.0,
            phase_offset_deg: 180.0,
            color: [0.9, 0.7, 0.3],
        }
    }
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Solar System with Earth and Venus".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sphere_lat_segments: 40,
            sphere_lon_segments: 40,
            star_count: 1000,
            starfield_radius: 30.0,
            starfield_seed: None,
            clear_color: [0.0, 0.0, 0.05],
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            target_fps: 60,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 5.0, 12.0],
            front: [0.0, -0.3, -1.0],
            up: [0.0, 1.0, 0.0],
            speed: 5.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            max_frames: None,
        }
    }
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_radius: 1.0,
            orbit_radius: 0.0,
            orbit_speed_deg: 0.0,
            spin_speed_deg: 0.0,
            axial_tilt_deg: 0.0,
            phase_offset_deg: 0.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            debug: DebugConfig::default(),
            bodies: vec![BodyConfig::sun(), BodyConfig::earth(), BodyConfig::venus()],
        }
    }
}

// --- Load / Save / Reload ---

/// How [`Config::load_or_create_with_origin`] obtained its config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from an existing file.
    Loaded(PathBuf),
    /// No file existed; defaults were written here.
    Created(PathBuf),
}

impl ConfigOrigin {
    pub fn path(&self) -> &Path {
        match self {
            Self::Loaded(path) | Self::Created(path) => path,
        }
    }
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(path) => write!(f, "Loaded config from {}", path.display()),
            Self::Created(path) => write!(f, "Created default config at {}", path.display()),
        }
    }
}

impl Config {
    /// Path of the config file inside `config_dir`.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let (config, origin) = Self::load_or_create_with_origin(config_dir)?;
        log::info!("{origin}");
        Ok(config)
    }

    /// Like [`Config::load_or_create`], but hands back where the config came
    /// from instead of logging it, for callers that set up logging afterwards.
    pub fn load_or_create_with_origin(
        config_dir: &Path,
    ) -> Result<(Self, ConfigOrigin), ConfigError> {
        let config_path = Self::path_in(config_dir);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            Ok((config, ConfigOrigin::Loaded(config_path)))
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            Ok((config, ConfigOrigin::Created(config_path)))
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = Self::path_in(config_dir);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&Self::path_in(config_dir))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
