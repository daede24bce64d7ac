//! Configuration system for the orrery.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Every section falls back to defaults, so partial or older
//! config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BodyConfig, CameraConfig, Config, ConfigOrigin, DebugConfig, RenderConfig, WindowConfig,
};
pub use error::ConfigError;
