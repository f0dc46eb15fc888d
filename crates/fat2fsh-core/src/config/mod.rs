//! Configuration for fat2fsh
//!
//! Config files are discovered upward from the working directory
//! (`.fat2fshrc.json`, `.fat2fshrc.toml`, `fat2fsh.yaml`, `fat2fsh.yml`,
//! `fat2fsh.json`). Command-line flags override file values.

pub mod fat2fsh_config;
pub mod loader;

pub use fat2fsh_config::{
    DEFAULT_BASE_URL, Fat2FshConfig, NotationTemplate, OutputConfig, RegistryConfig,
};
pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
