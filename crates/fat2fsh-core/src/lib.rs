//! fat2fsh core
//!
//! Fetches code lists from the Norwegian FAT registry and normalizes the
//! different payload shapes the API has used into a single [`CodeSystem`]
//! model ready for FHIR Shorthand generation.

pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod result;

pub use config::{
    ConfigLoader, DEFAULT_BASE_URL, Fat2FshConfig, NotationTemplate, OutputConfig,
    RegistryConfig,
};
pub use error::{ErrorKind, Fat2FshError};
pub use model::{CodeSystem, Concept, DEFAULT_VERSION};
pub use registry::{CodeSystemSource, RegistryClient, normalize};
pub use result::Result;

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fat2fsh=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
