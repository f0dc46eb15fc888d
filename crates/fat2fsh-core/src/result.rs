//! Result type alias for fat2fsh operations

use crate::error::Fat2FshError;

/// Standard Result type for fat2fsh operations
pub type Result<T> = std::result::Result<T, Fat2FshError>;
