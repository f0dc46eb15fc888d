//! Abstraction over where code systems come from

use crate::model::CodeSystem;
use crate::result::Result;
use async_trait::async_trait;

/// Anything that can produce a normalized [`CodeSystem`] for an identifier
///
/// Implemented by [`RegistryClient`](super::RegistryClient); batch drivers
/// depend on this trait rather than on HTTP.
#[async_trait]
pub trait CodeSystemSource: Send + Sync {
    async fn fetch_code_system(
        &self,
        identifier: &str,
        include_inactive: bool,
    ) -> Result<CodeSystem>;
}
