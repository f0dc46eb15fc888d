//! FAT registry access: HTTP client, payload normalization, source trait

pub mod client;
pub mod normalize;
pub mod source;

pub use client::RegistryClient;
pub use normalize::{CONCEPT_LIST_RULES, ConceptListRule, extract_concepts, normalize};
pub use source::CodeSystemSource;
