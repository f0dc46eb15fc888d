//! # fat2fsh-notation
//!
//! FHIR Shorthand (FSH) generation for FAT code lists.
//!
//! [`NotationGenerator`] turns a normalized [`fat2fsh_core::CodeSystem`] into an
//! [`ExportableCodeSystem`], and [`FshWriter`] serializes exportables to text
//! and files.

pub mod exportable;
pub mod generator;
pub mod writer;

pub use exportable::*;
pub use generator::{NotationGenerator, OID_IDENTIFIER_SYSTEM};
pub use writer::FshWriter;
