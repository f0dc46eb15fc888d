//! FSH Writer - Converts Exportable types to FSH text files
//!
//! # Examples
//!
//! ```no_run
//! use fat2fsh_core::CodeSystem;
//! use fat2fsh_notation::{FshWriter, NotationGenerator};
//! use std::path::Path;
//!
//! let code_system = CodeSystem::new("7010");
//! let exportable = NotationGenerator::default().build(&code_system);
//!
//! let writer = FshWriter::default();
//! writer
//!     .write_to_file(&exportable, Path::new("fsh/7010.fsh"))
//!     .unwrap();
//! ```

use crate::exportable::Exportable;
use fat2fsh_core::{Fat2FshError, Result};
use std::fs;
use std::path::Path;

/// Serializes exportables to FSH text and files
#[derive(Debug, Clone, Default)]
pub struct FshWriter;

impl FshWriter {
    /// Convert an Exportable to FSH text, ending with a newline
    ///
    /// ```
    /// use fat2fsh_core::CodeSystem;
    /// use fat2fsh_notation::{FshWriter, NotationGenerator};
    ///
    /// let exportable = NotationGenerator::default().build(&CodeSystem::new("7010"));
    /// let fsh = FshWriter::default().write(&exportable);
    /// assert!(fsh.starts_with("CodeSystem: FAT7010\n"));
    /// ```
    pub fn write(&self, exportable: &dyn Exportable) -> String {
        let mut fsh = exportable.to_fsh();

        if !fsh.ends_with('\n') {
            fsh.push('\n');
        }

        fsh
    }

    /// Write an Exportable to a file, creating parent directories
    pub fn write_to_file(&self, exportable: &dyn Exportable, path: &Path) -> Result<()> {
        let fsh = self.write(exportable);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Fat2FshError::io_error(parent, e))?;
        }

        fs::write(path, fsh).map_err(|e| Fat2FshError::io_error(path, e))?;
        tracing::debug!("Wrote {}", path.display());

        Ok(())
    }
}
