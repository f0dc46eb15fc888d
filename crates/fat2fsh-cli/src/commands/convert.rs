//! Convert Command - Download FAT code lists and write FSH CodeSystems
//!
//! For every requested identifier the code list is fetched, rendered and
//! written as two artifacts:
//!
//! - `<output>/fat/<id>.json` - the normalized code system
//! - `<output>/fsh/<id>.fsh` - the generated FSH CodeSystem
//!
//! Identifiers are processed one at a time in the order given. A failure
//! for one identifier is reported and the run moves on to the next one.
//!
//! # Example Usage
//!
//! ```sh
//! fat2fsh convert -c 7010 -c 9151
//! fat2fsh convert --code-system 7010 --output-dir ./terminology --include-inactive
//! ```

use crate::output;
use anyhow::Context;
use fat2fsh_core::{
    CodeSystem, CodeSystemSource, Fat2FshConfig, Fat2FshError, OutputConfig, RegistryClient,
};
use fat2fsh_notation::{FshWriter, NotationGenerator};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Where the two artifacts of each identifier go
#[derive(Debug, Clone)]
pub struct ArtifactLayout {
    pub raw_dir: PathBuf,
    pub fsh_dir: PathBuf,
}

impl ArtifactLayout {
    pub fn new(output_dir: &Path, config: &OutputConfig) -> Self {
        Self {
            raw_dir: output_dir.join(&config.raw_dir),
            fsh_dir: output_dir.join(&config.fsh_dir),
        }
    }

    /// Create both artifact directories
    pub fn create_dirs(&self) -> fat2fsh_core::Result<()> {
        for dir in [&self.raw_dir, &self.fsh_dir] {
            fs::create_dir_all(dir).map_err(|e| Fat2FshError::io_error(dir, e))?;
        }
        Ok(())
    }

    /// Reject identifiers that would resolve outside the artifact directories
    pub fn check_identifier(&self, identifier: &str) -> fat2fsh_core::Result<()> {
        let escapes = identifier.is_empty()
            || identifier.contains(['/', '\\', '\0'])
            || identifier.contains("..");
        if escapes {
            return Err(Fat2FshError::io_error(
                self.raw_dir.join(identifier),
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("'{identifier}' is not usable as a file name"),
                ),
            ));
        }
        Ok(())
    }

    pub fn raw_path(&self, identifier: &str) -> PathBuf {
        self.raw_dir.join(format!("{identifier}.json"))
    }

    pub fn fsh_path(&self, identifier: &str) -> PathBuf {
        self.fsh_dir.join(format!("{identifier}.fsh"))
    }
}

/// Outcome of one successfully converted identifier
#[derive(Debug, Clone)]
pub struct ConvertedCodeSystem {
    pub identifier: String,
    pub raw_path: PathBuf,
    pub fsh_path: PathBuf,
    pub concepts: usize,
    pub emitted: usize,
}

/// Per-identifier results of a run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<ConvertedCodeSystem>,
    pub failed: Vec<(String, Fat2FshError)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Sequential fetch → render → write pipeline over a [`CodeSystemSource`]
pub struct BatchConverter<'a, S: CodeSystemSource + ?Sized> {
    source: &'a S,
    generator: NotationGenerator,
    writer: FshWriter,
    layout: ArtifactLayout,
    include_inactive: bool,
}

impl<'a, S: CodeSystemSource + ?Sized> BatchConverter<'a, S> {
    pub fn new(
        source: &'a S,
        generator: NotationGenerator,
        layout: ArtifactLayout,
        include_inactive: bool,
    ) -> Self {
        Self {
            source,
            generator,
            writer: FshWriter::default(),
            layout,
            include_inactive,
        }
    }

    pub fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    /// Fetch, render and write one identifier
    pub async fn convert_one(&self, identifier: &str) -> fat2fsh_core::Result<ConvertedCodeSystem> {
        self.layout.check_identifier(identifier)?;

        let code_system = self
            .source
            .fetch_code_system(identifier, self.include_inactive)
            .await?;

        let converted = self.write_artifacts(identifier, &code_system)?;
        info!("Saved FAT data to: {}", converted.raw_path.display());
        info!("Generated FSH file: {}", converted.fsh_path.display());
        info!(
            "Concepts found: {} ({} emitted)",
            converted.concepts, converted.emitted
        );
        Ok(converted)
    }

    /// Write both artifacts; a failed FSH write removes the JSON written before it
    fn write_artifacts(
        &self,
        identifier: &str,
        code_system: &CodeSystem,
    ) -> fat2fsh_core::Result<ConvertedCodeSystem> {
        let raw = serde_json::to_string_pretty(code_system)?;
        let exportable = self.generator.build(code_system);

        let raw_path = self.layout.raw_path(identifier);
        let fsh_path = self.layout.fsh_path(identifier);

        fs::write(&raw_path, raw).map_err(|e| Fat2FshError::io_error(&raw_path, e))?;

        if let Err(err) = self.writer.write_to_file(&exportable, &fsh_path) {
            if let Err(cleanup) = fs::remove_file(&raw_path) {
                warn!(
                    "Could not remove {} after failed write: {}",
                    raw_path.display(),
                    cleanup
                );
            }
            return Err(err);
        }

        Ok(ConvertedCodeSystem {
            identifier: identifier.to_string(),
            raw_path,
            fsh_path,
            concepts: code_system.concepts.len(),
            emitted: exportable.codes.len(),
        })
    }

    /// Convert every identifier in order, never stopping early
    pub async fn run(&self, identifiers: &[String]) -> BatchReport {
        let mut report = BatchReport::default();

        for identifier in identifiers {
            info!("Processing code system: {}", identifier);

            match self.convert_one(identifier).await {
                Ok(converted) => {
                    output::print_success(&converted);
                    report.succeeded.push(converted);
                }
                Err(err) => {
                    if err.is_recoverable() {
                        warn!("Skipping {}: {}", identifier, err);
                    } else {
                        error!("Unexpected failure for {}: {}", identifier, err);
                    }
                    output::print_failure(identifier, &err);
                    report.failed.push((identifier.clone(), err));
                }
            }
        }

        report
    }
}

/// Options for the convert command, after CLI parsing
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub code_systems: Vec<String>,
    pub output_dir: PathBuf,
    pub include_inactive: bool,
    pub base_url: Option<String>,
    pub strict: bool,
}

/// Execute the convert command
pub async fn convert_command(
    options: ConvertOptions,
    mut config: Fat2FshConfig,
) -> anyhow::Result<()> {
    if let Some(base_url) = options.base_url {
        config.api.base_url = base_url;
    }
    let include_inactive = options.include_inactive || config.api.include_inactive;

    let layout = ArtifactLayout::new(&options.output_dir, &config.output);
    layout
        .create_dirs()
        .context("Failed to set up output directories")?;

    info!("Output directory: {}", options.output_dir.display());
    info!("FAT data will be saved to: {}", layout.raw_dir.display());
    info!("FSH files will be saved to: {}", layout.fsh_dir.display());

    let client = RegistryClient::new(&config.api)?;
    debug!("Using FAT API at {}", client.base_url());

    let converter = BatchConverter::new(
        &client,
        NotationGenerator::new(config.notation),
        layout,
        include_inactive,
    );

    let report = converter.run(&options.code_systems).await;
    output::print_summary(&report);

    if options.strict && report.has_failures() {
        anyhow::bail!(
            "{} of {} code systems failed",
            report.failed.len(),
            report.total()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fat2fsh_core::{ErrorKind, normalize};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// In-memory source; identifiers without a payload fail like a 500
    struct FakeSource {
        payloads: HashMap<String, Value>,
    }

    impl FakeSource {
        fn new(payloads: &[(&str, Value)]) -> Self {
            Self {
                payloads: payloads
                    .iter()
                    .map(|(id, doc)| (id.to_string(), doc.clone()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl CodeSystemSource for FakeSource {
        async fn fetch_code_system(
            &self,
            identifier: &str,
            _include_inactive: bool,
        ) -> fat2fsh_core::Result<CodeSystem> {
            match self.payloads.get(identifier) {
                Some(doc) => normalize(identifier, doc),
                None => Err(Fat2FshError::transport(identifier, "HTTP status 500")),
            }
        }
    }

    fn converter<'a>(source: &'a FakeSource, out: &Path) -> BatchConverter<'a, FakeSource> {
        let layout = ArtifactLayout::new(out, &OutputConfig::default());
        layout.create_dirs().unwrap();
        BatchConverter::new(source, NotationGenerator::default(), layout, false)
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_end_to_end_single_code_system() {
        let temp_dir = TempDir::new().unwrap();
        let source = FakeSource::new(&[(
            "sys1",
            json!({
                "name": "X",
                "title": "X Title",
                "codes": [
                    {"code": "A", "display": "Alpha", "definition": "First letter"},
                    {"code": "", "display": "Beta"}
                ]
            }),
        )]);

        let report = converter(&source, temp_dir.path()).run(&ids(&["sys1"])).await;
        assert_eq!(report.succeeded.len(), 1);
        assert_eq!(report.succeeded[0].concepts, 2);
        assert_eq!(report.succeeded[0].emitted, 1);

        let fsh = fs::read_to_string(temp_dir.path().join("fsh/sys1.fsh")).unwrap();
        let concept_section = fsh.split("\n\n").nth(1).unwrap();
        assert_eq!(
            concept_section,
            "* #A \"Alpha\"\n  * ^definition = \"First letter\"\n"
        );

        let raw_text = fs::read_to_string(temp_dir.path().join("fat/sys1.json")).unwrap();
        let raw: Value = serde_json::from_str(&raw_text).unwrap();
        assert_eq!(raw["id"], "sys1");
        assert_eq!(raw["concepts"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_batch() {
        let temp_dir = TempDir::new().unwrap();
        let doc = json!({"name": "Ok", "codes": [{"code": "1", "display": "One"}]});
        let source = FakeSource::new(&[("first", doc.clone()), ("third", doc)]);

        let report = converter(&source, temp_dir.path())
            .run(&ids(&["first", "second", "third"]))
            .await;

        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "second");
        assert_eq!(report.failed[0].1.kind(), ErrorKind::Transport);

        assert!(temp_dir.path().join("fat/first.json").exists());
        assert!(temp_dir.path().join("fsh/third.fsh").exists());
        assert!(!temp_dir.path().join("fat/second.json").exists());
        assert!(!temp_dir.path().join("fsh/second.fsh").exists());
    }

    #[tokio::test]
    async fn test_failed_fsh_write_removes_raw_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let source = FakeSource::new(&[("sys1", json!({"name": "X"}))]);
        let converter = converter(&source, temp_dir.path());

        fs::create_dir(converter.layout().fsh_path("sys1")).unwrap();

        let err = converter.convert_one("sys1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!temp_dir.path().join("fat/sys1.json").exists());
    }

    #[tokio::test]
    async fn test_processing_order_follows_input() {
        let temp_dir = TempDir::new().unwrap();
        let doc = json!({"name": "X"});
        let source = FakeSource::new(&[("b", doc.clone()), ("a", doc.clone()), ("c", doc)]);

        let report = converter(&source, temp_dir.path())
            .run(&ids(&["c", "a", "b"]))
            .await;
        let order: Vec<&str> = report
            .succeeded
            .iter()
            .map(|c| c.identifier.as_str())
            .collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_layout_uses_configured_dirs() {
        let layout = ArtifactLayout::new(
            Path::new("out"),
            &OutputConfig {
                raw_dir: "raw".to_string(),
                fsh_dir: "input/fsh".to_string(),
            },
        );
        assert_eq!(layout.raw_path("7010"), Path::new("out/raw/7010.json"));
        assert_eq!(layout.fsh_path("7010"), Path::new("out/input/fsh/7010.fsh"));
    }

    #[tokio::test]
    async fn test_identifier_with_path_components_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out");
        let doc = json!({"name": "X"});
        let source = FakeSource::new(&[("../x", doc.clone()), ("a/b", doc.clone()), ("ok", doc)]);

        let report = converter(&source, &out)
            .run(&ids(&["../x", "a/b", "ok"]))
            .await;

        assert_eq!(report.succeeded.len(), 1);
        assert_eq!(report.failed.len(), 2);
        assert!(report.failed.iter().all(|(_, err)| err.kind() == ErrorKind::Io));
        assert!(!out.join("x.json").exists());
        assert!(!out.join("x.fsh").exists());
        assert!(!out.join("fat/a").exists());
        assert!(out.join("fsh/ok.fsh").exists());
    }
}
