//! Best-effort batch generation of every comparison artifact.
//!
//! A failing pair is recorded and skipped; the batch always attempts
//! every pair it was given.

use crate::render::comparison_page;
use crate::synthesis::{ComparisonDocument, synthesize};
use geo_compare_core::config::SiteMetadata;
use geo_compare_core::{Catalog, Pair, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for generated artifacts
pub trait ArtifactSink {
    fn write(&mut self, doc: &ComparisonDocument, markdown: &str, html: Option<&str>) -> Result<()>;
}

/// Writes `{slug}.md` and optionally `{slug}.html` into a directory
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, doc: &ComparisonDocument, markdown: &str, html: Option<&str>) -> Result<()> {
        fs::write(self.dir.join(format!("{}.md", doc.slug)), markdown)?;
        if let Some(html) = html {
            fs::write(self.dir.join(format!("{}.html", doc.slug)), html)?;
        }
        Ok(())
    }
}

/// Keeps artifacts in memory, keyed by slug
#[derive(Debug, Default)]
pub struct MemorySink {
    pub markdown: BTreeMap<String, String>,
    pub html: BTreeMap<String, String>,
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, doc: &ComparisonDocument, markdown: &str, html: Option<&str>) -> Result<()> {
        self.markdown.insert(doc.slug.clone(), markdown.to_string());
        if let Some(html) = html {
            self.html.insert(doc.slug.clone(), html.to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub slug: String,
    /// Hex SHA-256 of the Markdown artifact
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub slug: String,
    pub error: String,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct BatchReport {
    pub generated: Vec<GeneratedArtifact>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// slug -> sha256, sorted by slug
    pub fn manifest(&self) -> Manifest {
        Manifest {
            artifacts: self
                .generated
                .iter()
                .map(|a| (a.slug.clone(), a.sha256.clone()))
                .collect(),
        }
    }
}

/// Content hashes of a build, written as `manifest.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub artifacts: BTreeMap<String, String>,
}

impl Manifest {
    pub fn to_json(&self) -> String {
        // A map of strings always serializes
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

pub fn sha256_hex(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

/// Synthesize and write every pair, collecting failures instead of
/// stopping at the first one.
pub fn generate(
    catalog: &Catalog,
    pairs: &[Pair],
    site: &SiteMetadata,
    render_html: bool,
    sink: &mut dyn ArtifactSink,
) -> BatchReport {
    let index = catalog.index();
    let mut report = BatchReport::default();

    for pair in pairs {
        let outcome = synthesize(pair, &index, site).and_then(|doc| {
            let markdown = doc.to_markdown();
            let html = render_html.then(|| comparison_page(&doc, site, false));
            sink.write(&doc, &markdown, html.as_deref())?;
            Ok(sha256_hex(&markdown))
        });

        match outcome {
            Ok(sha256) => {
                tracing::debug!(slug = %pair.slug, "Generated comparison");
                report.generated.push(GeneratedArtifact {
                    slug: pair.slug.clone(),
                    sha256,
                });
            }
            Err(e) => {
                tracing::warn!(slug = %pair.slug, error = %e, "Failed to generate comparison");
                report.failures.push(BatchFailure {
                    slug: pair.slug.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        generated = report.generated.len(),
        failed = report.failures.len(),
        "Batch generation finished"
    );
    report
}
