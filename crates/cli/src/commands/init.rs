use super::project::SITE_TOML;
use anyhow::{Context, Result};
use geo_compare_core::config::SITE_TOML_TEMPLATE;
use std::fs;
use std::path::{Path, PathBuf};

/// The bundled 19-platform catalog
const PLATFORMS_JSON: &str = include_str!("../../../../data/platforms.json");
const CATALOG_FILE: &str = "data/platforms.json";

/// Scaffold `site.toml` and the bundled catalog. Existing files are
/// never overwritten.
pub async fn run(path: PathBuf) -> Result<()> {
    println!("Initializing project at: {}", path.display());

    let files = [(SITE_TOML, SITE_TOML_TEMPLATE), (CATALOG_FILE, PLATFORMS_JSON)];

    let existing: Vec<&str> = files
        .iter()
        .filter(|(name, _)| path.join(name).exists())
        .map(|(name, _)| *name)
        .collect();
    if !existing.is_empty() {
        anyhow::bail!(
            "Refusing to overwrite existing files in {}: {}",
            path.display(),
            existing.join(", ")
        );
    }

    for (name, content) in files {
        write_new(&path.join(name), content)?;
        println!("   ✓ Created {}", name);
    }

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── site.toml            ← Site name, base URL, edition year");
    println!("  └── data/");
    println!("      └── platforms.json   ← Platform catalog");

    println!("\nNext steps:");
    println!("  1. Edit site.toml");
    println!("  2. Validate: geo-compare validate {}", path.display());
    println!("  3. Preview: geo-compare preview {}", path.display());

    Ok(())
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Wrote file");
    Ok(())
}
