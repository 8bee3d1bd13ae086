use anyhow::{Context, Result};
use geo_compare_core::{Catalog, SiteConfig, parse_site_toml};
use std::path::{Path, PathBuf};

pub const SITE_TOML: &str = "site.toml";

/// A project directory with its parsed `site.toml`
pub struct Project {
    pub root: PathBuf,
    pub config: SiteConfig,
}

impl Project {
    /// Load `site.toml` from `root`, with a hint to run `init` when absent
    pub fn open(root: &Path) -> Result<Self> {
        if !root.exists() {
            anyhow::bail!(
                "Project directory does not exist: {}\nRun 'geo-compare init {}' first",
                root.display(),
                root.display()
            );
        }

        let config_path = root.join(SITE_TOML);
        if !config_path.exists() {
            anyhow::bail!(
                "site.toml not found in {}\nRun 'geo-compare init {}' first",
                root.display(),
                root.display()
            );
        }

        let config = parse_site_toml(&config_path).context("Failed to parse site.toml")?;
        tracing::debug!(path = %config_path.display(), "Loaded site.toml");

        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(&self.config.catalog_file)
    }

    /// Strict catalog load for commands that must not run on partial data
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.catalog_path();
        Catalog::load(&path).with_context(|| format!("Failed to load catalog {}", path.display()))
    }

    /// `--output` wins over `[build].output`, which is relative to the project
    pub fn output_dir(&self, output: Option<PathBuf>) -> PathBuf {
        output.unwrap_or_else(|| self.root.join(&self.config.build.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_compare_core::config::SITE_TOML_TEMPLATE;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_site_toml_hints_init() {
        let dir = TempDir::new().unwrap();
        let err = Project::open(dir.path()).err().unwrap().to_string();
        assert!(err.contains("site.toml not found"));
        assert!(err.contains("geo-compare init"));
    }

    #[test]
    fn test_output_dir_override() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SITE_TOML), SITE_TOML_TEMPLATE).unwrap();
        let project = Project::open(dir.path()).unwrap();

        assert_eq!(
            project.output_dir(None),
            dir.path().join("content/comparisons")
        );
        assert_eq!(
            project.output_dir(Some(PathBuf::from("/tmp/out"))),
            PathBuf::from("/tmp/out")
        );
        assert_eq!(
            project.catalog_path(),
            dir.path().join("data/platforms.json")
        );
    }
}
