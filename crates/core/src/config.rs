use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "content/comparisons";

/// Starter `site.toml` written by `init`
pub const SITE_TOML_TEMPLATE: &str = r#"# geo-compare project configuration

[site]
name = "Generative Engine"
base_url = "https://www.generative-engine.org"
# Year printed in comparison titles
edition_year = 2025

[catalog]
file = "data/platforms.json"

[build]
output = "content/comparisons"
# Also render an HTML page next to every Markdown artifact
html = true
sitemap = true
"#;

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: RawSite,
    catalog: RawCatalog,
    #[serde(default)]
    build: Option<RawBuild>,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    name: String,
    base_url: String,
    edition_year: u16,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    file: String, // Convert to PathBuf
}

#[derive(Debug, Deserialize)]
struct RawBuild {
    output: Option<String>,
    html: Option<bool>,
    sitemap: Option<bool>,
}

/// Complete project configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteConfig {
    pub site: SiteMetadata,
    /// Catalog file, relative to the project directory
    pub catalog_file: PathBuf,
    pub build: BuildConfig,
}

/// Public identity of the site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMetadata {
    pub name: String,
    /// Absolute URL without a trailing slash
    pub base_url: String,
    pub edition_year: u16,
}

impl SiteMetadata {
    /// Absolute URL for a site path such as `/compare/a-vs-b`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildConfig {
    pub output: PathBuf,
    pub html: bool,
    pub sitemap: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteMetadata {
                name: "Generative Engine".to_string(),
                base_url: "https://www.generative-engine.org".to_string(),
                edition_year: 2025,
            },
            catalog_file: PathBuf::from("data/platforms.json"),
            build: BuildConfig {
                output: PathBuf::from(DEFAULT_OUTPUT_DIR),
                html: true,
                sitemap: true,
            },
        }
    }
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let base_url = validate_base_url(&raw.site.base_url)?;

    if !(2000..=2100).contains(&raw.site.edition_year) {
        return Err(Error::ConfigParse(format!(
            "edition_year {} is out of range (2000-2100)",
            raw.site.edition_year
        )));
    }

    let catalog_file = validate_path(&raw.catalog.file, "catalog.file")?;

    let (output, html, sitemap) = match raw.build {
        Some(build) => (build.output, build.html, build.sitemap),
        None => (None, None, None),
    };
    let output = match output {
        Some(dir) => validate_path(&dir, "build.output")?,
        None => PathBuf::from(DEFAULT_OUTPUT_DIR),
    };

    Ok(SiteConfig {
        site: SiteMetadata {
            name: raw.site.name,
            base_url,
            edition_year: raw.site.edition_year,
        },
        catalog_file,
        build: BuildConfig {
            output,
            html: html.unwrap_or(true),
            sitemap: sitemap.unwrap_or(true),
        },
    })
}

/// Require an absolute http(s) URL and drop trailing slashes
fn validate_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim();
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(Error::ConfigParse(format!(
            "site.base_url must start with http:// or https://: '{}'",
            url
        )));
    }
    let normalized = trimmed.trim_end_matches('/');
    if normalized.ends_with(':') || normalized.ends_with("//") {
        return Err(Error::ConfigParse(format!(
            "site.base_url has no host: '{}'",
            url
        )));
    }
    Ok(normalized.to_string())
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references (`..`) so a
/// project's site.toml can only point inside the project directory.
///
/// ```text
/// validate_path("data/platforms.json", "catalog.file")  → Ok(PathBuf)
/// validate_path("/etc/passwd", "catalog.file")  → Err("Absolute paths not allowed...")
/// validate_path("../shared/out", "build.output")  → Err("Parent directory references...")
/// ```
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    // Ensure path is not empty
    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    let path = Path::new(path_str);

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_default() {
        let config = parse_site_toml_str(SITE_TOML_TEMPLATE).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_parse_minimal_config_uses_build_defaults() {
        let toml = r##"
[site]
name = "Test Site"
base_url = "https://example.com/"
edition_year = 2026

[catalog]
file = "catalog.json"
        "##;

        let config = parse_site_toml_str(toml).unwrap();
        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(config.site.url("/compare"), "https://example.com/compare");
        assert_eq!(config.catalog_file, PathBuf::from("catalog.json"));
        assert_eq!(config.build.output, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert!(config.build.html);
        assert!(config.build.sitemap);
    }

    #[test]
    fn test_parse_build_overrides() {
        let toml = r##"
[site]
name = "Test Site"
base_url = "http://localhost:3000"
edition_year = 2025

[catalog]
file = "data/platforms.json"

[build]
output = "public/compare"
html = false
        "##;

        let config = parse_site_toml_str(toml).unwrap();
        assert_eq!(config.build.output, PathBuf::from("public/compare"));
        assert!(!config.build.html);
        assert!(config.build.sitemap);
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(validate_base_url("example.com").is_err());
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("https://").is_err());
        assert_eq!(
            validate_base_url(" https://example.com// ").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_rejects_out_of_range_year() {
        let toml = r##"
[site]
name = "Test Site"
base_url = "https://example.com"
edition_year = 1999

[catalog]
file = "catalog.json"
        "##;

        let err = parse_site_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("edition_year"));
    }

    #[test]
    fn test_validate_path_rejects_parent_dir() {
        let result = validate_path("../shared/catalog.json", "catalog.file");
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Parent directory references"));
        assert!(message.contains("catalog.file"));

        assert!(validate_path("data/../../secret.json", "catalog.file").is_err());
    }

    #[test]
    fn test_validate_path_rejects_absolute_unix() {
        let result = validate_path("/etc/passwd", "build.output");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Absolute paths not allowed")
        );
    }

    #[test]
    fn test_validate_path_rejects_empty() {
        assert!(validate_path("", "catalog.file").is_err());
        assert!(validate_path("   ", "catalog.file").is_err());
    }

    #[test]
    fn test_parse_config_rejects_traversal_in_output() {
        let toml = r##"
[site]
name = "Test Site"
base_url = "https://example.com"
edition_year = 2025

[catalog]
file = "catalog.json"

[build]
output = "../../var/www"
        "##;

        let result = parse_site_toml_str(toml);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("build.output")
        );
    }

    #[test]
    fn test_missing_section_is_parse_error() {
        let result = parse_site_toml_str("[site]\nname = \"x\"\n");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }
}
