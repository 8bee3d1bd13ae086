//! Catalog linting and build output auditing.
//!
//! Unlike `Catalog::new`, which stops at the first problem, these checks
//! collect everything they find into one report.

use geo_compare_core::catalog::{check_id, check_lists, duplicate_ids};
use geo_compare_core::pairs::pair_count;
use geo_compare_core::Entity;
use geo_compare_generator::synthesis::vendor_playbook;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Read a catalog file and lint it. Unreadable or malformed JSON is
/// reported as an error rather than returned.
pub fn validate_catalog_file(path: &Path) -> ValidationReport {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return ValidationReport {
                errors: vec![format!("Cannot read {}: {}", path.display(), e)],
                ..Default::default()
            };
        }
    };

    match serde_json::from_str::<Vec<Entity>>(&content) {
        Ok(entities) => validate_entities(&entities),
        Err(e) => ValidationReport {
            errors: vec![format!("Malformed catalog {}: {}", path.display(), e)],
            ..Default::default()
        },
    }
}

pub fn validate_entities(entities: &[Entity]) -> ValidationReport {
    let mut report = ValidationReport::default();

    let duplicates = duplicate_ids(entities);
    if !duplicates.is_empty() {
        report
            .errors
            .push(format!("Duplicate entity ids: {}", duplicates.join(", ")));
    }

    for entity in entities {
        if let Some(reason) = check_id(&entity.id) {
            report.errors.push(reason);
        }
        for reason in check_lists(entity) {
            report.errors.push(format!("{}: {}", entity.id, reason));
        }
        if entity.weaknesses.is_empty() {
            report.warnings.push(format!(
                "{}: no weaknesses listed, a placeholder will be used",
                entity.id
            ));
        }
        if entity.name.trim().is_empty() {
            report.warnings.push(format!("{}: name is empty", entity.id));
        }
    }

    let generic: BTreeSet<&str> = entities
        .iter()
        .map(|e| e.vendor.as_str())
        .filter(|vendor| vendor_playbook(vendor).is_none())
        .collect();
    if !generic.is_empty() {
        report.info.push(format!(
            "Vendors using the generic playbook: {}",
            generic.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }

    report.info.push(format!(
        "{} entities, {} comparisons",
        entities.len(),
        pair_count(entities.len())
    ));

    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validated catalog"
    );
    report
}

/// Compare a build output directory with the slugs that should be in it.
///
/// A missing `{slug}.md` (or `{slug}.html` when `expect_html`) is an
/// error; a `.md` file whose slug is not a current route is a warning.
pub fn audit_output(dir: &Path, slugs: &[String], expect_html: bool) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !dir.is_dir() {
        report
            .errors
            .push(format!("Output directory not found: {}", dir.display()));
        return report;
    }

    let mut markdown = HashSet::new();
    let mut html = HashSet::new();
    for entry in WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        match path.extension().and_then(|e| e.to_str()) {
            Some("md") => {
                markdown.insert(stem.to_string());
            }
            Some("html") => {
                html.insert(stem.to_string());
            }
            _ => {}
        }
    }

    let expected: HashSet<&str> = slugs.iter().map(String::as_str).collect();
    for slug in slugs {
        if !markdown.contains(slug) {
            report.errors.push(format!("Missing {}.md", slug));
        }
        if expect_html && !html.contains(slug) {
            report.errors.push(format!("Missing {}.html", slug));
        }
    }

    let mut orphans: Vec<&String> = markdown
        .iter()
        .filter(|stem| !expected.contains(stem.as_str()))
        .collect();
    orphans.sort();
    for orphan in orphans {
        report
            .warnings
            .push(format!("Orphaned {}.md has no matching route", orphan));
    }

    report.info.push(format!(
        "{} of {} comparisons present",
        slugs.iter().filter(|s| markdown.contains(*s)).count(),
        slugs.len()
    ));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_compare_core::{Level, OptimizationWeights};
    use tempfile::TempDir;

    fn entity(id: &str, vendor: &str) -> Entity {
        Entity {
            id: id.to_string(),
            name: id.to_uppercase(),
            vendor: vendor.to_string(),
            category: "LLM".to_string(),
            strengths: vec!["speed".to_string(), "recall".to_string()],
            weaknesses: vec!["cost".to_string()],
            context_size: "32K tokens".to_string(),
            training_cutoff: "Up to 2024".to_string(),
            pricing: "Free".to_string(),
            features: vec!["search".to_string(), "tools".to_string()],
            best_for: vec!["chat".to_string(), "code".to_string()],
            optimization_weights: OptimizationWeights {
                citations: Level::High,
                statistics: Level::Low,
                structure: Level::High,
                freshness: Level::Medium,
            },
        }
    }

    #[test]
    fn test_clean_catalog_is_valid() {
        let report = validate_entities(&[entity("a", "OpenAI"), entity("b", "Google")]);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        assert!(report.info.contains(&"2 entities, 1 comparisons".to_string()));
    }

    #[test]
    fn test_reports_every_problem_at_once() {
        let mut short = entity("short", "OpenAI");
        short.features.clear();
        short.best_for.truncate(1);
        let mut quiet = entity("quiet", "OpenAI");
        quiet.weaknesses.clear();

        let report = validate_entities(&[
            entity("dup", "OpenAI"),
            entity("dup", "OpenAI"),
            entity("Bad-Id", "OpenAI"),
            short,
            quiet,
        ]);

        assert_eq!(report.errors.len(), 4);
        assert!(report.errors[0].contains("dup"));
        assert!(report.errors.iter().any(|e| e.contains("Bad-Id")));
        assert!(report.errors.iter().any(|e| e.contains("'features'")));
        assert!(report.errors.iter().any(|e| e.contains("'bestFor'")));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("quiet"));
    }

    #[test]
    fn test_generic_playbook_vendors_listed() {
        let report = validate_entities(&[entity("a", "OpenAI"), entity("b", "Acme Labs")]);
        assert!(
            report
                .info
                .iter()
                .any(|i| i == "Vendors using the generic playbook: Acme Labs")
        );
    }

    #[test]
    fn test_validate_catalog_file_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("platforms.json");
        fs::write(&path, "{ not json").unwrap();

        let report = validate_catalog_file(&path);
        assert!(!report.is_valid());
        assert!(report.errors[0].starts_with("Malformed catalog"));

        let missing = validate_catalog_file(&dir.path().join("missing.json"));
        assert!(missing.errors[0].starts_with("Cannot read"));
    }

    #[test]
    fn test_audit_output_missing_and_orphaned() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a-vs-b.md"), "# A vs B\n").unwrap();
        fs::write(dir.path().join("a-vs-b.html"), "<html></html>").unwrap();
        fs::write(dir.path().join("old-vs-b.md"), "# Old\n").unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();

        let slugs = vec!["a-vs-b".to_string(), "a-vs-c".to_string()];
        let report = audit_output(dir.path(), &slugs, true);

        assert_eq!(
            report.errors,
            vec!["Missing a-vs-c.md".to_string(), "Missing a-vs-c.html".to_string()]
        );
        assert_eq!(
            report.warnings,
            vec!["Orphaned old-vs-b.md has no matching route".to_string()]
        );
        assert_eq!(report.info, vec!["1 of 2 comparisons present".to_string()]);
    }

    #[test]
    fn test_audit_output_without_html() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a-vs-b.md"), "# A vs B\n").unwrap();
        let report = audit_output(dir.path(), &["a-vs-b".to_string()], false);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_audit_output_missing_directory() {
        let dir = TempDir::new().unwrap();
        let report = audit_output(&dir.path().join("nope"), &[], false);
        assert!(!report.is_valid());
    }
}
