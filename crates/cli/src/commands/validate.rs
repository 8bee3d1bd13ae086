use super::project::Project;
use geo_compare_validator::{ValidationReport, validate_catalog_file};
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating project at: {}", path.display());

    let project = Project::open(&path)?;
    println!("✓ site.toml valid");
    println!("  Site: {} ({})", project.config.site.name, project.config.site.base_url);

    let catalog_path = project.catalog_path();
    println!("\nCatalog: {}", catalog_path.display());
    let report = validate_catalog_file(&catalog_path);
    print_report(&report);

    if !report.is_valid() {
        anyhow::bail!("Catalog has {} error(s)", report.errors.len());
    }

    println!("\n✓ Catalog valid");
    Ok(())
}

pub fn print_report(report: &ValidationReport) {
    for error in &report.errors {
        println!("  ✗ {}", error);
    }
    for warning in &report.warnings {
        println!("  ⚠ {}", warning);
    }
    for info in &report.info {
        println!("  • {}", info);
    }
}
