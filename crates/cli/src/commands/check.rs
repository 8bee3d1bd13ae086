use super::project::Project;
use super::validate::print_report;
use geo_compare_generator::routes::list_routes;
use geo_compare_validator::audit_output;
use std::path::PathBuf;

/// Audit built artifacts against the routes the catalog defines
pub async fn run(path: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let project = Project::open(&path)?;
    let catalog = project.load_catalog()?;
    let output = project.output_dir(output);

    println!("Checking build output: {}", output.display());

    let routes = list_routes(&catalog);
    let report = audit_output(&output, &routes, project.config.build.html);
    print_report(&report);

    if !report.is_valid() {
        anyhow::bail!(
            "{} problem(s) found\nRun 'geo-compare build {}' to regenerate",
            report.errors.len(),
            path.display()
        );
    }

    println!("\n✓ All {} comparisons present", routes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{build, init};
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_check_fails_before_build_and_passes_after() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        init::run(root.clone()).await.unwrap();

        assert!(run(root.clone(), None).await.is_err());

        build::run(root.clone(), None).await.unwrap();
        run(root.clone(), None).await.unwrap();
    }

    #[tokio::test]
    async fn test_check_detects_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        init::run(root.clone()).await.unwrap();
        let output = root.join("out");
        build::run(root.clone(), Some(output.clone())).await.unwrap();

        fs::remove_file(output.join("gpt-4o-vs-phi-4.md")).unwrap();
        let err = run(root.clone(), Some(output.clone())).await.unwrap_err();
        assert!(err.to_string().contains("1 problem(s) found"));

        // Orphans alone only warn
        build::run(root.clone(), Some(output.clone())).await.unwrap();
        fs::write(output.join("retired-vs-phi-4.md"), "# Retired\n").unwrap();
        run(root, Some(output)).await.unwrap();
    }
}
