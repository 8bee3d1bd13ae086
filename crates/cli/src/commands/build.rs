use super::project::Project;
use anyhow::{Context, Result};
use chrono::Local;
use geo_compare_core::enumerate_pairs;
use geo_compare_generator::batch::{DirectorySink, generate};
use geo_compare_generator::render::{index_entries, listing_page};
use geo_compare_generator::sitemap;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Generate every comparison plus the index, sitemap and manifest
pub async fn run(path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let project = Project::open(&path)?;
    let output = project.output_dir(output);
    let site = &project.config.site;

    println!("🔨 Building comparisons...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let catalog = project.load_catalog()?;
    let pairs = enumerate_pairs(&catalog);
    println!("✓ Loaded catalog: {} platforms", catalog.len());
    println!("  Comparisons: {}", pairs.len());
    println!();

    println!("📝 Generating comparison documents...");
    let mut sink = DirectorySink::new(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let report = generate(&catalog, &pairs, site, project.config.build.html, &mut sink);
    println!("   ✓ Generated {} documents", report.generated.len());
    for failure in &report.failures {
        eprintln!("   ⚠ {}: {}", failure.slug, failure.error);
    }

    // Only advertise comparisons that were actually written
    let built: HashSet<&str> = report.generated.iter().map(|a| a.slug.as_str()).collect();
    let routes: Vec<String> = report.generated.iter().map(|a| a.slug.clone()).collect();
    let entries: Vec<_> = index_entries(&catalog)
        .into_iter()
        .filter(|e| built.contains(e.slug.as_str()))
        .collect();

    println!("📄 Generating index.html...");
    fs::write(
        output.join("index.html"),
        listing_page(&entries, catalog.len(), site, false),
    )
    .context("Failed to write index.html")?;
    println!("   ✓ Generated index.html");

    if project.config.build.sitemap {
        println!("🗺  Generating sitemap.xml...");
        let xml = sitemap::build(&routes, site, Local::now().date_naive());
        fs::write(output.join("sitemap.xml"), xml).context("Failed to write sitemap.xml")?;
        println!("   ✓ Generated sitemap.xml");
    }

    fs::write(output.join("manifest.json"), report.manifest().to_json())
        .context("Failed to write manifest.json")?;

    println!();
    println!(
        "Summary: {} succeeded, {} failed",
        report.generated.len(),
        report.failures.len()
    );

    if !report.is_success() {
        tracing::error!(failed = report.failures.len(), "Build incomplete");
        anyhow::bail!("{} comparison(s) failed to generate", report.failures.len());
    }

    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();

    Ok(())
}
