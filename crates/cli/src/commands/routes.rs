use super::project::Project;
use geo_compare_core::Error;
use geo_compare_generator::routes::{list_routes, resolve_with, route_path};
use geo_compare_generator::synthesis::synthesize;
use std::path::PathBuf;

/// Print every comparison route, one per line
pub async fn list(path: PathBuf) -> anyhow::Result<()> {
    let project = Project::open(&path)?;
    let catalog = project.load_catalog()?;

    for slug in list_routes(&catalog) {
        println!("{}", route_path(&slug));
    }
    Ok(())
}

/// Resolve a slug and print its Markdown document
pub async fn show(path: PathBuf, slug: String) -> anyhow::Result<()> {
    let project = Project::open(&path)?;
    let catalog = project.load_catalog()?;
    let index = catalog.index();

    let pair = match resolve_with(&slug, &index) {
        Ok(pair) => pair,
        Err(Error::NotFound(_)) => anyhow::bail!("Comparison not found: {}", slug),
        Err(e) => return Err(e.into()),
    };

    let doc = synthesize(&pair, &index, &project.config.site)?;
    print!("{}", doc.to_markdown());
    Ok(())
}
