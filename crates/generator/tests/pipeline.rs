use geo_compare_core::pairs::pair_count;
use geo_compare_core::{Catalog, Entity, Error, Level, OptimizationWeights, Pair, SiteConfig, enumerate_pairs};
use geo_compare_generator::batch::{MemorySink, generate};
use geo_compare_generator::routes::{list_routes, resolve};
use geo_compare_generator::synthesis::{gap_analysis, synthesize};
use std::collections::HashSet;

const PLATFORMS: &str = include_str!("../../../data/platforms.json");

fn bundled() -> Catalog {
    Catalog::from_json_str(PLATFORMS).unwrap()
}

fn synthetic(n: usize) -> Catalog {
    let entities = (0..n)
        .map(|i| {
            let mut entity = bundled().entities()[i % 19].clone();
            entity.id = format!("platform-{}", i);
            entity
        })
        .collect();
    Catalog::new(entities).unwrap()
}

fn weights(citations: Level, statistics: Level, structure: Level, freshness: Level) -> OptimizationWeights {
    OptimizationWeights {
        citations,
        statistics,
        structure,
        freshness,
    }
}

#[test]
fn test_bundled_catalog_yields_171_pairs() {
    let catalog = bundled();
    assert_eq!(catalog.len(), 19);

    let pairs = enumerate_pairs(&catalog);
    assert_eq!(pairs.len(), 171);
    assert_eq!(list_routes(&catalog).len(), pairs.len());
    assert!(pairs.iter().all(|p| p.left != p.right));
    assert_eq!(pairs[0].slug, "gpt-4o-vs-gpt-4-5");
}

#[test]
fn test_every_route_resolves_to_its_pair() {
    for n in [2, 3, 7, 19] {
        let catalog = synthetic(n);
        let pairs = enumerate_pairs(&catalog);
        let routes = list_routes(&catalog);
        assert_eq!(routes.len(), pairs.len());

        for (slug, pair) in routes.iter().zip(&pairs) {
            assert_eq!(&resolve(slug, &catalog).unwrap(), pair);
        }
    }
}

#[test]
fn test_reversed_slug_is_not_found() {
    let catalog = bundled();
    let err = resolve("gpt-4-5-vs-gpt-4o", &catalog).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_slugs_unique_up_to_twenty() {
    for n in 0..=20 {
        let catalog = synthetic(n);
        let pairs = enumerate_pairs(&catalog);
        assert_eq!(pairs.len(), pair_count(n));

        let slugs: HashSet<_> = pairs.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs.len(), pairs.len(), "slug collision at n={}", n);
    }
}

#[test]
fn test_pipeline_is_deterministic() {
    let site = SiteConfig::default().site;
    let run = || {
        let catalog = bundled();
        let mut sink = MemorySink::default();
        let report = generate(&catalog, &enumerate_pairs(&catalog), &site, true, &mut sink);
        (report.manifest(), sink.markdown, sink.html)
    };

    let (first_manifest, first_md, first_html) = run();
    let (second_manifest, second_md, second_html) = run();
    assert_eq!(first_manifest, second_manifest);
    assert_eq!(first_md, second_md);
    assert_eq!(first_html, second_html);
    assert_eq!(first_md.len(), 171);
}

#[test]
fn test_synthesis_is_total_on_bundled_catalog() {
    let catalog = bundled();
    let index = catalog.index();
    let site = SiteConfig::default().site;

    for pair in enumerate_pairs(&catalog) {
        let doc = synthesize(&pair, &index, &site).unwrap();
        let markdown = doc.to_markdown();
        assert!(!markdown.contains("undefined"), "{}", pair.slug);
        assert_eq!(doc.sections.len(), 12);
    }
}

#[test]
fn test_gap_reports_differing_axes() {
    let catalog = bundled();
    let mut a: Entity = catalog.entities()[0].clone();
    let mut b: Entity = catalog.entities()[1].clone();
    a.optimization_weights = weights(Level::High, Level::Medium, Level::High, Level::Medium);
    b.optimization_weights = weights(Level::High, Level::High, Level::High, Level::Low);

    let deltas = gap_analysis(&a, &b);
    let axes: Vec<_> = deltas.iter().map(|d| d.axis.as_str()).collect();
    assert_eq!(axes, vec!["statistics", "freshness"]);

    let catalog = Catalog::new(vec![a, b]).unwrap();
    let pair = &enumerate_pairs(&catalog)[0];
    let doc = synthesize(pair, &catalog.index(), &SiteConfig::default().site).unwrap();
    assert_eq!(doc.deltas.len(), 2);
}

#[test]
fn test_gap_count_matches_differing_axes() {
    let levels = [Level::Low, Level::Critical];
    let base = bundled().entities()[0].clone();

    for mask in 0u8..16 {
        let pick = |bit: u8| levels[((mask >> bit) & 1) as usize];
        let mut a = base.clone();
        let mut b = base.clone();
        a.optimization_weights = weights(Level::Low, Level::Low, Level::Low, Level::Low);
        b.optimization_weights = weights(pick(0), pick(1), pick(2), pick(3));

        assert_eq!(gap_analysis(&a, &b).len(), mask.count_ones() as usize);
    }
}

#[test]
fn test_batch_survives_removed_entity() {
    let catalog = bundled();
    let mut pairs = enumerate_pairs(&catalog);
    pairs.push(Pair::new("gpt-4o", "removed-model"));

    let mut sink = MemorySink::default();
    let report = generate(&catalog, &pairs, &SiteConfig::default().site, false, &mut sink);

    assert_eq!(report.generated.len(), 171);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].slug, "gpt-4o-vs-removed-model");
    assert_eq!(sink.markdown.len(), 171);
}
