//! HTML page rendering for comparisons and the comparison index.
//!
//! Pages share one shell so that what the preview server shows is exactly
//! what `build` writes to disk; preview mode only adds the reload script.

use crate::routes::route_path;
use crate::synthesis::{ComparisonDocument, description, listing_title};
use geo_compare_core::config::SiteMetadata;
use geo_compare_core::{Catalog, enumerate_pairs};
use pulldown_cmark::{Event, Options, Parser, html};

/// HTML-escape a string to prevent XSS attacks
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Markdown to HTML with tables enabled. Raw HTML in the source is
/// emitted as escaped text since catalog strings flow into the Markdown.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// One row of the comparison index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub slug: String,
    pub title: String,
    pub description: String,
}

/// Index rows for every pair of the catalog, in enumeration order
pub fn index_entries(catalog: &Catalog) -> Vec<IndexEntry> {
    let index = catalog.index();
    enumerate_pairs(catalog)
        .into_iter()
        .filter_map(|pair| {
            let a = index.get(&pair.left)?;
            let b = index.get(&pair.right)?;
            Some(IndexEntry {
                title: listing_title(a, b),
                description: description(a, b),
                slug: pair.slug,
            })
        })
        .collect()
}

/// Full HTML page for one comparison document
pub fn comparison_page(doc: &ComparisonDocument, site: &SiteMetadata, is_preview: bool) -> String {
    let toc: String = doc
        .sections
        .iter()
        .map(|s| {
            format!(
                r##"<li><a href="#{}">{}</a></li>"##,
                html_escape(&s.anchor),
                html_escape(&s.heading)
            )
        })
        .collect();

    let sections: String = doc
        .sections
        .iter()
        .map(|s| {
            format!(
                r#"<section id="{}">
<h2>{}</h2>
{}</section>
"#,
                html_escape(&s.anchor),
                html_escape(&s.heading),
                markdown_to_html(&s.body)
            )
        })
        .collect();

    let body = format!(
        r#"<nav class="breadcrumbs"><a href="/">Home</a> / <a href="/compare">Compare</a> / {}</nav>
<article>
<h1>{}</h1>
<p class="lead">{}</p>
<div class="toc"><h2>Table of Contents</h2><ul>{}</ul></div>
{}</article>"#,
        html_escape(&doc.listing_title),
        html_escape(&doc.title),
        html_escape(&doc.description),
        toc,
        sections
    );

    page_shell(
        site,
        &doc.title,
        &doc.description,
        &route_path(&doc.slug),
        &body,
        is_preview,
    )
}

/// Listing of every comparison; an empty catalog renders a notice
pub fn index_page(catalog: &Catalog, site: &SiteMetadata, is_preview: bool) -> String {
    listing_page(&index_entries(catalog), catalog.len(), site, is_preview)
}

/// Listing of the given rows only, for builds where some pairs failed
pub fn listing_page(
    entries: &[IndexEntry],
    platforms: usize,
    site: &SiteMetadata,
    is_preview: bool,
) -> String {
    let title = "AI Platform Comparisons";
    let summary = format!(
        "Compare optimization strategies across {} AI platforms in {} head-to-head guides.",
        platforms,
        entries.len()
    );

    let listing = if entries.is_empty() {
        r#"<p class="notice">No comparisons are available right now.</p>"#.to_string()
    } else {
        let items: String = entries
            .iter()
            .map(|e| {
                format!(
                    r#"<li class="card"><a href="{}">{}</a><p>{}</p></li>"#,
                    html_escape(&route_path(&e.slug)),
                    html_escape(&e.title),
                    html_escape(&e.description)
                )
            })
            .collect();
        format!(r#"<ul class="comparisons">{}</ul>"#, items)
    };

    let body = format!(
        r#"<h1>{}</h1>
<p class="lead">{}</p>
{}"#,
        title,
        html_escape(&summary),
        listing
    );

    page_shell(site, title, &summary, "/compare", &body, is_preview)
}

/// Body for unknown comparison routes. Never echoes error internals.
pub fn not_found_page(slug: &str, site: &SiteMetadata) -> String {
    let body = format!(
        r#"<h1>Comparison Not Found</h1>
<p>The requested comparison <code>{}</code> could not be found.</p>
<p><a href="/compare">Browse all comparisons</a></p>"#,
        html_escape(slug)
    );
    page_shell(
        site,
        "Comparison Not Found",
        "The requested comparison could not be found.",
        "/compare",
        &body,
        false,
    )
}

fn page_shell(
    site: &SiteMetadata,
    title: &str,
    description: &str,
    path: &str,
    body: &str,
    is_preview: bool,
) -> String {
    // Hot reload script only in preview mode
    let reload_script = if is_preview {
        r#"<script>
        const eventSource = new EventSource('/_reload');
        eventSource.onmessage = () => location.reload();
        eventSource.onerror = () => eventSource.close();
    </script>"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | {site_name}</title>
    <meta name="description" content="{description}">
    <link rel="canonical" href="{canonical}">
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            color: #e0e0e0;
            background: #111827;
            max-width: 900px;
            margin: 0 auto;
            padding: 2rem;
        }}
        a {{ color: #c084fc; }}
        h1, h2, h3 {{ color: #fff; }}
        .lead {{ font-size: 1.2rem; color: #d1d5db; }}
        .toc, .card {{ background: #1f2937; padding: 1rem 1.5rem; border-radius: 8px; }}
        .comparisons {{ list-style: none; padding: 0; display: grid; gap: 1rem; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border: 1px solid #374151; padding: 0.5rem 1rem; }}
        .notice {{ color: #fbbf24; }}
    </style>
</head>
<body>
{body}
<footer>Generated by geo-compare for {site_name}</footer>
{reload_script}
</body>
</html>
"#,
        title = html_escape(title),
        site_name = html_escape(&site.name),
        description = html_escape(description),
        canonical = html_escape(&site.url(path)),
        body = body,
        reload_script = reload_script,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::synthesize;
    use geo_compare_core::{Entity, Level, OptimizationWeights, Pair, SiteConfig};

    fn entity(id: &str, name: &str) -> Entity {
        Entity {
            id: id.to_string(),
            name: name.to_string(),
            vendor: "Acme".to_string(),
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
                structure: Level::Critical,
                freshness: Level::Medium,
            },
        }
    }

    fn site() -> SiteMetadata {
        SiteConfig::default().site
    }

    #[test]
    fn test_html_escape_basic_characters() {
        assert_eq!(html_escape("Hello World"), "Hello World");
        assert_eq!(html_escape("Test & Test"), "Test &amp; Test");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("'single'"), "&#x27;single&#x27;");
    }

    #[test]
    fn test_html_escape_unicode() {
        assert_eq!(html_escape("€3/1M input"), "€3/1M input");
    }

    #[test]
    fn test_markdown_tables_render() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_markdown_raw_html_is_escaped() {
        let html = markdown_to_html("Hello <img src=x onerror=alert(1)> world");
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img"));
    }

    #[test]
    fn test_comparison_page_escapes_names() {
        let catalog = Catalog::new(vec![
            entity("evil", "<script>alert(1)</script>"),
            entity("good", "Good & Co"),
        ])
        .unwrap();
        let doc = synthesize(&Pair::new("evil", "good"), &catalog.index(), &site()).unwrap();
        let page = comparison_page(&doc, &site(), false);

        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("Good &amp; Co"));
        assert!(page.contains(r#"<section id="summary">"#));
        assert!(page.contains("https://www.generative-engine.org/compare/evil-vs-good"));
        assert!(!page.contains("EventSource"));
    }

    #[test]
    fn test_preview_page_has_reload_script() {
        let catalog = Catalog::new(vec![entity("a", "A"), entity("b", "B")]).unwrap();
        let doc = synthesize(&Pair::new("a", "b"), &catalog.index(), &site()).unwrap();
        assert!(comparison_page(&doc, &site(), true).contains("EventSource('/_reload')"));
    }

    #[test]
    fn test_index_lists_every_pair() {
        let catalog =
            Catalog::new(vec![entity("a", "A"), entity("b", "B"), entity("c", "C")]).unwrap();
        let entries = index_entries(&catalog);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].title, "A vs B Optimization Guide");

        let page = index_page(&catalog, &site(), false);
        assert!(page.contains(r#"href="/compare/b-vs-c""#));
        assert!(page.contains("3 AI platforms in 3 head-to-head guides"));
    }

    #[test]
    fn test_listing_page_only_lists_given_entries() {
        let catalog =
            Catalog::new(vec![entity("a", "A"), entity("b", "B"), entity("c", "C")]).unwrap();
        let entries: Vec<IndexEntry> = index_entries(&catalog)
            .into_iter()
            .filter(|e| e.slug != "a-vs-c")
            .collect();

        let page = listing_page(&entries, catalog.len(), &site(), false);
        assert!(page.contains(r#"href="/compare/a-vs-b""#));
        assert!(!page.contains("/compare/a-vs-c"));
        assert!(page.contains("3 AI platforms in 2 head-to-head guides"));
    }

    #[test]
    fn test_index_page_empty_catalog_notice() {
        let page = index_page(&Catalog::empty(), &site(), false);
        assert!(page.contains("No comparisons are available"));
    }

    #[test]
    fn test_not_found_page_escapes_slug() {
        let page = not_found_page("<b>x</b>", &site());
        assert!(page.contains("Comparison Not Found"));
        assert!(page.contains("&lt;b&gt;x&lt;/b&gt;"));
    }
}
