use crate::render::html_escape;
use crate::routes::route_path;
use chrono::NaiveDate;
use geo_compare_core::config::SiteMetadata;

/// XML sitemap for the comparison index and every comparison route.
///
/// `lastmod` is supplied by the caller so identical inputs always
/// produce identical output.
pub fn build(routes: &[String], site: &SiteMetadata, lastmod: NaiveDate) -> String {
    let lastmod = lastmod.format("%Y-%m-%d").to_string();

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    xml.push_str(&url_entry(&site.url("/compare"), &lastmod, "weekly", "0.8"));
    for slug in routes {
        xml.push_str(&url_entry(
            &site.url(&route_path(slug)),
            &lastmod,
            "monthly",
            "0.7",
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

fn url_entry(loc: &str, lastmod: &str, changefreq: &str, priority: &str) -> String {
    format!(
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
        html_escape(loc),
        lastmod,
        changefreq,
        priority
    )
}
