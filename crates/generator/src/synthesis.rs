//! Comparison document synthesis.
//!
//! A document is a pure function of the two entities, the fixed prose
//! tables below and the site edition year. Prose that depends on an
//! optimization level is looked up by `(axis, band)` rather than chosen
//! by branching, so every entity gets exactly one paragraph per axis.

use crate::routes::{comparisons_for, route_path};
use geo_compare_core::config::SiteMetadata;
use geo_compare_core::{Axis, CatalogIndex, Entity, Level, Pair, Result, capitalize};
use serde::Serialize;

/// Coarse grouping of levels that selects guidance prose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Band {
    /// Critical, Very High
    Aggressive,
    /// High
    Moderate,
    /// Medium, Low
    Light,
}

impl Band {
    pub fn of(level: Level) -> Band {
        match level {
            Level::Critical | Level::VeryHigh => Band::Aggressive,
            Level::High => Band::Moderate,
            Level::Medium | Level::Low => Band::Light,
        }
    }

    fn index(self) -> usize {
        match self {
            Band::Aggressive => 0,
            Band::Moderate => 1,
            Band::Light => 2,
        }
    }
}

fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::Citations => 0,
        Axis::Statistics => 1,
        Axis::Structure => 2,
        Axis::Freshness => 3,
    }
}

/// Guidance paragraphs by axis then band. `{name}` is the entity name.
const GUIDANCE: [[&str; 3]; 4] = [
    // citations
    [
        "Citations are essential for {name}. Include 5-7 authoritative sources with proper formatting. Use academic citations, primary sources, and recent research papers.",
        "{name} values cited content. Include 3-5 authoritative sources, preferably from recognized institutions and peer-reviewed publications.",
        "While {name} doesn't heavily prioritize citations, including 1-2 authoritative sources can still improve content credibility.",
    ],
    // statistics
    [
        "Pack your content with data points, percentages, and quantitative analysis. {name} strongly favors statistically-backed arguments. Aim for 10+ data points per 1000 words.",
        "Include relevant statistics and data to support key points in content aimed at {name}. Target 5-7 statistical references per article.",
        "Basic statistical support is sufficient for {name}. Focus on 2-3 key data points that strengthen your main arguments.",
    ],
    // structure
    [
        "Implement strict hierarchical structure with clear H1-H6 headings, bullet points, numbered lists, and tables. {name} relies heavily on well-structured content for comprehension.",
        "{name} rewards clear organization. Use descriptive H2-H3 headings, short sections, and lists where they aid scanning.",
        "Use clear headings and logical flow. Standard markdown formatting with H2-H3 headers and occasional lists will suffice for {name}.",
    ],
    // freshness
    [
        "{name} strongly prioritizes recent content. Update articles monthly and include current dates, recent events, and trending topics.",
        "Regular updates improve visibility on {name}. Refresh content quarterly and include recent examples.",
        "While not critical for {name}, occasional updates (bi-annually) help maintain relevance.",
    ],
];

/// Guidance paragraph for one axis of one entity
pub fn guidance(entity: &Entity, axis: Axis) -> String {
    let band = Band::of(entity.weight(axis));
    GUIDANCE[axis_index(axis)][band.index()].replace("{name}", &entity.name)
}

/// Vendor-specific playbook lines
const PLAYBOOKS: &[(&str, [&str; 3])] = &[
    (
        "OpenAI",
        [
            "Use markdown formatting conventions and fenced code blocks",
            "Mirror function-calling syntax in technical content",
            "Include conversational question-and-answer passages",
        ],
    ),
    (
        "Google",
        [
            "Connect entities to the knowledge graph with schema.org markup",
            "Include location and temporal context",
            "Optimize for featured snippets and voice search patterns",
        ],
    ),
    (
        "Anthropic",
        [
            "Emphasize safety and ethical considerations",
            "Use clear, unambiguous language with detailed reasoning",
            "Avoid controversial or ambiguous statements",
        ],
    ),
];

const GENERIC_PLAYBOOK: [&str; 3] = [
    "Research platform-specific formatting preferences",
    "Align content with the vendor's ecosystem and core mission",
    "Test and iterate based on measured results",
];

/// Playbook for a vendor, `None` when only the generic one applies
pub fn vendor_playbook(vendor: &str) -> Option<&'static [&'static str; 3]> {
    PLAYBOOKS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(vendor))
        .map(|(_, lines)| lines)
}

/// One axis on which two entities are rated differently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisDelta {
    pub axis: Axis,
    pub from: Level,
    pub to: Level,
}

/// Axes where `to` is rated differently from `from`, in axis order
pub fn gap_analysis(from: &Entity, to: &Entity) -> Vec<AxisDelta> {
    Axis::ALL
        .into_iter()
        .filter_map(|axis| {
            let (a, b) = (from.weight(axis), to.weight(axis));
            (a != b).then_some(AxisDelta {
                axis,
                from: a,
                to: b,
            })
        })
        .collect()
}

/// Axes rated in the aggressive band, in axis order
pub fn ranking_factors(entity: &Entity) -> Vec<Axis> {
    entity
        .optimization_weights
        .iter()
        .filter(|(_, level)| Band::of(*level) == Band::Aggressive)
        .map(|(axis, _)| axis)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Fragment id used by the page renderer
    pub anchor: String,
    pub heading: String,
    /// Markdown body
    pub body: String,
}

/// Synthesized long-form comparison for one pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonDocument {
    pub slug: String,
    pub left_name: String,
    pub right_name: String,
    pub title: String,
    /// Short title used in listings
    pub listing_title: String,
    pub description: String,
    pub sections: Vec<Section>,
    /// Gap deltas from the left entity to the right entity
    pub deltas: Vec<AxisDelta>,
}

impl ComparisonDocument {
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.title);
        for section in &self.sections {
            out.push_str(&format!("## {}\n\n{}\n\n", section.heading, section.body));
        }
        let trimmed_len = out.trim_end().len();
        out.truncate(trimmed_len);
        out.push('\n');
        out
    }

    pub fn section(&self, anchor: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.anchor == anchor)
    }
}

/// Synthesize the document for `pair`. Fails only when one of the pair's
/// ids is absent from the index.
pub fn synthesize(
    pair: &Pair,
    index: &CatalogIndex<'_>,
    site: &SiteMetadata,
) -> Result<ComparisonDocument> {
    let a = index.require(&pair.left)?;
    let b = index.require(&pair.right)?;

    let sections = vec![
        section("summary", "Executive Summary", summary(a, b)),
        section("comparison-table", "Quick Comparison Table", comparison_table(a, b)),
        section(
            &format!("{}-deep-dive", a.id),
            &format!("{} Characteristics", a.name),
            deep_dive(a),
        ),
        section(
            &format!("{}-deep-dive", b.id),
            &format!("{} Characteristics", b.name),
            deep_dive(b),
        ),
        section(
            &format!("{}-guidance", a.id),
            &format!("Optimizing for {}", a.name),
            optimization_guidance(a),
        ),
        section(
            &format!("{}-guidance", b.id),
            &format!("Optimizing for {}", b.name),
            optimization_guidance(b),
        ),
        section("use-cases", "Use Case Comparison", use_cases(a, b)),
        section("playbooks", "Platform-Specific Playbooks", playbooks(a, b)),
        section("pitfalls", "Common Pitfalls to Avoid", pitfalls(a, b)),
        section("migration", "Migration Strategy", migration(a, b)),
        section("conclusion", "Conclusion and Recommendations", conclusion(a, b)),
        section("related", "Related Resources", related(pair, index)),
    ];

    Ok(ComparisonDocument {
        slug: pair.slug.clone(),
        left_name: a.name.clone(),
        right_name: b.name.clone(),
        title: format!(
            "{} vs {}: Complete Optimization Guide for {}",
            a.name, b.name, site.edition_year
        ),
        listing_title: listing_title(a, b),
        description: description(a, b),
        sections,
        deltas: gap_analysis(a, b),
    })
}

/// Short title used on the comparison index
pub fn listing_title(a: &Entity, b: &Entity) -> String {
    format!("{} vs {} Optimization Guide", a.name, b.name)
}

pub fn description(a: &Entity, b: &Entity) -> String {
    format!(
        "Compare optimization strategies for {} and {}. Learn how to maximize visibility across both AI platforms.",
        a.name, b.name
    )
}

fn section(anchor: &str, heading: &str, body: String) -> Section {
    Section {
        anchor: anchor.to_string(),
        heading: heading.to_string(),
        body,
    }
}

fn bullets<'a>(items: impl IntoIterator<Item = &'a String>, fallback: &str) -> String {
    let lines: Vec<String> = items
        .into_iter()
        .map(|item| format!("- {}", capitalize(item)))
        .collect();
    if lines.is_empty() {
        format!("- {}", capitalize(fallback))
    } else {
        lines.join("\n")
    }
}

fn axis_list(axes: &[Axis]) -> String {
    axes.iter()
        .map(Axis::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn summary(a: &Entity, b: &Entity) -> String {
    format!(
        "When optimizing content for AI platforms, choosing between **{a}** and **{b}** requires understanding their differences in architecture, capabilities, and content preferences. This guide provides actionable strategies for maximizing visibility on both platforms.\n\n\
         **Key Takeaway**: {a} excels at {a0} and {a1}, while {b} specializes in {b0} and {b1}. Your optimization strategy should align with these core strengths.",
        a = a.name,
        b = b.name,
        a0 = a.strength(0),
        a1 = a.strength(1),
        b0 = b.strength(0),
        b1 = b.strength(1),
    )
}

fn comparison_table(a: &Entity, b: &Entity) -> String {
    let rows = [
        ("Vendor", a.vendor.clone(), b.vendor.clone()),
        ("Type", a.category.clone(), b.category.clone()),
        ("Context Window", a.context_size.clone(), b.context_size.clone()),
        ("Training Data", a.training_cutoff.clone(), b.training_cutoff.clone()),
        ("Pricing", a.pricing.clone(), b.pricing.clone()),
        (
            "Best For",
            format!("{}, {}", a.use_case(0), a.use_case(1)),
            format!("{}, {}", b.use_case(0), b.use_case(1)),
        ),
    ];

    let mut table = format!(
        "| Feature | {} | {} |\n|---------|------------|------------|",
        table_cell(&a.name),
        table_cell(&b.name)
    );
    for (label, left, right) in rows {
        table.push_str(&format!(
            "\n| **{}** | {} | {} |",
            label,
            table_cell(&left),
            table_cell(&right)
        ));
    }
    for axis in Axis::ALL {
        table.push_str(&format!(
            "\n| **{} Weight** | {} | {} |",
            capitalize(axis.as_str()),
            a.weight(axis),
            b.weight(axis)
        ));
    }
    table
}

/// Keep a catalog string inside one Markdown table cell
fn table_cell(s: &str) -> String {
    s.replace('|', "\\|")
        .replace(['\r', '\n'], " ")
}

fn deep_dive(e: &Entity) -> String {
    let strength_line = |s: &str| {
        format!(
            "- **{}**: Exceptional performance in {}-related tasks",
            capitalize(s),
            s
        )
    };
    let strengths = if e.strengths.is_empty() {
        strength_line(e.strength(0))
    } else {
        e.strengths
            .iter()
            .map(|s| strength_line(s))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "{name} represents {vendor}'s approach to {kind}, featuring a {context} context window and training data up to {horizon}.\n\n\
         **Core Strengths:**\n{strengths}\n\n\
         **Key Features:**\n{features}\n\n\
         **Limitations to Consider:**\n{limitations}",
        name = e.name,
        vendor = e.vendor,
        kind = e.category.to_lowercase(),
        context = e.context_size,
        horizon = e.training_horizon(),
        strengths = strengths,
        features = bullets(&e.features, e.feature(0)),
        limitations = bullets(&e.weaknesses, e.weakness(0)),
    )
}

fn mentions(e: &Entity, needle: &str) -> bool {
    e.features
        .iter()
        .chain(&e.strengths)
        .any(|tag| tag.to_lowercase().contains(needle))
}

/// Leading integer of a context description such as "64K tokens"
fn leading_number(s: &str) -> Option<u32> {
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Unit letter right after the leading number, e.g. `K` in "128K tokens"
fn context_unit(s: &str) -> Option<char> {
    s.trim_start_matches(|c: char| c.is_ascii_digit())
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
}

fn has_million_context(e: &Entity) -> bool {
    leading_number(&e.context_size).is_some() && context_unit(&e.context_size) == Some('M')
}

fn has_small_context(e: &Entity) -> bool {
    context_unit(&e.context_size) == Some('K')
        && leading_number(&e.context_size).is_some_and(|n| n < 100)
}

fn optimization_guidance(e: &Entity) -> String {
    let mut body = format!(
        "Based on {}'s architecture and training, prioritize these optimization factors:",
        e.name
    );
    for (i, axis) in Axis::ALL.into_iter().enumerate() {
        body.push_str(&format!(
            "\n\n### {}. {} (Weight: {})\n\n{}",
            i + 1,
            axis.label(),
            e.weight(axis),
            guidance(e, axis)
        ));
    }

    let factors = ranking_factors(e);
    let factors = if factors.is_empty() {
        "no axis is rated Very High or above".to_string()
    } else {
        axis_list(&factors)
    };
    let length = if has_million_context(e) {
        "extensive documentation-style content (10,000+ words)"
    } else {
        "comprehensive articles of 2,000-5,000 words"
    };
    let media = if mentions(e, "vision") || mentions(e, "multimodal") {
        "include relevant images with detailed alt text"
    } else {
        "text-focused content performs best"
    };
    let cadence = if Band::of(e.weight(Axis::Freshness)) == Band::Aggressive {
        "weekly to bi-weekly"
    } else {
        "monthly to quarterly"
    };

    body.push_str(&format!(
        "\n\n**Ranking Factors**: {}\n\n\
         - **Content Length**: Aim for {}\n\
         - **Media Integration**: {}\n\
         - **Update Frequency**: {}",
        factors,
        length,
        capitalize(media),
        capitalize(cadence)
    ));
    body
}

fn use_cases(a: &Entity, b: &Entity) -> String {
    let a_uses = a
        .best_for
        .iter()
        .map(|u| format!("- Your content focuses on {}", u))
        .collect::<Vec<_>>()
        .join("\n");
    let b_uses = b
        .best_for
        .iter()
        .map(|u| format!("- Your use case involves {}", u))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "### When to Optimize for {a}\n\n\
         Choose {a} as your primary optimization target when:\n{a_uses}\n\
         - Your audience values {a0} and {a1}\n\
         - You need {a_kind} capabilities\n\n\
         ### When to Optimize for {b}\n\n\
         Prioritize {b} optimization when:\n{b_uses}\n\
         - You require {b0} and {b1}\n\
         - Your content benefits from {b_kind} features",
        a = a.name,
        b = b.name,
        a_uses = a_uses,
        b_uses = b_uses,
        a0 = a.strength(0),
        a1 = a.strength(1),
        b0 = b.strength(0),
        b1 = b.strength(1),
        a_kind = a.category.to_lowercase(),
        b_kind = b.category.to_lowercase(),
    )
}

fn playbook(e: &Entity) -> String {
    let lines = vendor_playbook(&e.vendor).unwrap_or(&GENERIC_PLAYBOOK);
    let lines = lines
        .iter()
        .map(|line| format!("- {}", line))
        .collect::<Vec<_>>()
        .join("\n");
    format!("### {} Playbook\n\n{}", e.name, lines)
}

fn playbooks(a: &Entity, b: &Entity) -> String {
    format!(
        "While {} and {} have different optimization requirements, semantic richness, E-E-A-T signals, and matching user intent benefit both.\n\n{}\n\n{}",
        a.name,
        b.name,
        playbook(a),
        playbook(b)
    )
}

fn entity_pitfalls(e: &Entity) -> String {
    let over = if e.weight(Axis::Structure) == Level::Critical {
        "structure"
    } else {
        "optimization signals"
    };
    let context = if has_small_context(e) {
        "avoid overly long content that exceeds limits"
    } else if has_million_context(e) {
        "take advantage of the large window with comprehensive coverage"
    } else {
        "leverage the full context for comprehensive coverage"
    };
    let citations = if Band::of(e.weight(Axis::Citations)) == Band::Aggressive {
        "Poor citation quality drastically reduces visibility"
    } else {
        "Maintain citation standards for credibility"
    };
    let freshness = if Band::of(e.weight(Axis::Freshness)) == Band::Aggressive {
        "Outdated content severely impacts visibility"
    } else {
        "Keep reasonably current to maintain relevance"
    };

    format!(
        "### {name} Optimization Mistakes\n\n\
         1. **Over-optimization**: Don't sacrifice readability for {over}\n\
         2. **Ignoring Context Window**: With {ctx}, {context}\n\
         3. **Weak Citations**: {citations}\n\
         4. **Outdated Information**: {freshness}",
        name = e.name,
        over = over,
        ctx = e.context_size,
        context = context,
        citations = citations,
        freshness = freshness,
    )
}

fn pitfalls(a: &Entity, b: &Entity) -> String {
    format!("{}\n\n{}", entity_pitfalls(a), entity_pitfalls(b))
}

fn transition(from: &Entity, to: &Entity) -> String {
    let deltas = gap_analysis(from, to);
    let gaps = if deltas.is_empty() {
        "No axis differs, existing optimizations carry over unchanged".to_string()
    } else {
        let adjustments = deltas
            .iter()
            .map(|d| format!("{} ({} → {})", d.axis, d.from, d.to))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Adjust {}", adjustments)
    };

    format!(
        "### Transitioning from {from} to {to}\n\n\
         If you're currently optimized for {from} and want to target {to}:\n\n\
         1. **Content Audit**: Review existing content against {to} requirements\n\
         2. **Gap Analysis**: {gaps}\n\
         3. **Gradual Migration**: Update highest-traffic content first\n\
         4. **Testing Phase**: A/B test optimizations before full rollout",
        from = from.name,
        to = to.name,
        gaps = gaps,
    )
}

fn migration(a: &Entity, b: &Entity) -> String {
    format!(
        "{}\n\n{}\n\n\
         ### Dual Optimization Strategy\n\n\
         1. **Core Content**: Create foundational content meeting both platforms' minimum requirements\n\
         2. **Platform Layers**: Add platform-specific optimizations as separate layers\n\
         3. **Unified Analytics**: Track performance across both platforms",
        transition(a, b),
        transition(b, a)
    )
}

fn conclusion(a: &Entity, b: &Entity) -> String {
    format!(
        "When choosing between {a} and {b} for optimization:\n\n\
         **Choose {a} if:**\n\
         - Your primary use case aligns with {a_use}\n\
         - You need {a0} capabilities\n\
         - Your budget accommodates {a_price}\n\
         - You value {a_vendor}'s ecosystem\n\n\
         **Choose {b} if:**\n\
         - Your focus is on {b_use}\n\
         - You require {b0} features\n\
         - Cost considerations favor {b_price}\n\
         - You're invested in {b_vendor}'s platform\n\n\
         **For maximum reach**, implement a dual optimization strategy that leverages the strengths of both platforms while avoiding their respective weaknesses.",
        a = a.name,
        b = b.name,
        a_use = a.use_case(0),
        b_use = b.use_case(0),
        a0 = a.strength(0),
        b0 = b.strength(0),
        a_price = a.pricing,
        b_price = b.pricing,
        a_vendor = a.vendor,
        b_vendor = b.vendor,
    )
}

/// Comparisons sharing a platform with `pair`, at most this many per side
pub const RELATED_PER_PLATFORM: usize = 3;

/// Other comparisons of either platform, left platform first
pub fn related_pairs(pair: &Pair, index: &CatalogIndex<'_>) -> Vec<Pair> {
    let catalog = index.catalog();
    [&pair.left, &pair.right]
        .into_iter()
        .flat_map(|id| {
            comparisons_for(catalog, id)
                .into_iter()
                .filter(|other| other.slug != pair.slug)
                .take(RELATED_PER_PLATFORM)
        })
        .collect()
}

fn related(pair: &Pair, index: &CatalogIndex<'_>) -> String {
    let mut lines: Vec<String> = related_pairs(pair, index)
        .into_iter()
        .filter_map(|other| {
            let left = index.get(&other.left)?;
            let right = index.get(&other.right)?;
            Some(format!(
                "- [{}]({})",
                listing_title(left, right),
                route_path(&other.slug)
            ))
        })
        .collect();
    lines.push("- [All Platform Comparisons](/compare)".to_string());
    lines.join("\n")
}
