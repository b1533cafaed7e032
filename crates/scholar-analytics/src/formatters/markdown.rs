//! Markdown output formatting.

use std::fmt::Write as _;

use crate::analytics::network::CollaborationEdge;
use crate::analytics::{
    AnalysisReport, BasicMetrics, CollaborationNetwork, FilterOptions, ImpactRankings,
    TemporalTrends, TopicAnalysis,
};
use crate::models::Paper;

/// Format a list of papers as Markdown, showing at most `limit` of them.
#[must_use]
pub fn format_papers_markdown(papers: &[Paper], limit: usize) -> String {
    if papers.is_empty() {
        return "No papers found.".to_string();
    }

    let mut output = format!("# Papers ({} results)\n\n", papers.len());

    for (i, paper) in papers.iter().take(limit).enumerate() {
        output.push_str(&format_paper_markdown(paper, i + 1));
        output.push_str("\n---\n\n");
    }

    if papers.len() > limit {
        let _ = writeln!(output, "*{} more papers not shown.*", papers.len() - limit);
    }

    output
}

/// Format a single paper as Markdown.
#[must_use]
pub fn format_paper_markdown(paper: &Paper, index: usize) -> String {
    let mut output = String::new();

    let _ = write!(output, "## {}. {}\n\n", index, paper.title);

    if !paper.authors.is_empty() {
        let _ = write!(output, "**Authors**: {}\n\n", paper.author_names());
    }

    let meta = [
        format!("**Year**: {}", paper.year),
        format!("**Citations**: {}", paper.citations),
        format!("**Venue**: {}", paper.venue),
    ];
    let _ = write!(output, "{}\n\n", meta.join(" | "));

    let _ = writeln!(output, "**ID**: {}", paper.id);
    if let Some(url) = &paper.url {
        let _ = writeln!(output, "\n**Link**: [{url}]({url})");
    }

    output
}

/// Format basic citation metrics.
#[must_use]
pub fn format_basic_metrics(metrics: &BasicMetrics) -> String {
    let mut output = String::from("# Citation Metrics\n\n");

    if metrics.total_papers == 0 {
        output.push_str("No papers to analyze.\n");
        return output;
    }

    output.push_str("| Metric | Value |\n|--------|-------|\n");
    let _ = writeln!(output, "| Total papers | {} |", metrics.total_papers);
    let _ = writeln!(output, "| Total citations | {} |", metrics.total_citations);
    let _ = writeln!(output, "| Mean citations | {:.2} |", metrics.mean_citations);
    let _ = writeln!(output, "| Median citations | {:.2} |", metrics.median_citations);
    let _ = writeln!(output, "| Std. deviation | {:.2} |", metrics.std_dev_citations);
    let _ = writeln!(output, "| h-index | {} |", metrics.h_index);
    let _ = writeln!(output, "| Max / min citations | {} / {} |", metrics.max_citations, metrics.min_citations);
    let _ = writeln!(output, "| Papers with citations | {} |", metrics.papers_with_citations);
    let _ = writeln!(output, "| Avg. authors per paper | {:.2} |", metrics.average_authors);
    let _ = writeln!(output, "| Unique venues | {} |", metrics.unique_venues);
    if let Some(range) = metrics.year_range {
        let _ = writeln!(output, "| Years | {}–{} |", range.min, range.max);
    }
    let _ = writeln!(output, "| Papers per year | {:.2} |", metrics.average_papers_per_year);

    output.push_str("\n## Citation Distribution\n\n");
    for bucket in &metrics.citation_distribution {
        let _ = writeln!(output, "- **{}**: {}", bucket.range, bucket.count);
    }

    output
}

/// Format the year-by-year trend table.
#[must_use]
pub fn format_temporal_trends(trends: &TemporalTrends) -> String {
    let mut output = String::from("# Publication Trends\n\n");

    if trends.trends.is_empty() {
        output.push_str("No papers to analyze.\n");
        return output;
    }

    output.push_str("| Year | Papers | Citations | Venues | Authors | Paper growth | Citation growth |\n");
    output.push_str("|------|--------|-----------|--------|---------|--------------|-----------------|\n");
    for t in &trends.trends {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {} | {:+.1}% | {:+.1}% |",
            t.year,
            t.papers,
            t.citations,
            t.venue_count,
            t.author_count,
            t.paper_growth_rate,
            t.citation_growth_rate
        );
    }

    let growth = &trends.growth;
    output.push_str("\n## Growth\n\n");
    let _ = writeln!(output, "- **Average paper growth**: {:.1}%", growth.average_paper_growth_rate);
    let _ = writeln!(output, "- **Average citation growth**: {:.1}%", growth.average_citation_growth_rate);
    if let Some(year) = growth.peak_year {
        let _ = writeln!(output, "- **Peak year**: {year}");
    }
    if let Some(year) = growth.most_cited_year {
        let _ = writeln!(output, "- **Most cited year**: {year}");
    }

    output
}

/// Format network metrics followed by the selected `edges`.
#[must_use]
pub fn format_network(network: &CollaborationNetwork, edges: &[&CollaborationEdge]) -> String {
    let metrics = &network.metrics;
    let mut output = format!(
        "# Collaboration Network\n\n\
         **Authors:** {}\n\
         **Collaborations:** {}\n\
         **Avg. collaborators per author:** {:.2}\n\
         **Largest collaboration:** {} shared papers\n\n",
        metrics.author_count,
        metrics.edge_count,
        metrics.average_collaborators_per_author,
        metrics.largest_collaboration_group
    );

    if !metrics.most_collaborative_authors.is_empty() {
        output.push_str("## Most Collaborative Authors\n\n");
        for (i, rank) in metrics.most_collaborative_authors.iter().enumerate() {
            let _ = writeln!(
                output,
                "{}. **{}** - {} collaborators, {} papers",
                i + 1,
                rank.author,
                rank.collaborators,
                rank.papers
            );
        }
        output.push('\n');
    }

    output.push_str("## Collaborations\n\n");
    if edges.is_empty() {
        output.push_str("*No collaborations found matching the criteria.*\n");
    }
    for edge in edges {
        let _ = writeln!(output, "- {} ↔ {} ({} shared papers)", edge.source, edge.target, edge.weight);
    }

    output
}

/// Format venue and author rankings.
#[must_use]
pub fn format_impact_rankings(rankings: &ImpactRankings) -> String {
    let mut output = String::from("# Impact Rankings\n\n## Venues\n\n");

    if rankings.venues.is_empty() {
        output.push_str("No venues.\n");
    } else {
        output.push_str("| # | Venue | Papers | Citations | Impact factor | Authors |\n");
        output.push_str("|---|-------|--------|-----------|---------------|---------|\n");
        for (i, v) in rankings.venues.iter().enumerate() {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {:.2} | {} |",
                i + 1,
                v.venue,
                v.papers,
                v.citations,
                v.impact_factor,
                v.unique_authors
            );
        }
    }

    output.push_str("\n## Authors\n\n");
    if rankings.authors.is_empty() {
        output.push_str("No authors.\n");
    } else {
        output.push_str("| # | Author | Papers | Citations | h-index | Venues | Avg. citations |\n");
        output.push_str("|---|--------|--------|-----------|---------|--------|----------------|\n");
        for (i, a) in rankings.authors.iter().enumerate() {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} | {:.2} |",
                i + 1,
                a.author,
                a.papers,
                a.citations,
                a.h_index,
                a.venue_count,
                a.average_citations
            );
        }
    }

    output
}

/// Format topic analysis.
#[must_use]
pub fn format_topics(topics: &TopicAnalysis) -> String {
    let mut output = String::from("# Topic Analysis\n\n## Top Words\n\n");

    if topics.top_words.is_empty() {
        output.push_str("No topic words found.\n");
        return output;
    }

    for (i, t) in topics.top_words.iter().enumerate() {
        let _ = writeln!(
            output,
            "{}. **{}** - {} occurrences, {} citations (avg. {:.2})",
            i + 1,
            t.word,
            t.frequency,
            t.citations,
            t.average_impact
        );
    }

    if !topics.word_connections.is_empty() {
        output.push_str("\n## Word Connections\n\n");
        for c in &topics.word_connections {
            let _ = writeln!(output, "- {} + {} ({} titles)", c.source, c.target, c.count);
        }
    }

    output.push_str("\n## Emerging Topics\n\n");
    if topics.emerging_topics.is_empty() {
        output.push_str("*No emerging topics detected.*\n");
    }
    for e in &topics.emerging_topics {
        let _ = writeln!(
            output,
            "- **{}**: {:.1}% of recent papers (was {:.1}%)",
            e.word,
            e.recent_share * 100.0,
            e.prior_share * 100.0
        );
    }

    output
}

/// Format filter options and optional author suggestions.
#[must_use]
pub fn format_filter_options(options: &FilterOptions, suggestions: Option<&[String]>) -> String {
    let mut output = String::from("# Filter Options\n\n");

    let years = match (options.years.first(), options.years.last()) {
        (Some(first), Some(last)) => format!("{first}–{last} ({} distinct)", options.years.len()),
        _ => "none".to_string(),
    };
    let _ = write!(output, "**Years:** {years}\n\n");

    let _ = write!(output, "**Venues ({}):** {}\n\n", options.venues.len(), options.venues.join(", "));
    let _ = writeln!(output, "**Authors:** {}", options.authors.len());

    if let Some(suggestions) = suggestions {
        output.push_str("\n## Author Suggestions\n\n");
        if suggestions.is_empty() {
            output.push_str("*No matching authors.*\n");
        }
        for name in suggestions {
            let _ = writeln!(output, "- {name}");
        }
    }

    output
}

/// Format the full composed report.
#[must_use]
pub fn format_report(report: &AnalysisReport) -> String {
    let edges: Vec<&CollaborationEdge> = report.network.edges.iter().take(20).collect();
    [
        format_basic_metrics(&report.basic),
        format_temporal_trends(&report.temporal),
        format_network(&report.network, &edges),
        format_impact_rankings(&report.impact),
        format_topics(&report.topics),
    ]
    .join("\n---\n\n")
}
