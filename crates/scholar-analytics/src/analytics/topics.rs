//! Title-based topic extraction.
//!
//! Tokens are lowercased runs of word characters. Short tokens and stop
//! words are dropped. Word co-occurrence reuses the pairwise technique of
//! the collaboration network, applied to the distinct tokens of a title.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, defaults};
use crate::models::Paper;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").expect("valid regex"));

/// Frequency and impact of one title token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStat {
    /// Lowercased token.
    pub word: String,
    /// Occurrences across all titles.
    pub frequency: usize,
    /// Title of the paper behind each occurrence.
    pub titles: Vec<String>,
    /// Citations summed per occurrence, saturating at `u64::MAX`.
    pub citations: u64,
    /// `citations / frequency`.
    pub average_impact: f64,
}

/// Two tokens that appear in the same title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordConnection {
    /// Lexicographically smaller token.
    pub source: String,
    /// Lexicographically larger token.
    pub target: String,
    /// Titles containing both.
    pub count: usize,
}

/// Occurrences of a token per publication year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicTrend {
    /// Lowercased token.
    pub word: String,
    /// Occurrences per year.
    pub by_year: BTreeMap<i32, usize>,
}

/// A token whose share of papers rose in the most recent years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergingTopic {
    /// Lowercased token.
    pub word: String,
    /// Fraction of papers in the recent window whose title has the token.
    pub recent_share: f64,
    /// Same fraction for the prior window.
    pub prior_share: f64,
    /// `recent_share - prior_share`.
    pub growth: f64,
    /// Papers in the recent window whose title has the token.
    pub recent_papers: usize,
}

/// Topic extraction result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicAnalysis {
    /// Descending frequency, ties by word.
    pub top_words: Vec<TopicStat>,
    /// Co-occurring pairs by descending count, ties by pair.
    pub word_connections: Vec<WordConnection>,
    /// Per-year occurrences of each top word.
    pub temporal_trends: Vec<TopicTrend>,
    /// Words whose recent share beats their prior share.
    pub emerging_topics: Vec<EmergingTopic>,
}

/// Split a title into topic tokens, keeping repeats.
#[must_use]
pub fn tokenize(title: &str, min_len: usize) -> Vec<String> {
    let lowered = title.to_lowercase();
    NON_WORD
        .split(&lowered)
        .filter(|token| token.chars().count() >= min_len)
        .filter(|token| !defaults::STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Distinct tokens of a title, sorted.
fn distinct_tokens(title: &str, min_len: usize) -> Vec<String> {
    let set: BTreeSet<String> = tokenize(title, min_len).into_iter().collect();
    set.into_iter().collect()
}

/// Per-token frequency, titles and citation sums.
#[must_use]
pub fn topic_stats(papers: &[Paper], min_len: usize) -> BTreeMap<String, TopicStat> {
    let mut stats: BTreeMap<String, TopicStat> = BTreeMap::new();
    for paper in papers {
        for word in tokenize(&paper.title, min_len) {
            let stat = stats.entry(word.clone()).or_insert_with(|| TopicStat {
                word,
                frequency: 0,
                titles: Vec::new(),
                citations: 0,
                average_impact: 0.0,
            });
            stat.frequency += 1;
            stat.titles.push(paper.title.clone());
            stat.citations = stat.citations.saturating_add(paper.citations);
        }
    }

    for stat in stats.values_mut() {
        stat.average_impact = stat.citations as f64 / stat.frequency as f64;
    }
    stats
}

/// Titles containing each unordered pair of distinct tokens.
#[must_use]
pub fn word_cooccurrence(papers: &[Paper], min_len: usize) -> BTreeMap<(String, String), usize> {
    let mut pairs: BTreeMap<(String, String), usize> = BTreeMap::new();
    for paper in papers {
        // Sorted and distinct, so (i, j) with i < j is already canonical.
        let tokens = distinct_tokens(&paper.title, min_len);
        for (i, first) in tokens.iter().enumerate() {
            for second in &tokens[i + 1..] {
                *pairs.entry((first.clone(), second.clone())).or_insert(0) += 1;
            }
        }
    }
    pairs
}

/// Token occurrences bucketed by paper year.
#[must_use]
pub fn topic_years(papers: &[Paper], min_len: usize) -> BTreeMap<String, BTreeMap<i32, usize>> {
    let mut years: BTreeMap<String, BTreeMap<i32, usize>> = BTreeMap::new();
    for paper in papers {
        for word in tokenize(&paper.title, min_len) {
            *years.entry(word).or_default().entry(paper.year).or_insert(0) += 1;
        }
    }
    years
}

/// Topics whose share of papers grew from the prior window of years to the
/// most recent one.
///
/// Windows are counted in years that have papers: the last `window` such
/// years are "recent", the up-to-`window` years before them are "prior".
/// With no prior year there is nothing to compare and the result is empty.
#[must_use]
pub fn emerging_topics(papers: &[Paper], window: usize, min_len: usize, limit: usize) -> Vec<EmergingTopic> {
    let mut papers_per_year: BTreeMap<i32, usize> = BTreeMap::new();
    let mut presence: BTreeMap<String, BTreeMap<i32, usize>> = BTreeMap::new();
    for paper in papers {
        *papers_per_year.entry(paper.year).or_insert(0) += 1;
        for word in distinct_tokens(&paper.title, min_len) {
            *presence.entry(word).or_default().entry(paper.year).or_insert(0) += 1;
        }
    }

    let years: Vec<i32> = papers_per_year.keys().copied().collect();
    if window == 0 || years.len() <= window {
        return Vec::new();
    }
    let split = years.len() - window;
    let recent: &[i32] = &years[split..];
    let prior: &[i32] = &years[split.saturating_sub(window)..split];

    let total = |years: &[i32]| years.iter().map(|y| papers_per_year[y]).sum::<usize>();
    let recent_total = total(recent);
    let prior_total = total(prior);

    let mut emerging: Vec<EmergingTopic> = presence
        .into_iter()
        .filter_map(|(word, by_year)| {
            let count = |years: &[i32]| years.iter().filter_map(|y| by_year.get(y)).sum::<usize>();
            let recent_papers = count(recent);
            if recent_papers == 0 {
                return None;
            }
            let recent_share = recent_papers as f64 / recent_total as f64;
            let prior_share = count(prior) as f64 / prior_total as f64;
            (recent_share > prior_share).then(|| EmergingTopic {
                word,
                recent_share,
                prior_share,
                growth: recent_share - prior_share,
                recent_papers,
            })
        })
        .collect();

    emerging.sort_by(|a, b| b.growth.total_cmp(&a.growth).then_with(|| a.word.cmp(&b.word)));
    emerging.truncate(limit);
    emerging
}

/// Full topic analysis: ranking, co-occurrence among top words, per-year
/// trends of top words and emerging topics.
#[must_use]
pub fn topic_analysis(papers: &[Paper], config: &AnalysisConfig) -> TopicAnalysis {
    let min_len = config.min_token_len;

    let mut top_words: Vec<TopicStat> = topic_stats(papers, min_len).into_values().collect();
    top_words.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.word.cmp(&b.word)));
    top_words.truncate(config.top_topics);

    let top: HashSet<&str> = top_words.iter().map(|t| t.word.as_str()).collect();

    let mut word_connections: Vec<WordConnection> = word_cooccurrence(papers, min_len)
        .into_iter()
        .filter(|((a, b), _)| top.contains(a.as_str()) && top.contains(b.as_str()))
        .map(|((source, target), count)| WordConnection { source, target, count })
        .collect();
    word_connections.sort_by(|a, b| b.count.cmp(&a.count));
    word_connections.truncate(config.max_word_connections);

    let mut years = topic_years(papers, min_len);
    let temporal_trends = top_words
        .iter()
        .map(|t| TopicTrend { word: t.word.clone(), by_year: years.remove(&t.word).unwrap_or_default() })
        .collect();

    let emerging_topics =
        emerging_topics(papers, config.emerging_window, min_len, config.emerging_limit);

    TopicAnalysis { top_words, word_connections, temporal_trends, emerging_topics }
}
