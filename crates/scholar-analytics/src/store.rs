//! Record store: the immutable paper set for one analysis session.

use std::sync::Arc;

use uuid::Uuid;

use crate::analytics::filter;
use crate::error::AnalysisResult;
use crate::models::{FilterCriteria, Paper, parse_papers};

/// Immutable collection of papers.
///
/// Every load gets a fresh `version`, which keys cached analyses. Cloning is
/// cheap: the papers are shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RecordStore {
    version: Uuid,
    papers: Arc<[Paper]>,
}

impl RecordStore {
    /// Create a store owning `papers`.
    #[must_use]
    pub fn new(papers: Vec<Paper>) -> Self {
        Self { version: Uuid::new_v4(), papers: papers.into() }
    }

    /// Create an empty store.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Validate and load a JSON value (an array, or an object with `papers`).
    pub fn from_value(value: &serde_json::Value) -> AnalysisResult<Self> {
        let papers = parse_papers(value)?;
        tracing::debug!(papers = papers.len(), "Loaded record store");
        Ok(Self::new(papers))
    }

    /// Validate and load JSON text.
    pub fn from_json_str(input: &str) -> AnalysisResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Self::from_value(&value)
    }

    /// Identifier of this load.
    #[must_use]
    pub const fn version(&self) -> Uuid {
        self.version
    }

    /// All papers in load order.
    #[must_use]
    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    /// Number of papers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    /// True if no papers are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Papers matching `criteria`, in store order. The store is untouched.
    pub fn filter(&self, criteria: &FilterCriteria) -> AnalysisResult<Vec<Paper>> {
        filter::filter_papers(&self.papers, criteria)
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Paper>> for RecordStore {
    fn from(papers: Vec<Paper>) -> Self {
        Self::new(papers)
    }
}
