//! Scholar Analytics
//!
//! A bibliometric analytics engine for collections of academic paper records,
//! served over the Model Context Protocol (MCP), a small HTTP API and a CLI.
//!
//! # Features
//!
//! - **Metrics**: citation statistics, h-index and citation distribution
//! - **Trends**: per-year counts with year-over-year growth
//! - **Networks**: weighted co-authorship graph and collaboration metrics
//! - **Rankings**: venue impact factor and author citation rankings
//! - **Topics**: title word frequency, co-occurrence and emerging topics
//! - **Filtering**: year, citation, author and venue criteria
//! - **Export**: CSV, BibTeX, RIS and JSON
//!
//! # Example
//!
//! ```
//! use scholar_analytics::{AnalysisConfig, Paper, analytics::analyze};
//!
//! let papers = vec![
//!     Paper::new(1, "Graph Algorithms", &["A", "B"], 2020, "X", 10),
//!     Paper::new(2, "Graph Theory", &["B", "C"], 2021, "Y", 5),
//! ];
//! let report = analyze(&papers, &AnalysisConfig::default());
//! assert_eq!(report.basic.h_index, 2);
//! assert_eq!(report.network.edges.len(), 2);
//! ```

pub mod analytics;
pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod formatters;
pub mod models;
pub mod server;
pub mod store;
pub mod tools;

pub use analytics::AnalysisReport;
pub use config::AnalysisConfig;
pub use error::{AnalysisError, ToolError};
pub use models::{FilterCriteria, Paper, PaperId};
pub use store::RecordStore;
