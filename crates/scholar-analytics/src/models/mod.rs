//! Data models: paper records, filter criteria and request parameters.
//!
//! Request-facing models use `#[serde(rename_all = "camelCase")]` so the
//! JSON contract matches the presentation layer's naming.

mod criteria;
mod enums;
mod inputs;
mod paper;

pub use criteria::FilterCriteria;
pub use enums::{ExportFormat, ResponseFormat};
pub use inputs::*;
pub use paper::{Paper, PaperId, parse_papers};
