// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod classify;
pub mod collect;
pub mod config;
pub mod metrics;
pub mod stats;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::classify::{classify_titles, AnalysisReport, ClassificationResult};
pub use crate::collect::Post;
pub use crate::config::ClassifierConfig;
