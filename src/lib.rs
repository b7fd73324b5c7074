// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod analyzer;
pub mod context;
pub mod detect;
pub mod external;
pub mod intent;
pub mod preprocess;
pub mod report;
pub mod rules;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{aggregate, RiskVerdict};
pub use crate::analyzer::ContentRiskAnalyzer;
pub use crate::context::classify_context;
pub use crate::external::{
    build_provider_from_config, DynProvider, ExternalScore, ExternalSignalProvider,
};
pub use crate::intent::classify_intent;
pub use crate::report::{
    merge_sources, AnalysisReport, AnalysisSource, Category, CategoryScore, CategoryScores,
    ContentType, ContextSignals, IntentSignals, Level, RequestMetadata, RiskLevel,
};
pub use crate::rules::RuleBook;
