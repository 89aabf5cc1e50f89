//! Engine module housing the recognizer state machine.
//!
//! `core` owns per-engine state, `stats` and `suggestions` derive the
//! bookkeeping and feedback, and `handle` shares one engine across threads.

pub mod core;
pub mod handle;
pub mod stats;
pub mod suggestions;

pub use core::{EngineState, RecognitionEngine, RecognitionResult};
pub use handle::EngineHandle;
pub use stats::{
    PerformanceReport, PerformanceStats, RecentResultSummary, RecognitionHistory, SystemStatus,
};
pub use suggestions::{enhancement_suggestions, quality_score};
