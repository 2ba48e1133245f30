//! Per-run driver: for every configured user resolve, collect, mix and sync.

pub mod config;
pub mod orchestrator;
pub mod progress;
pub mod report;

pub use config::GenerationConfig;
pub use orchestrator::PlaylistGenerator;
pub use progress::GenerationProgress;
pub use report::{
    GenerationReport, NoOpReason, RunStatus, SkipReason, UserOutcome,
    UserReport,
};
