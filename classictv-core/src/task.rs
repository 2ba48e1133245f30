//! Scheduled-task wrapper around [`PlaylistGenerator`].
//!
//! Hosts with a task scheduler register this descriptor and call
//! [`GeneratePlaylistTask::execute`] on each trigger. No recurring schedule
//! is installed by default; runs happen when an operator asks for one.

use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::generation::{
    GenerationConfig, GenerationReport, PlaylistGenerator,
};

/// When a host scheduler should fire the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskTrigger {
    Interval { every: Duration },
    Daily { hour: u8, minute: u8 },
    Startup,
}

/// Static metadata a host shows in its task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskInfo {
    pub name: &'static str,
    pub key: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct GeneratePlaylistTask {
    generator: PlaylistGenerator,
    config: GenerationConfig,
}

impl GeneratePlaylistTask {
    pub const NAME: &'static str = "Generate ClassicTV playlist";
    pub const KEY: &'static str = "ClassicTV_PlaylistGenerator";
    pub const CATEGORY: &'static str = "ClassicTV";
    pub const DESCRIPTION: &'static str = "Builds a playlist of unwatched \
         episodes for each configured user, interleaving the configured \
         series in round-robin order.";

    pub fn info() -> TaskInfo {
        TaskInfo {
            name: Self::NAME,
            key: Self::KEY,
            category: Self::CATEGORY,
            description: Self::DESCRIPTION,
        }
    }

    /// Manual trigger only.
    pub fn default_triggers() -> Vec<TaskTrigger> {
        Vec::new()
    }

    pub fn new(generator: PlaylistGenerator, config: GenerationConfig) -> Self {
        Self { generator, config }
    }

    pub async fn execute(&self, cancel: &CancellationToken) -> GenerationReport {
        info!(task = Self::KEY, "Executing scheduled task");
        self.generator.run(&self.config, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_matches_the_published_task() {
        let info = GeneratePlaylistTask::info();
        assert_eq!(info.name, "Generate ClassicTV playlist");
        assert_eq!(info.key, "ClassicTV_PlaylistGenerator");
        assert_eq!(info.category, "ClassicTV");
        assert!(GeneratePlaylistTask::default_triggers().is_empty());
    }

    #[test]
    fn triggers_serialize_with_a_kind_tag() {
        let json = serde_json::to_value(TaskTrigger::Daily {
            hour: 3,
            minute: 30,
        })
        .expect("serialize");
        assert_eq!(json["kind"], "daily");
        assert_eq!(json["hour"], 3);
    }
}
