use std::sync::Arc;

use classictv_model::{UserID, UserRef};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::episodes::SeriesEpisodeCollector;
use crate::error::Result;
use crate::mix::{MixedPlaylist, RoundRobinMixer};
use crate::playlist::{PlaylistSync, SyncOutcome};
use crate::ports::{CatalogStore, PlaylistStore, UserDirectory};

use super::config::GenerationConfig;
use super::progress::GenerationProgress;
use super::report::{
    GenerationReport, NoOpReason, RunStatus, SkipReason, UserOutcome,
    UserReport,
};

/// Builds and syncs one playlist per configured user.
///
/// Users are processed strictly one after another. Whatever goes wrong for
/// one user is recorded in that user's [`UserReport`] and never stops the
/// remaining users.
pub struct PlaylistGenerator {
    users: Arc<dyn UserDirectory>,
    collector: SeriesEpisodeCollector<dyn CatalogStore>,
    sync: PlaylistSync<dyn PlaylistStore>,
    progress: Option<watch::Sender<GenerationProgress>>,
}

impl std::fmt::Debug for PlaylistGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistGenerator")
            .field("collector", &self.collector)
            .field("sync", &self.sync)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl PlaylistGenerator {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        users: Arc<dyn UserDirectory>,
        playlists: Arc<dyn PlaylistStore>,
    ) -> Self {
        Self {
            users,
            collector: SeriesEpisodeCollector::new(catalog),
            sync: PlaylistSync::new(playlists),
            progress: None,
        }
    }

    /// Publish a [`GenerationProgress`] after every attempted user.
    pub fn with_progress(
        mut self,
        progress: watch::Sender<GenerationProgress>,
    ) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Run one generation pass over `config`.
    ///
    /// Returns a no-op report when no series or no users are configured.
    /// Otherwise every configured user appears exactly once in the report,
    /// in configuration order. `cancel` is only checked between users;
    /// users not reached before cancellation are reported as skipped.
    pub async fn run(
        &self,
        config: &GenerationConfig,
        cancel: &CancellationToken,
    ) -> GenerationReport {
        if config.series_ids.is_empty() {
            warn!("No series configured, nothing to generate");
            return GenerationReport::no_op(NoOpReason::NoSeriesConfigured);
        }
        if config.user_ids.is_empty() {
            warn!("No users configured, nothing to generate");
            return GenerationReport::no_op(NoOpReason::NoUsersConfigured);
        }

        let total = config.user_ids.len();
        info!(
            series = config.series_ids.len(),
            users = total,
            max_episodes = config.max_episodes,
            "Starting ClassicTV playlist generation"
        );

        let mut users = Vec::with_capacity(total);
        for (index, configured_id) in config.user_ids.iter().enumerate() {
            let outcome = if cancel.is_cancelled() {
                debug!(user_id = %configured_id, "run cancelled, skipping");
                UserOutcome::skipped(SkipReason::Cancelled)
            } else {
                self.run_for_user(configured_id, config).await
            };

            users.push(UserReport {
                configured_id: configured_id.clone(),
                outcome,
            });
            self.publish(GenerationProgress {
                completed: index + 1,
                total,
            });
        }

        let report = GenerationReport {
            status: RunStatus::Completed,
            users,
        };
        info!(
            synced = report.synced(),
            skipped = report.skipped(),
            failed = report.failed(),
            cancelled = report.was_cancelled(),
            "ClassicTV playlist generation finished"
        );
        report
    }

    /// Collect and mix the playlist `user` would get, without writing it.
    pub async fn plan_for_user(
        &self,
        user: &UserRef,
        config: &GenerationConfig,
    ) -> Result<MixedPlaylist> {
        let by_series =
            self.collector.collect(&config.series_ids, Some(user)).await?;
        for (series, episodes) in &by_series {
            debug!(
                user = %user.name,
                series = %series,
                unwatched = episodes.len(),
                "unwatched episodes"
            );
        }
        Ok(RoundRobinMixer::new(config.max_episodes).mix(&by_series))
    }

    /// Look up a configured user identifier in the user directory.
    ///
    /// `Ok(Err(reason))` means the identifier was skipped rather than failed.
    pub async fn resolve_user(
        &self,
        configured_id: &str,
    ) -> Result<std::result::Result<UserRef, SkipReason>> {
        let id = match UserID::parse(configured_id) {
            Ok(id) => id,
            Err(err) => {
                warn!(user_id = %configured_id, "skipping user: {err}");
                return Ok(Err(SkipReason::InvalidUserId));
            }
        };
        match self.users.user_by_id(id).await? {
            Some(user) => Ok(Ok(user)),
            None => {
                warn!(user_id = %id, "user not found, skipping");
                Ok(Err(SkipReason::UserNotFound))
            }
        }
    }

    async fn run_for_user(
        &self,
        configured_id: &str,
        config: &GenerationConfig,
    ) -> UserOutcome {
        match self.try_run_for_user(configured_id, config).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(
                    user_id = %configured_id,
                    error = %err,
                    "error processing user"
                );
                UserOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    async fn try_run_for_user(
        &self,
        configured_id: &str,
        config: &GenerationConfig,
    ) -> Result<UserOutcome> {
        let user = match self.resolve_user(configured_id).await? {
            Ok(user) => user,
            Err(reason) => return Ok(UserOutcome::skipped(reason)),
        };
        info!(user = %user.name, user_id = %user.id, "Processing user");

        let mixed = self.plan_for_user(&user, config).await?;
        info!(
            user = %user.name,
            episodes = mixed.len(),
            "Mixed playlist ready"
        );

        let name = config.naming.playlist_name(&user);
        match self.sync.sync(&user, &name, mixed.item_ids()).await? {
            SyncOutcome::Skipped => {
                info!(user = %user.name, "No unwatched episodes for user");
                Ok(UserOutcome::skipped(SkipReason::NoUnwatchedEpisodes))
            }
            SyncOutcome::Created { playlist, replaced } => {
                Ok(UserOutcome::Synced {
                    user,
                    playlist_name: playlist.name,
                    playlist_id: playlist.id,
                    episodes: playlist.items.len(),
                    replaced: replaced.len(),
                })
            }
        }
    }

    fn publish(&self, progress: GenerationProgress) {
        if let Some(sender) = &self.progress {
            // No receivers left is fine; progress is advisory.
            let _ = sender.send(progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        InMemoryCatalog, InMemoryPlaylistStore, InMemoryUserDirectory,
    };
    use classictv_model::{Episode, EpisodeID, Series, SeriesID};

    struct Fixture {
        generator: PlaylistGenerator,
        store: Arc<InMemoryPlaylistStore>,
        series: Series,
        user: UserRef,
    }

    async fn fixture() -> Fixture {
        let catalog = Arc::new(InMemoryCatalog::new());
        let series = Series::new(SeriesID::new(), "The Avengers");
        let episodes = (1..=3)
            .map(|n| {
                Episode::new(EpisodeID::new(), series.id).with_position(1, n)
            })
            .collect();
        catalog.insert_series(series.clone(), episodes).await;
        let user = UserRef::new(UserID::new(), "emma");
        let users = Arc::new(InMemoryUserDirectory::new([user.clone()]));
        let store = Arc::new(InMemoryPlaylistStore::new());
        Fixture {
            generator: PlaylistGenerator::new(catalog, users, store.clone()),
            store,
            series,
            user,
        }
    }

    #[tokio::test]
    async fn empty_series_is_a_no_op() {
        let fx = fixture().await;
        let config = GenerationConfig::new(
            Vec::<String>::new(),
            [fx.user.id.to_string()],
        );

        let report =
            fx.generator.run(&config, &CancellationToken::new()).await;

        assert_eq!(
            report.status,
            RunStatus::NoOp(NoOpReason::NoSeriesConfigured)
        );
        assert!(report.users.is_empty());
        assert_eq!(fx.store.calls().lists, 0);
    }

    #[tokio::test]
    async fn bad_and_unknown_users_are_skipped() {
        let fx = fixture().await;
        let stranger = UserID::new().to_string();
        let config = GenerationConfig::new(
            [fx.series.id.to_string()],
            ["not-a-user".to_string(), stranger.clone()],
        );

        let report =
            fx.generator.run(&config, &CancellationToken::new()).await;

        assert_eq!(
            report.outcome_for("not-a-user"),
            Some(&UserOutcome::skipped(SkipReason::InvalidUserId))
        );
        assert_eq!(
            report.outcome_for(&stranger),
            Some(&UserOutcome::skipped(SkipReason::UserNotFound))
        );
        assert_eq!(fx.store.calls().writes(), 0);
    }

    #[tokio::test]
    async fn plan_does_not_touch_the_store() {
        let fx = fixture().await;
        let config = GenerationConfig::new(
            [fx.series.id.to_string()],
            [fx.user.id.to_string()],
        )
        .with_max_episodes(2);

        let plan = fx
            .generator
            .plan_for_user(&fx.user, &config)
            .await
            .expect("plan");

        assert_eq!(plan.len(), 2);
        assert_eq!(fx.store.calls(), Default::default());
    }

    #[tokio::test]
    async fn progress_reaches_the_total() {
        let fx = fixture().await;
        let (tx, rx) = watch::channel(GenerationProgress::default());
        let generator = fx.generator.with_progress(tx);
        let config = GenerationConfig::new(
            [fx.series.id.to_string()],
            [fx.user.id.to_string(), "junk".to_string()],
        );

        generator.run(&config, &CancellationToken::new()).await;

        let last = *rx.borrow();
        assert_eq!(
            last,
            GenerationProgress {
                completed: 2,
                total: 2
            }
        );
        assert!(last.is_finished());
    }
}
