use std::{any::type_name_of_val, fmt, sync::Arc};

use classictv_model::{CatalogItem, Episode, SeriesID, UserRef};
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::Result;
use crate::ports::CatalogStore;

use super::{filter::is_unwatched, ordering::order_episodes};

/// Ordered, filtered episodes keyed by series display name.
///
/// Iteration follows the configured series order. A name produced twice keeps
/// its first position and takes the later series' episodes.
pub type SeriesEpisodeMap = IndexMap<String, Vec<Episode>>;

/// Resolves configured series and gathers their episodes for one run.
#[derive(Clone)]
pub struct SeriesEpisodeCollector<C>
where
    C: CatalogStore + ?Sized,
{
    catalog: Arc<C>,
}

impl<C> fmt::Debug for SeriesEpisodeCollector<C>
where
    C: CatalogStore + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesEpisodeCollector")
            .field("catalog", &type_name_of_val(self.catalog.as_ref()))
            .finish()
    }
}

impl<C> SeriesEpisodeCollector<C>
where
    C: CatalogStore + ?Sized,
{
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Collect episodes for every configured series, in configuration order.
    ///
    /// Unparsable IDs, IDs the catalog cannot resolve and IDs that resolve to
    /// something other than a series are skipped with a warning. When `user`
    /// is given only episodes that user has not watched are kept.
    ///
    /// Fails only when listing the episodes of a resolved series fails.
    pub async fn collect(
        &self,
        series_ids: &[String],
        user: Option<&UserRef>,
    ) -> Result<SeriesEpisodeMap> {
        let mut by_series = SeriesEpisodeMap::new();

        for raw_id in series_ids {
            let id = match SeriesID::parse(raw_id) {
                Ok(id) => id,
                Err(err) => {
                    warn!(series_id = %raw_id, "skipping series: {err}");
                    continue;
                }
            };

            let series = match self.catalog.resolve_by_id(id).await {
                Ok(Some(CatalogItem::Series(series))) => series,
                Ok(Some(other)) => {
                    warn!(
                        series_id = %id,
                        kind = other.kind(),
                        "configured id is not a series, skipping"
                    );
                    continue;
                }
                Ok(None) => {
                    warn!(series_id = %id, "series not found, skipping");
                    continue;
                }
                Err(err) => {
                    warn!(
                        series_id = %id,
                        error = %err,
                        "failed to resolve series, skipping"
                    );
                    continue;
                }
            };

            let episodes =
                order_episodes(self.catalog.episodes_of(&series).await?);
            let total = episodes.len();
            let episodes: Vec<Episode> = match user {
                Some(user) => episodes
                    .into_iter()
                    .filter(|episode| is_unwatched(episode, user))
                    .collect(),
                None => episodes,
            };

            debug!(
                series = %series.name,
                total,
                kept = episodes.len(),
                "collected series episodes"
            );

            if by_series.insert(series.name.clone(), episodes).is_some() {
                warn!(
                    series = %series.name,
                    series_id = %id,
                    "duplicate series name, later series replaces earlier one"
                );
            }
        }

        Ok(by_series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassicTvError;
    use crate::infra::InMemoryCatalog;
    use async_trait::async_trait;
    use classictv_model::{
        EpisodeID, EpisodeWatchState, Series, UserID, UserPlayState,
    };

    fn episode(series: SeriesID, season: u16, number: u16) -> Episode {
        Episode::new(EpisodeID::new(), series).with_position(season, number)
    }

    #[tokio::test]
    async fn follows_configured_order_and_sorts_each_series() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let a = Series::new(SeriesID::new(), "Alpha");
        let b = Series::new(SeriesID::new(), "Bravo");
        let a2 = episode(a.id, 1, 2);
        let a1 = episode(a.id, 1, 1);
        let b1 = episode(b.id, 1, 1);
        catalog
            .insert_series(a.clone(), vec![a2.clone(), a1.clone()])
            .await;
        catalog.insert_series(b.clone(), vec![b1.clone()]).await;

        let collector = SeriesEpisodeCollector::new(catalog);
        let map = collector
            .collect(&[b.id.to_string(), a.id.to_string()], None)
            .await
            .expect("collect");

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Bravo", "Alpha"]);
        assert_eq!(map["Alpha"], vec![a1, a2]);
        assert_eq!(map["Bravo"], vec![b1]);
    }

    #[tokio::test]
    async fn skips_bad_unknown_and_non_series_ids() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let show = Series::new(SeriesID::new(), "Show");
        catalog
            .insert_series(show.clone(), vec![episode(show.id, 1, 1)])
            .await;
        let movie = SeriesID::new();
        catalog
            .insert_item(
                movie.to_uuid(),
                CatalogItem::Other {
                    id: movie.to_uuid(),
                    kind: "movie".into(),
                },
            )
            .await;

        let collector = SeriesEpisodeCollector::new(catalog);
        let map = collector
            .collect(
                &[
                    "definitely-not-a-guid".to_string(),
                    SeriesID::new().to_string(),
                    movie.to_string(),
                    show.id.to_string(),
                ],
                None,
            )
            .await
            .expect("collect");

        assert_eq!(map.len(), 1);
        assert!(map.contains_key("Show"));
    }

    #[tokio::test]
    async fn empty_result_when_nothing_resolves() {
        let collector =
            SeriesEpisodeCollector::new(Arc::new(InMemoryCatalog::new()));
        let map = collector
            .collect(&[SeriesID::new().to_string()], None)
            .await
            .expect("collect");
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn filters_watched_episodes_for_the_given_user() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let user = UserRef::new(UserID::new(), "alice");
        let show = Series::new(SeriesID::new(), "Show");
        let seen = episode(show.id, 1, 1).with_watch_state(
            EpisodeWatchState::from_records([UserPlayState::new(
                user.id, true,
            )]),
        );
        let fresh = episode(show.id, 1, 2);
        catalog
            .insert_series(show.clone(), vec![seen.clone(), fresh.clone()])
            .await;

        let collector = SeriesEpisodeCollector::new(catalog);
        let ids = [show.id.to_string()];

        let filtered = collector.collect(&ids, Some(&user)).await.expect("ok");
        assert_eq!(filtered["Show"], vec![fresh.clone()]);

        let unfiltered = collector.collect(&ids, None).await.expect("ok");
        assert_eq!(unfiltered["Show"], vec![seen, fresh]);
    }

    #[tokio::test]
    async fn duplicate_names_keep_first_slot_with_last_episodes() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let first = Series::new(SeriesID::new(), "Doctor Who");
        let middle = Series::new(SeriesID::new(), "Blake's 7");
        let remake = Series::new(SeriesID::new(), "Doctor Who");
        let old = episode(first.id, 1, 1);
        let mid = episode(middle.id, 1, 1);
        let new = episode(remake.id, 1, 1);
        catalog.insert_series(first.clone(), vec![old]).await;
        catalog.insert_series(middle.clone(), vec![mid]).await;
        catalog.insert_series(remake.clone(), vec![new.clone()]).await;

        let collector = SeriesEpisodeCollector::new(catalog);
        let map = collector
            .collect(
                &[
                    first.id.to_string(),
                    middle.id.to_string(),
                    remake.id.to_string(),
                ],
                None,
            )
            .await
            .expect("collect");

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Doctor Who", "Blake's 7"]);
        assert_eq!(map["Doctor Who"], vec![new]);
    }

    struct FlakyCatalog {
        resolve_fails: bool,
    }

    #[async_trait]
    impl CatalogStore for FlakyCatalog {
        async fn resolve_by_id(
            &self,
            id: SeriesID,
        ) -> Result<Option<CatalogItem>> {
            if self.resolve_fails {
                return Err(ClassicTvError::Catalog("backend offline".into()));
            }
            Ok(Some(CatalogItem::Series(Series::new(id, "Show"))))
        }

        async fn episodes_of(&self, _series: &Series) -> Result<Vec<Episode>> {
            Err(ClassicTvError::Catalog("query timed out".into()))
        }
    }

    #[tokio::test]
    async fn resolution_errors_skip_but_episode_errors_propagate() {
        let ids = [SeriesID::new().to_string()];

        let skipping = SeriesEpisodeCollector::new(Arc::new(FlakyCatalog {
            resolve_fails: true,
        }));
        assert!(skipping.collect(&ids, None).await.expect("ok").is_empty());

        let failing = SeriesEpisodeCollector::new(Arc::new(FlakyCatalog {
            resolve_fails: false,
        }));
        assert!(matches!(
            failing.collect(&ids, None).await,
            Err(ClassicTvError::Catalog(_))
        ));
    }
}
