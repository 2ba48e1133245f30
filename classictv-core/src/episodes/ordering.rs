use classictv_model::Episode;

/// Put one series' episodes into canonical viewing order.
///
/// Sorted by `(season, episode)` with absent indices counting as 0. The sort
/// is stable: episodes sharing a position keep their retrieval order, so
/// repeated runs over the same catalog produce the same playlist.
pub fn order_episodes(mut episodes: Vec<Episode>) -> Vec<Episode> {
    episodes.sort_by_key(Episode::position);
    episodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use classictv_model::{EpisodeID, SeriesID};

    fn episode(
        series: SeriesID,
        season: Option<u16>,
        number: Option<u16>,
    ) -> Episode {
        let mut episode = Episode::new(EpisodeID::new(), series);
        episode.season_number = season.map(Into::into);
        episode.episode_number = number.map(Into::into);
        episode
    }

    fn ids(episodes: &[Episode]) -> Vec<EpisodeID> {
        episodes.iter().map(|e| e.id).collect()
    }

    #[test]
    fn orders_by_season_then_episode() {
        let series = SeriesID::new();
        let s2e1 = episode(series, Some(2), Some(1));
        let s1e2 = episode(series, Some(1), Some(2));
        let s1e1 = episode(series, Some(1), Some(1));

        let ordered =
            order_episodes(vec![s2e1.clone(), s1e2.clone(), s1e1.clone()]);

        assert_eq!(ids(&ordered), vec![s1e1.id, s1e2.id, s2e1.id]);
    }

    #[test]
    fn missing_indices_sort_before_numbered_ones() {
        let series = SeriesID::new();
        let s1e1 = episode(series, Some(1), Some(1));
        let special = episode(series, None, Some(3));
        let unnumbered = episode(series, Some(1), None);

        let ordered = order_episodes(vec![
            s1e1.clone(),
            special.clone(),
            unnumbered.clone(),
        ]);

        assert_eq!(ids(&ordered), vec![special.id, unnumbered.id, s1e1.id]);
    }

    #[test]
    fn ties_keep_input_order() {
        let series = SeriesID::new();
        let first = episode(series, Some(1), Some(4));
        let second = episode(series, Some(1), Some(4));
        let third = episode(series, None, None);
        let fourth = episode(series, Some(0), Some(0));

        let ordered = order_episodes(vec![
            first.clone(),
            third.clone(),
            second.clone(),
            fourth.clone(),
        ]);

        assert_eq!(
            ids(&ordered),
            vec![third.id, fourth.id, first.id, second.id]
        );
    }

    #[test]
    fn ordering_is_idempotent() {
        let series = SeriesID::new();
        let input: Vec<Episode> = [(3, 1), (1, 2), (1, 2), (0, 9), (2, 0)]
            .into_iter()
            .map(|(s, e)| episode(series, Some(s), Some(e)))
            .collect();

        let once = order_episodes(input);
        let twice = order_episodes(once.clone());

        assert_eq!(once, twice);
    }
}
