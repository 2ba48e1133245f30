use classictv_model::{Episode, UserRef, WatchLookup};
use tracing::trace;

/// Whether `episode` still belongs in `user`'s playlist.
///
/// Only a readable "played" record for this exact user excludes an episode.
/// Missing, unreadable or partial watch state counts as unwatched, so a data
/// mismatch on the host never erases sections of the generated playlist.
pub fn is_unwatched(episode: &Episode, user: &UserRef) -> bool {
    match episode.watch_state.lookup(&user.id) {
        WatchLookup::Played => false,
        WatchLookup::Unplayed => true,
        WatchLookup::Indeterminate => {
            trace!(
                episode = %episode.id,
                user = %user.name,
                "watch state indeterminate, keeping episode"
            );
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classictv_model::{
        EpisodeID, EpisodeWatchState, SeriesID, UserID, UserPlayState,
    };

    fn user(name: &str) -> UserRef {
        UserRef::new(UserID::new(), name)
    }

    fn episode_with(state: EpisodeWatchState) -> Episode {
        Episode::new(EpisodeID::new(), SeriesID::new()).with_watch_state(state)
    }

    #[test]
    fn played_flag_for_the_user_excludes_the_episode() {
        let alice = user("alice");
        let watched = episode_with(EpisodeWatchState::from_records([
            UserPlayState::new(alice.id, true),
        ]));
        let unwatched = episode_with(EpisodeWatchState::from_records([
            UserPlayState::new(alice.id, false),
        ]));

        assert!(!is_unwatched(&watched, &alice));
        assert!(is_unwatched(&unwatched, &alice));
    }

    #[test]
    fn another_users_progress_does_not_count() {
        let alice = user("alice");
        let bob = user("bob");
        let episode = episode_with(EpisodeWatchState::from_records([
            UserPlayState::new(bob.id, true),
        ]));

        assert!(is_unwatched(&episode, &alice));
        assert!(!is_unwatched(&episode, &bob));
    }

    #[test]
    fn missing_or_unreadable_state_fails_open() {
        let alice = user("alice");
        let cases = [
            EpisodeWatchState::Missing,
            EpisodeWatchState::Unreadable {
                reason: "unexpected shape".into(),
            },
            EpisodeWatchState::Records(vec![]),
            EpisodeWatchState::from_records([UserPlayState {
                user_id: alice.id,
                played: None,
            }]),
        ];

        for state in cases {
            assert!(is_unwatched(&episode_with(state), &alice));
        }
    }
}
