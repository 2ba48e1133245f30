/// Progress of a generation run, published after each user is attempted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationProgress {
    pub completed: usize,
    pub total: usize,
}

impl GenerationProgress {
    /// Completion in percent, 0.0 to 100.0. An empty run counts as done.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed as f64 * 100.0 / self.total as f64
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_tracks_completed_users() {
        let progress = GenerationProgress {
            completed: 1,
            total: 4,
        };
        assert_eq!(progress.percent(), 25.0);
        assert!(!progress.is_finished());
        assert_eq!(GenerationProgress::default().percent(), 100.0);
    }
}
