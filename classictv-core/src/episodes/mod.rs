//! Per-series episode selection: canonical ordering, the unwatched filter and
//! the collector that combines both over the configured series.

pub mod collector;
pub mod filter;
pub mod ordering;

pub use collector::{SeriesEpisodeCollector, SeriesEpisodeMap};
pub use filter::is_unwatched;
pub use ordering::order_episodes;
