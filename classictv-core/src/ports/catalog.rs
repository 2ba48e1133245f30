use async_trait::async_trait;
use classictv_model::{CatalogItem, Episode, Series, SeriesID};

use crate::error::Result;

// Read-only view over the host media catalog
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Resolve an identifier to whatever the catalog holds under it.
    async fn resolve_by_id(&self, id: SeriesID)
    -> Result<Option<CatalogItem>>;

    /// Every episode below `series`, recursively and in no particular order.
    async fn episodes_of(&self, series: &Series) -> Result<Vec<Episode>>;
}
