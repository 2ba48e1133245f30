use async_trait::async_trait;
use classictv_model::{UserID, UserRef};

use crate::error::Result;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn all_users(&self) -> Result<Vec<UserRef>>;
    async fn user_by_id(&self, id: UserID) -> Result<Option<UserRef>>;
}
