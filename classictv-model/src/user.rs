use crate::ids::UserID;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimal view of a host user: identity plus the name shown in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserRef {
    pub id: UserID,
    pub name: String,
}

impl UserRef {
    pub fn new(id: UserID, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
