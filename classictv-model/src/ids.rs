use crate::error::ModelError;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize)
        )]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                $name(Uuid::now_v7())
            }

            /// Parse a host-supplied identifier.
            ///
            /// Accepts every textual UUID form (hyphenated, simple, braced,
            /// urn) after trimming surrounding whitespace.
            pub fn parse(raw: &str) -> Result<Self, ModelError> {
                Uuid::parse_str(raw.trim()).map($name).map_err(|_| {
                    ModelError::InvalidId {
                        kind: $kind,
                        value: raw.to_string(),
                    }
                })
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                $name(uuid)
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Strongly typed ID for series
    SeriesID,
    "series"
);

uuid_id!(
    /// Strongly typed ID for episodes
    EpisodeID,
    "episode"
);

uuid_id!(
    /// Strongly typed ID for users known to the host
    UserID,
    "user"
);

uuid_id!(
    /// Strongly typed ID for persisted playlists
    PlaylistID,
    "playlist"
);
