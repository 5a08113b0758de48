use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-assigned identifier. The wire format is inconsistent across
/// resources (SQL integer ids, string admission numbers), so both are
/// accepted; the client never generates one itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Str(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(n) => write!(f, "{}", n),
            EntityId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Int(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Str(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::Str(s)
    }
}

/// One persisted record type, with the metadata every screen otherwise
/// redeclares ad hoc: its collection endpoint, the string fields the
/// search box matches against, and the categorical fields exact-match
/// filters can key on.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path relative to the base URL, e.g. `/api/students`.
    const ENDPOINT: &'static str;

    fn id(&self) -> EntityId;

    /// String fields considered by free-text search.
    fn search_text(&self) -> Vec<&str>;

    /// Categorical field lookup for exact-match filters. `None` when the
    /// entity has no such field.
    fn facet(&self, key: &str) -> Option<String> {
        let _ = key;
        None
    }
}
