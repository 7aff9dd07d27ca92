use serde::{Deserialize, Serialize};

/// Caller-supplied partial business identity. Absent fields deserialize to
/// empty strings, so a bare `/search?id=...` request is a valid query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub town: String,
}

/// One resolved business record.
///
/// Created by the business resolver with `phone: None`; the search
/// orchestrator attaches the phone (or leaves it absent) exactly once, and
/// the record is immutable after that. `phone` serializes as `null` when
/// the directory lookup produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub street: String,
    pub town: String,
    pub phone: Option<String>,
}
