use super::comments::Commentable;
use serde::{Deserialize, Serialize};

/// A namespace. The `public` schema is guaranteed to exist in every catalog
/// (see the invariant in the catalog overview); the differ relies on this to
/// never emit `CREATE SCHEMA public` or `DROP SCHEMA public`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
}

impl Commentable for Schema {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}
