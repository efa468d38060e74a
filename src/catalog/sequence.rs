//! The `Sequence` catalog entity. Sequences created implicitly by a
//! `SERIAL`/`GENERATED ... AS IDENTITY` column are modeled identically to
//! free-standing ones; only `owned_by` distinguishes them, and only for the
//! `ALTER SEQUENCE ... OWNED BY` relationship step.

use super::comments::Commentable;
use super::id::DbObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub schema: String,
    pub name: String,
    pub data_type: String,
    pub start_value: i64,
    pub min_value: i64,
    pub max_value: i64,
    pub increment: i64,
    pub cycle: bool,
    /// `schema.table.column` of the owning column, if any.
    pub owned_by: Option<String>,
    pub comment: Option<String>,
}

impl Sequence {
    pub fn id(&self) -> DbObjectId {
        DbObjectId::Sequence {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }
}

impl Commentable for Sequence {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}
