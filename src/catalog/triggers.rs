//! The `Trigger` catalog entity. Triggers are compared structurally by
//! their full `CREATE TRIGGER` definition string rather than by individual
//! fields, since Postgres exposes no `ALTER TRIGGER` that can change timing,
//! events or the function it calls; any change is a drop and recreate.

use super::comments::Commentable;
use super::id::DbObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub schema: String,
    pub table_name: String,
    pub name: String,
    pub function_schema: String,
    pub function_name: String,
    pub function_args: String,
    pub comment: Option<String>,
    pub depends_on: Vec<DbObjectId>,
    /// The full `CREATE TRIGGER ...` statement as reported by the source
    /// catalog; this is what actually gets compared and emitted.
    pub definition: String,
}

impl Trigger {
    pub fn id(&self) -> DbObjectId {
        DbObjectId::Trigger {
            schema: self.schema.clone(),
            table: self.table_name.clone(),
            name: self.name.clone(),
        }
    }
}

impl Commentable for Trigger {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}
