//! The `View` catalog entity, covering plain and materialized views.

use super::comments::Commentable;
use super::id::{DbObjectId, DependsOn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewColumn {
    pub name: String,
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub schema: String,
    pub name: String,
    pub definition: String,
    pub materialized: bool,
    pub security_invoker: bool,
    pub security_barrier: bool,
    pub columns: Vec<ViewColumn>,
    /// Indexes on a materialized view; plain views never carry any.
    pub indexes: Vec<DbObjectId>,
    pub comment: Option<String>,
    pub depends_on: Vec<DbObjectId>,
}

impl View {
    pub fn id(&self) -> DbObjectId {
        DbObjectId::View {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }
}

impl DependsOn for View {
    fn id(&self) -> DbObjectId {
        self.id()
    }

    fn depends_on(&self) -> &[DbObjectId] {
        &self.depends_on
    }
}

impl Commentable for View {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}
