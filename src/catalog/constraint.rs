//! The `Constraint` catalog entity: UNIQUE, FOREIGN KEY, CHECK and EXCLUDE
//! constraints. Table-level (PRIMARY KEY) constraints are modeled separately
//! on `Table` itself, since they participate in column ordering and identity
//! rather than the free-standing constraint list.

use super::comments::Commentable;
use super::id::DbObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintType {
    Unique {
        columns: Vec<String>,
    },
    ForeignKey {
        columns: Vec<String>,
        referenced_schema: String,
        referenced_table: String,
        referenced_columns: Vec<String>,
        on_delete: Option<String>,
        on_update: Option<String>,
        deferrable: bool,
        initially_deferred: bool,
    },
    Check {
        expression: String,
    },
    Exclusion {
        elements: Vec<String>,
        operator_classes: Vec<String>,
        operators: Vec<String>,
        index_method: String,
        predicate: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub schema: String,
    pub table: String,
    pub name: String,
    pub constraint_type: ConstraintType,
    pub comment: Option<String>,
    pub depends_on: Vec<DbObjectId>,
}

impl Constraint {
    pub fn id(&self) -> DbObjectId {
        DbObjectId::Constraint {
            schema: self.schema.clone(),
            table: self.table.clone(),
            name: self.name.clone(),
        }
    }
}

impl Commentable for Constraint {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}
