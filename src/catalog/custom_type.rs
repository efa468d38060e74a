//! The `CustomType` catalog entity: `CREATE TYPE ... AS ENUM` and
//! `CREATE TYPE ... AS (...)` composite types. Domains are modeled
//! separately (see `catalog::domain`) since they diff and render
//! differently from enums and composites.

use super::comments::Commentable;
use super::id::{DbObjectId, DependsOn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    Enum,
    Composite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    /// Postgres's `enumsortorder`, kept around so a future re-sort matches
    /// what the source database actually reports rather than array position.
    pub sort_order: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeAttribute {
    pub name: String,
    pub type_name: String,
    pub type_schema: String,
    /// Unqualified name as Postgres spells it in `pg_type.typname`
    /// (e.g. `int4` rather than `integer`).
    pub raw_type_name: String,
    pub attndims: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomType {
    pub schema: String,
    pub name: String,
    pub kind: TypeKind,
    pub enum_values: Vec<EnumValue>,
    pub composite_attributes: Vec<CompositeAttribute>,
    pub base_type: Option<String>,
    pub comment: Option<String>,
    pub depends_on: Vec<DbObjectId>,
}

impl CustomType {
    pub fn id(&self) -> DbObjectId {
        DbObjectId::Type {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }
}

impl DependsOn for CustomType {
    fn id(&self) -> DbObjectId {
        self.id()
    }

    fn depends_on(&self) -> &[DbObjectId] {
        &self.depends_on
    }
}

impl Commentable for CustomType {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}
