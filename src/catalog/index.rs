//! The `Index` catalog entity, covering plain and expression indexes across
//! every access method Postgres ships.

use super::comments::Commentable;
use super::id::{DbObjectId, DependsOn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexType {
    Btree,
    Hash,
    Gist,
    Gin,
    Spgist,
    Brin,
    Custom(String),
}

impl IndexType {
    pub fn from_string(s: &str) -> Self {
        match s {
            "btree" => IndexType::Btree,
            "hash" => IndexType::Hash,
            "gist" => IndexType::Gist,
            "gin" => IndexType::Gin,
            "spgist" => IndexType::Spgist,
            "brin" => IndexType::Brin,
            other => IndexType::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for IndexType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IndexType::Btree => "btree",
            IndexType::Hash => "hash",
            IndexType::Gist => "gist",
            IndexType::Gin => "gin",
            IndexType::Spgist => "spgist",
            IndexType::Brin => "brin",
            IndexType::Custom(name) => name.as_str(),
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumn {
    /// A column name or, for expression indexes, the raw expression text.
    pub expression: String,
    pub collation: Option<String>,
    pub opclass: Option<String>,
    pub ordering: Option<String>,
    pub nulls_ordering: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub schema: String,
    pub name: String,
    pub table_schema: String,
    pub table_name: String,
    pub index_type: IndexType,
    pub is_unique: bool,
    pub is_clustered: bool,
    pub is_valid: bool,
    pub columns: Vec<IndexColumn>,
    pub include_columns: Vec<String>,
    pub predicate: Option<String>,
    pub tablespace: Option<String>,
    pub storage_parameters: Vec<(String, String)>,
    pub comment: Option<String>,
    pub depends_on: Vec<DbObjectId>,
}

impl Index {
    pub fn id(&self) -> DbObjectId {
        DbObjectId::Index {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }
}

impl DependsOn for Index {
    fn id(&self) -> DbObjectId {
        self.id()
    }

    fn depends_on(&self) -> &[DbObjectId] {
        &self.depends_on
    }
}

impl Commentable for Index {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}
