//! The `Table` and `Column` catalog entities.
//!
//! Constraints, indexes, triggers and policies that belong to a table are
//! *not* nested inside `Table` here; like the rest of the catalog they live
//! in their own top-level `Vec` on `Catalog`, keyed by `(schema, table,
//! name)`. This mirrors how the differ actually walks the catalog (each kind
//! gets its own Added/Dropped/Modified pass) and keeps `Table` itself cheap
//! to pair and compare.

use super::comments::Commentable;
use super::id::{DbObjectId, DependsOn};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityGeneration {
    Always,
    ByDefault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub position: i32,
    pub data_type: String,
    pub not_null: bool,
    pub default: Option<String>,
    pub max_length: Option<i32>,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
    /// `Some` iff this is an identity column. Mutually exclusive with
    /// `generated` (see the Column invariant).
    pub identity: Option<IdentityGeneration>,
    /// `Some` iff this is a `GENERATED ALWAYS AS (...) STORED` column.
    pub generated: Option<String>,
    pub comment: Option<String>,
    /// Dependencies contributed by this column alone (its type, a
    /// generated-expression function, an owned sequence). Folded into the
    /// table's own `depends_on` by `Table::all_dependencies`.
    pub depends_on: Vec<DbObjectId>,
}

impl Column {
    /// A column is SERIAL iff its default references `nextval(` and its
    /// declared type is one of the integer family.
    pub fn is_serial(&self) -> bool {
        let is_integer = matches!(
            self.data_type.as_str(),
            "smallint" | "integer" | "bigint" | "int2" | "int4" | "int8"
        );
        is_integer
            && self
                .default
                .as_deref()
                .is_some_and(|d| d.contains("nextval("))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub name: String,
    pub columns: Vec<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionStrategy {
    Range,
    List,
    Hash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionKey {
    pub strategy: PartitionStrategy,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeClause {
    pub schema: String,
    pub table: String,
    pub including_all: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub schema: String,
    pub name: String,
    /// Ordered by `Column::position`; position forms a 1..N sequence
    /// (the Table invariant).
    pub columns: Vec<Column>,
    pub primary_key: Option<PrimaryKey>,
    pub comment: Option<String>,
    pub rls_enabled: bool,
    pub rls_forced: bool,
    pub partition: Option<PartitionKey>,
    pub like_clauses: Vec<LikeClause>,

    /// Dependencies intrinsic to the table shell itself (its schema, and any
    /// LIKE-referenced table). Column dependencies are folded in on demand
    /// by `all_dependencies` so callers never have to remember to do it.
    table_dependencies: Vec<DbObjectId>,

    /// Lazily computed, memoized union of `table_dependencies` and every
    /// column's `depends_on`. Not serialized: callers reconstruct it from
    /// the fields above after loading a catalog.
    #[serde(skip)]
    resolved_dependencies: OnceCell<Vec<DbObjectId>>,
}

impl Table {
    pub fn new(
        schema: String,
        name: String,
        columns: Vec<Column>,
        primary_key: Option<PrimaryKey>,
        comment: Option<String>,
        table_dependencies: Vec<DbObjectId>,
    ) -> Self {
        Self {
            schema,
            name,
            columns,
            primary_key,
            comment,
            rls_enabled: false,
            rls_forced: false,
            partition: None,
            like_clauses: Vec::new(),
            table_dependencies,
            resolved_dependencies: OnceCell::new(),
        }
    }

    pub fn id(&self) -> DbObjectId {
        DbObjectId::Table {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }

    fn all_dependencies(&self) -> Vec<DbObjectId> {
        let mut deps = self.table_dependencies.clone();
        for column in &self.columns {
            for dep in &column.depends_on {
                if !deps.contains(dep) {
                    deps.push(dep.clone());
                }
            }
        }
        for like in &self.like_clauses {
            let id = DbObjectId::Table {
                schema: like.schema.clone(),
                name: like.table.clone(),
            };
            if !deps.contains(&id) {
                deps.push(id);
            }
        }
        deps
    }
}

impl DependsOn for Table {
    fn id(&self) -> DbObjectId {
        self.id()
    }

    fn depends_on(&self) -> &[DbObjectId] {
        self.resolved_dependencies
            .get_or_init(|| self.all_dependencies())
    }
}

impl Commentable for Table {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str, data_type: &str, not_null: bool) -> Column {
        Column {
            name: name.into(),
            position: 0,
            data_type: data_type.into(),
            not_null,
            default: None,
            max_length: None,
            precision: None,
            scale: None,
            identity: None,
            generated: None,
            comment: None,
            depends_on: vec![],
        }
    }

    #[test]
    fn serial_detection_requires_integer_type_and_nextval_default() {
        let mut c = col("id", "integer", true);
        c.default = Some("nextval('t_id_seq'::regclass)".into());
        assert!(c.is_serial());

        let mut not_integer = col("id", "text", true);
        not_integer.default = Some("nextval('t_id_seq'::regclass)".into());
        assert!(!not_integer.is_serial());

        let no_default = col("id", "integer", true);
        assert!(!no_default.is_serial());
    }

    #[test]
    fn table_dependencies_fold_in_column_and_like_deps() {
        let mut c = col("owner_id", "integer", true);
        c.depends_on.push(DbObjectId::Table {
            schema: "public".into(),
            name: "owners".into(),
        });
        let mut t = Table::new(
            "public".into(),
            "widgets".into(),
            vec![c],
            None,
            None,
            vec![DbObjectId::Schema { name: "public".into() }],
        );
        t.like_clauses.push(LikeClause {
            schema: "public".into(),
            table: "template".into(),
            including_all: true,
        });
        let deps = t.depends_on().to_vec();
        assert!(deps.contains(&DbObjectId::Table {
            schema: "public".into(),
            name: "owners".into()
        }));
        assert!(deps.contains(&DbObjectId::Table {
            schema: "public".into(),
            name: "template".into()
        }));
    }
}
