use crate::catalog::id::DbObjectId;

/// Schemas the differ and orderer never treat as first-class catalog
/// members: references into them are not dependency edges, and they never
/// appear in an Added/Dropped list.
pub fn is_system_schema(schema: &str) -> bool {
    matches!(schema, "pg_catalog" | "information_schema" | "pg_toast") || schema.starts_with("pg_temp_")
}

/// Builder used by every catalog constructor to assemble an object's
/// `depends_on` list in a consistent order: the containing schema first,
/// then whatever type/table/function references the object carries.
#[derive(Debug, Default)]
pub struct DependencyBuilder {
    deps: Vec<DbObjectId>,
}

impl DependencyBuilder {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            deps: vec![DbObjectId::Schema { name: schema.into() }],
        }
    }

    pub fn push(&mut self, id: DbObjectId) -> &mut Self {
        if !self.deps.contains(&id) {
            self.deps.push(id);
        }
        self
    }

    /// Record a dependency on a user-defined type, skipping system types
    /// (builtins like `int4` or `text` are not catalog objects here).
    pub fn type_ref(&mut self, schema: &str, name: &str) -> &mut Self {
        if !is_system_schema(schema) {
            self.push(DbObjectId::Type {
                schema: schema.to_string(),
                name: name.to_string(),
            });
        }
        self
    }

    pub fn table_ref(&mut self, schema: &str, name: &str) -> &mut Self {
        self.push(DbObjectId::Table {
            schema: schema.to_string(),
            name: name.to_string(),
        })
    }

    pub fn build(self) -> Vec<DbObjectId> {
        self.deps
    }
}
