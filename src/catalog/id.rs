//! Object identity used throughout the differ, orderer, and emitter.
//!
//! Every catalog entity has a stable `DbObjectId` derived from its identity
//! attributes (see the identity rules in the catalog overview). The id is
//! used as the diff key, as the node key in the dependency graphs built by
//! `crate::order`, and as the `path` attached to emitted statements.

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DbObjectId {
    Schema {
        name: String,
    },
    Table {
        schema: String,
        name: String,
    },
    View {
        schema: String,
        name: String,
    },
    Type {
        schema: String,
        name: String,
    },
    Domain {
        schema: String,
        name: String,
    },
    Function {
        schema: String,
        name: String,
        arguments: String,
    },
    Sequence {
        schema: String,
        name: String,
    },
    Index {
        schema: String,
        name: String,
    },
    Constraint {
        schema: String,
        table: String,
        name: String,
    },
    Trigger {
        schema: String,
        table: String,
        name: String,
    },
    Policy {
        schema: String,
        table: String,
        name: String,
    },
    Grant {
        id: String,
    },
    Comment {
        object_id: Box<DbObjectId>,
    },
}

impl DbObjectId {
    /// The schema this object belongs to, if it has one in the ordinary sense.
    pub fn schema(&self) -> Option<&str> {
        match self {
            DbObjectId::Schema { name } => Some(name.as_str()),
            DbObjectId::Table { schema, .. }
            | DbObjectId::View { schema, .. }
            | DbObjectId::Type { schema, .. }
            | DbObjectId::Domain { schema, .. }
            | DbObjectId::Function { schema, .. }
            | DbObjectId::Sequence { schema, .. }
            | DbObjectId::Index { schema, .. }
            | DbObjectId::Constraint { schema, .. }
            | DbObjectId::Trigger { schema, .. }
            | DbObjectId::Policy { schema, .. } => Some(schema.as_str()),
            DbObjectId::Grant { .. } => None,
            DbObjectId::Comment { object_id } => object_id.schema(),
        }
    }

    /// A dotted path used for deduplication and error reporting.
    pub fn path(&self) -> String {
        match self {
            DbObjectId::Schema { name } => name.clone(),
            DbObjectId::Table { schema, name } | DbObjectId::View { schema, name } => {
                format!("{schema}.{name}")
            }
            DbObjectId::Type { schema, name } | DbObjectId::Domain { schema, name } => {
                format!("{schema}.{name}")
            }
            DbObjectId::Function {
                schema,
                name,
                arguments,
            } => format!("{schema}.{name}({arguments})"),
            DbObjectId::Sequence { schema, name } => format!("{schema}.{name}"),
            DbObjectId::Index { schema, name } => format!("{schema}.{name}"),
            DbObjectId::Constraint { schema, table, name }
            | DbObjectId::Trigger { schema, table, name }
            | DbObjectId::Policy { schema, table, name } => {
                format!("{schema}.{table}.{name}")
            }
            DbObjectId::Grant { id } => id.clone(),
            DbObjectId::Comment { object_id } => format!("{}#comment", object_id.path()),
        }
    }
}

/// Implemented by every catalog entity that participates in the dependency
/// graph. `depends_on` lists the objects that must exist before this one can
/// be created (or, symmetrically, that must be dropped after this one).
pub trait DependsOn {
    fn id(&self) -> DbObjectId;
    fn depends_on(&self) -> &[DbObjectId];
}
