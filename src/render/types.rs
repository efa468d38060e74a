//! SQL rendering for type operations

use crate::catalog::id::DbObjectId;
use crate::diff::operations::TypeOperation;
use crate::render::{RenderedSql, Safety, SqlRenderer, quote_ident};

impl SqlRenderer for TypeOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            TypeOperation::Create {
                schema,
                name,
                kind,
                definition,
            } => vec![RenderedSql {
                sql: match kind.as_str() {
                    "ENUM" => format!(
                        "CREATE TYPE {}.{} AS ENUM {};",
                        quote_ident(schema),
                        quote_ident(name),
                        definition
                    ),
                    "COMPOSITE" => format!(
                        "CREATE TYPE {}.{} AS {};",
                        quote_ident(schema),
                        quote_ident(name),
                        definition
                    ),
                    "RANGE" => format!(
                        "CREATE TYPE {}.{} AS RANGE {}",
                        quote_ident(schema),
                        quote_ident(name),
                        definition
                    ),
                    _ => format!(
                        "CREATE TYPE {}.{} AS {} {}",
                        quote_ident(schema),
                        quote_ident(name),
                        kind,
                        definition
                    ),
                },
                safety: Safety::Safe,
            }],
            TypeOperation::Drop { schema, name } => vec![RenderedSql {
                sql: format!("DROP TYPE {}.{};", quote_ident(schema), quote_ident(name)),
                safety: Safety::Destructive,
            }],
            TypeOperation::Alter {
                schema,
                name,
                action,
                definition,
            } => vec![RenderedSql {
                sql: format!(
                    "ALTER TYPE {}.{} {} {};",
                    quote_ident(schema),
                    quote_ident(name),
                    action,
                    definition
                ),
                safety: Safety::Safe,
            }],
            TypeOperation::Comment(op) => op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            TypeOperation::Create { schema, name, .. }
            | TypeOperation::Drop { schema, name }
            | TypeOperation::Alter { schema, name, .. } => DbObjectId::Type {
                schema: schema.clone(),
                name: name.clone(),
            },
            TypeOperation::Comment(op) => op.db_object_id(),
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, TypeOperation::Drop { .. })
    }
}
