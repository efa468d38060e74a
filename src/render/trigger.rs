//! SQL rendering for trigger operations

use crate::catalog::id::DbObjectId;
use crate::diff::operations::TriggerOperation;
use crate::render::{RenderedSql, Safety, SqlRenderer, quote_ident};

fn render_definition(definition: &str) -> String {
    if definition.trim_end().ends_with(';') {
        definition.trim_end().to_string()
    } else {
        format!("{};", definition.trim_end())
    }
}

fn render_drop(schema: &str, table: &str, name: &str) -> String {
    format!(
        "DROP TRIGGER {} ON {}.{};",
        quote_ident(name),
        quote_ident(schema),
        quote_ident(table)
    )
}

impl SqlRenderer for TriggerOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            TriggerOperation::Create { trigger } => vec![RenderedSql {
                sql: render_definition(&trigger.definition),
                safety: Safety::Safe,
            }],
            TriggerOperation::Drop { identifier } => vec![RenderedSql {
                sql: render_drop(&identifier.schema, &identifier.table, &identifier.name),
                safety: Safety::Safe,
            }],
            TriggerOperation::Replace {
                old_trigger,
                new_trigger,
            } => vec![
                RenderedSql {
                    sql: render_drop(
                        &old_trigger.schema,
                        &old_trigger.table_name,
                        &old_trigger.name,
                    ),
                    safety: Safety::Safe,
                },
                RenderedSql {
                    sql: render_definition(&new_trigger.definition),
                    safety: Safety::Safe,
                },
            ],
            TriggerOperation::Comment(op) => op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            TriggerOperation::Create { trigger } => DbObjectId::Trigger {
                schema: trigger.schema.clone(),
                table: trigger.table_name.clone(),
                name: trigger.name.clone(),
            },
            TriggerOperation::Drop { identifier } => DbObjectId::Trigger {
                schema: identifier.schema.clone(),
                table: identifier.table.clone(),
                name: identifier.name.clone(),
            },
            TriggerOperation::Replace { new_trigger, .. } => DbObjectId::Trigger {
                schema: new_trigger.schema.clone(),
                table: new_trigger.table_name.clone(),
                name: new_trigger.name.clone(),
            },
            TriggerOperation::Comment(op) => op.db_object_id(),
        }
    }
}
