//! SQL rendering for function operations

use crate::catalog::id::DbObjectId;
use crate::diff::operations::FunctionOperation;
use crate::render::{RenderedSql, Safety, SqlRenderer, quote_ident};

impl SqlRenderer for FunctionOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            FunctionOperation::Create {
                schema,
                name,
                kind,
                parameters,
                returns,
                attributes,
                definition,
                ..
            }
            | FunctionOperation::Replace {
                schema,
                name,
                kind,
                parameters,
                returns,
                attributes,
                definition,
                ..
            } => vec![RenderedSql {
                sql: render_create_or_replace(
                    kind, schema, name, parameters, returns, attributes, definition,
                ),
                safety: Safety::Safe,
            }],
            FunctionOperation::Drop {
                schema,
                name,
                arguments: _,
                kind,
                parameter_types,
            } => vec![RenderedSql {
                sql: format!(
                    "DROP {} {}.{}({});",
                    kind,
                    quote_ident(schema),
                    quote_ident(name),
                    parameter_types
                ),
                safety: Safety::Destructive,
            }],
            FunctionOperation::Comment(op) => op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            FunctionOperation::Create {
                schema,
                name,
                arguments,
                ..
            }
            | FunctionOperation::Replace {
                schema,
                name,
                arguments,
                ..
            }
            | FunctionOperation::Drop {
                schema,
                name,
                arguments,
                ..
            } => DbObjectId::Function {
                schema: schema.clone(),
                name: name.clone(),
                arguments: arguments.clone(),
            },
            FunctionOperation::Comment(op) => op.db_object_id(),
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, FunctionOperation::Drop { .. })
    }
}

/// Assemble a `CREATE OR REPLACE FUNCTION`/`PROCEDURE` statement from its
/// parts: the param list and each attribute on its own line, then the body.
fn render_create_or_replace(
    kind: &str,
    schema: &str,
    name: &str,
    parameters: &str,
    returns: &str,
    attributes: &[String],
    definition: &str,
) -> String {
    let mut lines = vec![format!(
        "CREATE OR REPLACE {} {}.{}({})",
        kind,
        quote_ident(schema),
        quote_ident(name),
        parameters
    )];

    let returns = returns.trim();
    if !returns.is_empty() {
        lines.push(returns.to_string());
    }

    lines.extend(attributes.iter().cloned());
    lines.push(render_body(definition));

    format!("{};", lines.join("\n"))
}

/// A PG14+ SQL-standard body (`RETURN ...` for functions, `BEGIN ATOMIC
/// ... END` for procedures) is emitted verbatim; everything else is wrapped
/// in a dollar-quote tag chosen not to collide with the body.
fn render_body(definition: &str) -> String {
    let body = definition.trim();
    let lower = body.to_ascii_lowercase();
    if lower.starts_with("return ") || lower.starts_with("begin atomic") {
        return body.to_string();
    }

    let tag = choose_dollar_tag(body);
    format!("AS {tag}{body}{tag}")
}

/// Dollar-quote tag selection: `$$`, then `$_$`, `$function$`, `$body$`,
/// `$pgdump$`, then `$tag1$`..`$tag999$`, finally `$fallback$`.
/// `$$` is skipped if the body contains a literal `$$` or a positional
/// parameter reference (`$1`, `$2`, ...), since either reads ambiguously
/// next to a bare `$$` delimiter.
fn choose_dollar_tag(body: &str) -> String {
    if !body.contains("$$") && !contains_positional_param_ref(body) {
        return "$$".to_string();
    }

    for tag in ["$_$", "$function$", "$body$", "$pgdump$"] {
        if !body.contains(tag) {
            return tag.to_string();
        }
    }

    for n in 1..=999 {
        let tag = format!("$tag{n}$");
        if !body.contains(&tag) {
            return tag;
        }
    }

    "$fallback$".to_string()
}

fn contains_positional_param_ref(body: &str) -> bool {
    let bytes = body.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'$' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
    })
}
