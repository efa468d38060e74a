//! Shared SQL rendering for CREATE TABLE statements
//!
//! This module provides consistent table rendering across both schema generation
//! and migration operations to ensure identical SQL output.

use crate::catalog::table::{Column, IdentityGeneration, Table};
use crate::render::quote_ident;

/// Which statement a column clause is being rendered into. Only affects
/// SERIAL casing: `CREATE TABLE` gets `SMALLSERIAL`/`SERIAL`/`BIGSERIAL`,
/// `ALTER TABLE ... ADD COLUMN` gets the lowercase form (spec §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnContext {
    Create,
    Alter,
}

/// Render one column's clause: `<identifier> <type>`, then whichever of
/// `GENERATED {ALWAYS|BY DEFAULT} AS IDENTITY`, `DEFAULT <expr>`,
/// `GENERATED ALWAYS AS (<expr>) STORED`, and `NOT NULL` apply, in that
/// fixed order (spec §4.4). `DEFAULT` is suppressed for SERIAL, identity,
/// and generated columns; `NOT NULL` is suppressed for SERIAL, identity,
/// and columns that are part of the table's primary key.
pub fn render_column_clause(
    column: &Column,
    context: ColumnContext,
    is_primary_key_column: bool,
) -> String {
    let is_serial = column.is_serial();
    let mut clause = format!(
        "{} {}",
        quote_ident(&column.name),
        format_column_type(column, context, is_serial)
    );

    if let Some(identity) = column.identity {
        let generation = match identity {
            IdentityGeneration::Always => "ALWAYS",
            IdentityGeneration::ByDefault => "BY DEFAULT",
        };
        clause.push_str(&format!(" GENERATED {} AS IDENTITY", generation));
    }

    let suppress_default = is_serial || column.identity.is_some() || column.generated.is_some();
    if !suppress_default
        && let Some(default) = &column.default
    {
        clause.push_str(&format!(" DEFAULT {}", default));
    }

    if let Some(generated_expr) = &column.generated {
        clause.push_str(&format!(" GENERATED ALWAYS AS ({}) STORED", generated_expr));
    }

    let suppress_not_null = is_serial || column.identity.is_some() || is_primary_key_column;
    if column.not_null && !suppress_not_null {
        clause.push_str(" NOT NULL");
    }

    clause
}

/// Format a column's type, substituting SERIAL/SMALLSERIAL/BIGSERIAL for a
/// detected SERIAL column and applying length/precision qualifiers
/// (`varchar(n)`, `character(n)`, `numeric(p[,s])`) otherwise. Array
/// suffixes (`[]`) are preserved as-is.
fn format_column_type(column: &Column, context: ColumnContext, is_serial: bool) -> String {
    if is_serial {
        let base = match column.data_type.as_str() {
            "smallint" | "int2" => "smallserial",
            "bigint" | "int8" => "bigserial",
            _ => "serial",
        };
        return match context {
            ColumnContext::Create => base.to_uppercase(),
            ColumnContext::Alter => base.to_string(),
        };
    }

    let (core, array_suffix) = match column.data_type.find('[') {
        Some(idx) => (&column.data_type[..idx], &column.data_type[idx..]),
        None => (column.data_type.as_str(), ""),
    };

    let formatted = match core {
        "character varying" | "varchar" => match column.max_length {
            Some(len) => format!("varchar({})", len),
            None => core.to_string(),
        },
        "character" | "char" => match column.max_length {
            Some(len) => format!("character({})", len),
            None => core.to_string(),
        },
        "numeric" | "decimal" => match (column.precision, column.scale) {
            (Some(p), Some(s)) => format!("numeric({}, {})", p, s),
            (Some(p), None) => format!("numeric({})", p),
            _ => core.to_string(),
        },
        other => other.to_string(),
    };

    format!("{}{}", formatted, array_suffix)
}

/// Render a complete CREATE TABLE statement for the given table.
///
/// This function handles all PostgreSQL table features:
/// - Column definitions with data types, including SERIAL/identity columns
///   and length/precision-qualified types
/// - NOT NULL constraints
/// - DEFAULT values
/// - Generated columns (GENERATED ALWAYS AS ... STORED)
/// - Primary key constraints (single and compound)
/// - Proper SQL formatting and identifier quoting
pub fn render_create_table(table: &Table) -> String {
    let mut sql = String::new();

    // CREATE TABLE schema.name
    sql.push_str("CREATE TABLE ");
    sql.push_str(&format!(
        "{}.{}",
        quote_ident(&table.schema),
        quote_ident(&table.name)
    ));
    sql.push_str(" (\n");

    // Column definitions
    let mut column_definitions: Vec<String> = table
        .columns
        .iter()
        .map(|column| {
            let is_pk_column = table
                .primary_key
                .as_ref()
                .is_some_and(|pk| pk.columns.iter().any(|pk_col| pk_col == &column.name));
            format!(
                "    {}",
                render_column_clause(column, ColumnContext::Create, is_pk_column)
            )
        })
        .collect();

    // Add primary key constraint if present
    if let Some(ref pk) = table.primary_key {
        let pk_columns = pk
            .columns
            .iter()
            .map(|col| quote_ident(col))
            .collect::<Vec<_>>()
            .join(", ");

        let pk_def = format!(
            "    CONSTRAINT {} PRIMARY KEY ({})",
            quote_ident(&pk.name),
            pk_columns
        );
        column_definitions.push(pk_def);
    }

    // Join all definitions
    sql.push_str(&column_definitions.join(",\n"));
    sql.push_str("\n);");

    sql
}
