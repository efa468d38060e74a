//! The pipeline orchestrator: the three entry points that tie the differ
//! (`crate::diff`), orderer (`crate::diff::diff_order`), and emitter
//! (`crate::render`) together, plus the `Context`/`Collector` abstraction the
//! emitter writes its output through.
//!
//! Callers never touch `MigrationStep` or `SqlRenderer` directly; they call
//! [`collect_migration_sql`] or [`generate_dump_sql`] with a [`Collector`]
//! and receive a stream of [`Statement`]s, each carrying a [`Context`]
//! describing what produced it.

use crate::catalog::Catalog;
use crate::catalog::constraint::ConstraintType;
use crate::catalog::grant::GranteeType;
use crate::catalog::id::DbObjectId;
use crate::diff::operations::{
    ColumnAction, FunctionOperation, GrantOperation, IndexOperation, MigrationStep, OperationKind,
    TableOperation, ViewOperation,
};
use crate::render::{Safety, SqlRenderer};
use thiserror::Error;

/// Errors the core itself can raise. The differ and orderer are otherwise
/// infallible (see `crate::diff::kahn_order_with_cycle_break`);
/// these variants exist for the invariant checks callers may want to run
/// over a `Catalog` before diffing it, and for changes the emitter has no
/// safe rendering for.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    #[error("unsupported change: {0}")]
    UnsupportedChange(String),
}

/// Closed enum over object kinds, mirroring the emitted `Context`'s `type`
/// column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Schema,
    Type,
    Sequence,
    Table,
    Column,
    Constraint,
    Index,
    Trigger,
    Policy,
    TableRls,
    TableComment,
    ColumnComment,
    IndexComment,
    View,
    MaterializedView,
    Function,
    Procedure,
    Privilege,
    DefaultPrivilege,
    RevokedDefaultPrivilege,
}

/// Everything the emitter attaches to a statement besides its SQL text.
#[derive(Debug, Clone)]
pub struct Context {
    pub kind: ObjectKind,
    pub operation: OperationKind,
    /// Dotted identity path, e.g. `schema.table.column`.
    pub path: String,
    pub can_run_in_transaction: bool,
}

/// A single emitted unit: a `Context` paired with its rendered SQL.
#[derive(Debug, Clone)]
pub struct Statement {
    pub context: Context,
    pub sql: String,
}

/// The caller-supplied sink the emitter writes `Statement`s to.
pub trait Collector {
    fn collect(&mut self, statement: Statement);
}

impl Collector for Vec<Statement> {
    fn collect(&mut self, statement: Statement) {
        self.push(statement);
    }
}

/// Checks the two invariants a caller is expected to hold before diffing a
/// catalog: no table has two columns claiming the same `position`, and
/// every foreign key's referenced table exists in this catalog. Neither the
/// differ nor the orderer runs these themselves — they trust the catalog is
/// well-formed, the same way the teacher's own `diff_all`/`diff_order` trust
/// whatever `Catalog` they're handed.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), CoreError> {
    for table in &catalog.tables {
        let mut seen_positions = std::collections::HashSet::new();
        for column in &table.columns {
            if !seen_positions.insert(column.position) {
                return Err(CoreError::InvariantViolation(format!(
                    "{}.{} has more than one column at position {}",
                    table.schema, table.name, column.position
                )));
            }
        }
    }

    for constraint in &catalog.constraints {
        if let ConstraintType::ForeignKey {
            referenced_schema,
            referenced_table,
            ..
        } = &constraint.constraint_type
            && catalog
                .find_table(referenced_schema, referenced_table)
                .is_none()
        {
            return Err(CoreError::InvariantViolation(format!(
                "{}.{}.{} references {}.{}, which does not exist in this catalog",
                constraint.schema,
                constraint.table,
                constraint.name,
                referenced_schema,
                referenced_table
            )));
        }
    }

    Ok(())
}

/// "Diff" entry point: compute the ordered change set for (old, new).
/// Dependency-safe creates/alters are ordered leaves-first; drops are the
/// reverse of the create order (handled by `diff::diff_order`'s use of
/// `old_catalog.forward_deps` for drop edges).
pub fn diff(old: &Catalog, new: &Catalog) -> Vec<MigrationStep> {
    let unordered = crate::diff::diff_all(old, new);
    crate::diff::diff_order(unordered, old, new)
        .expect("diff_order no longer fails on cycles; see kahn_order_with_cycle_break")
}

/// "Migrate" entry point: old → new, full three-phase pipeline
/// (drops → creates → modifies). `diff_order` already produces one
/// dependency-respecting sequence; phase separation falls out of whether
/// each step is a drop, a create, or neither.
pub fn collect_migration_sql(old: &Catalog, new: &Catalog, collector: &mut dyn Collector) {
    let ordered = diff(old, new);
    emit(&ordered, new, collector);
}

/// "Dump" entry point: creates-only DDL for a brand-new database (the old
/// side of the differ input is empty).
pub fn generate_dump_sql(new: &Catalog, collector: &mut dyn Collector) {
    let ordered = diff(&Catalog::empty(), new);
    emit(&ordered, new, collector);
}

fn emit(steps: &[MigrationStep], target: &Catalog, collector: &mut dyn Collector) {
    for step in steps {
        for statement in render_step(step, target) {
            collector.collect(statement);
        }
    }
}

/// Render one `MigrationStep` into its `Statement`s, attaching a `Context`
/// per rendered SQL line. Most steps render to exactly one line; a
/// `TableOperation::Alter` can carry several independent `ColumnAction`s
/// (RLS toggle, column comment, type change, ...) which `to_sql()` renders
/// 1:1 in order (see `render::table::render_column_action`), so those are
/// classified action-by-action rather than by the enclosing step.
fn render_step(step: &MigrationStep, target: &Catalog) -> Vec<Statement> {
    let rendered = step.to_sql();
    let operation = operation_kind(step);
    let path = step.id().path();

    if let MigrationStep::Table(TableOperation::Alter { actions, .. }) = step {
        return actions
            .iter()
            .zip(rendered)
            .map(|(action, r)| Statement {
                context: Context {
                    kind: column_action_kind(action),
                    operation: column_action_operation(action),
                    path: path.clone(),
                    can_run_in_transaction: can_run_in_transaction(&r.sql, r.safety),
                },
                sql: r.sql,
            })
            .collect();
    }

    let kind = object_kind(step, target);
    rendered
        .into_iter()
        .map(|r| Statement {
            context: Context {
                kind,
                operation,
                path: path.clone(),
                can_run_in_transaction: can_run_in_transaction(&r.sql, r.safety),
            },
            sql: r.sql,
        })
        .collect()
}

/// `false` exactly for `CREATE INDEX CONCURRENTLY` / `REINDEX ... CONCURRENTLY`
/// — the only statements that cannot run inside a transaction block.
/// Destructive statements otherwise run fine in a transaction; being
/// destructive and being non-transactional are orthogonal axes.
fn can_run_in_transaction(sql: &str, _safety: Safety) -> bool {
    !sql.contains("CONCURRENTLY")
}

fn operation_kind(step: &MigrationStep) -> OperationKind {
    match step {
        MigrationStep::Schema(op) => op.operation_kind(),
        MigrationStep::Table(op) => op.operation_kind(),
        MigrationStep::View(op) => op.operation_kind(),
        MigrationStep::Type(op) => op.operation_kind(),
        MigrationStep::Domain(op) => op.operation_kind(),
        MigrationStep::Sequence(op) => op.operation_kind(),
        MigrationStep::Function(op) => function_operation_kind(op),
        MigrationStep::Index(op) => index_operation_kind(op),
        MigrationStep::Constraint(op) => op.operation_kind(),
        MigrationStep::Trigger(op) => op.operation_kind(),
        MigrationStep::Policy(op) => op.operation_kind(),
        MigrationStep::Grant(op) => grant_operation_kind(op),
    }
}

fn function_operation_kind(op: &FunctionOperation) -> OperationKind {
    match op {
        FunctionOperation::Create { .. } => OperationKind::Create,
        FunctionOperation::Replace { .. } => OperationKind::Alter,
        FunctionOperation::Drop { .. } => OperationKind::Drop,
        FunctionOperation::Comment(_) => OperationKind::Alter,
    }
}

fn index_operation_kind(op: &IndexOperation) -> OperationKind {
    match op {
        IndexOperation::Create(_) => OperationKind::Create,
        IndexOperation::Drop { .. } => OperationKind::Drop,
        IndexOperation::Comment(_)
        | IndexOperation::Cluster { .. }
        | IndexOperation::SetWithoutCluster { .. }
        | IndexOperation::Reindex { .. } => OperationKind::Alter,
    }
}

fn grant_operation_kind(op: &GrantOperation) -> OperationKind {
    match op {
        GrantOperation::Grant { .. } => OperationKind::Create,
        GrantOperation::Revoke { .. } => OperationKind::Drop,
    }
}

fn column_action_operation(action: &ColumnAction) -> OperationKind {
    match action {
        ColumnAction::Add { .. } | ColumnAction::AddPrimaryKey { .. } => OperationKind::Create,
        ColumnAction::Drop { .. } | ColumnAction::DropPrimaryKey { .. } => OperationKind::Drop,
        _ => OperationKind::Alter,
    }
}

fn column_action_kind(action: &ColumnAction) -> ObjectKind {
    match action {
        ColumnAction::EnableRls
        | ColumnAction::DisableRls
        | ColumnAction::ForceRls
        | ColumnAction::NoForceRls => ObjectKind::TableRls,
        ColumnAction::Comment(_) => ObjectKind::ColumnComment,
        ColumnAction::AddPrimaryKey { .. } | ColumnAction::DropPrimaryKey { .. } => {
            ObjectKind::Constraint
        }
        _ => ObjectKind::Column,
    }
}

fn object_kind(step: &MigrationStep, target: &Catalog) -> ObjectKind {
    match step {
        MigrationStep::Schema(_) => ObjectKind::Schema,
        MigrationStep::Table(TableOperation::Comment(_)) => ObjectKind::TableComment,
        MigrationStep::Table(_) => ObjectKind::Table,
        MigrationStep::View(op) => view_kind(op, target),
        MigrationStep::Type(_) => ObjectKind::Type,
        MigrationStep::Domain(_) => ObjectKind::Type,
        MigrationStep::Sequence(_) => ObjectKind::Sequence,
        MigrationStep::Function(op) => function_kind(op),
        MigrationStep::Index(IndexOperation::Comment(_)) => ObjectKind::IndexComment,
        MigrationStep::Index(_) => ObjectKind::Index,
        MigrationStep::Constraint(_) => ObjectKind::Constraint,
        MigrationStep::Trigger(_) => ObjectKind::Trigger,
        MigrationStep::Policy(_) => ObjectKind::Policy,
        MigrationStep::Grant(op) => grant_kind(op),
    }
}

fn view_kind(op: &ViewOperation, target: &Catalog) -> ObjectKind {
    match op {
        ViewOperation::CreateMaterialized { .. } | ViewOperation::DropMaterialized { .. } => {
            ObjectKind::MaterializedView
        }
        ViewOperation::Comment(comment_op) => {
            let id = comment_op.db_object_id();
            if let DbObjectId::View { schema, name } = &id
                && target
                    .find_view(schema, name)
                    .is_some_and(|v| v.materialized)
            {
                ObjectKind::MaterializedView
            } else {
                ObjectKind::View
            }
        }
        ViewOperation::Create { .. } | ViewOperation::Drop { .. } | ViewOperation::Replace { .. }
        | ViewOperation::SetOption { .. } => ObjectKind::View,
    }
}

fn function_kind(op: &FunctionOperation) -> ObjectKind {
    let kind_str = match op {
        FunctionOperation::Create { kind, .. }
        | FunctionOperation::Replace { kind, .. }
        | FunctionOperation::Drop { kind, .. } => kind.as_str(),
        FunctionOperation::Comment(_) => "FUNCTION",
    };
    if kind_str.eq_ignore_ascii_case("PROCEDURE") {
        ObjectKind::Procedure
    } else {
        ObjectKind::Function
    }
}

fn grant_kind(op: &GrantOperation) -> ObjectKind {
    let (grant, is_revoke) = match op {
        GrantOperation::Grant { grant } => (grant, false),
        GrantOperation::Revoke { grant } => (grant, true),
    };
    if grant.is_default_acl {
        if is_revoke {
            ObjectKind::RevokedDefaultPrivilege
        } else {
            ObjectKind::DefaultPrivilege
        }
    } else {
        ObjectKind::Privilege
    }
}

/// `PUBLIC` is emitted verbatim, never quoted.
pub fn render_grantee(grantee: &GranteeType) -> String {
    match grantee {
        GranteeType::Role(role) => crate::render::quote_ident(role),
        GranteeType::Public => "PUBLIC".to_string(),
    }
}
