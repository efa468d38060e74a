//! The `Function` catalog entity, covering both functions and procedures
//! (`kind` distinguishes them; Postgres stores both in `pg_proc`).

use super::comments::Commentable;
use super::id::{DbObjectId, DependsOn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionKind {
    Function,
    Procedure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParam {
    pub name: Option<String>,
    /// `IN`, `OUT`, `INOUT` or `VARIADIC`; `None` means the default (`IN`).
    pub mode: Option<String>,
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub schema: String,
    pub name: String,
    /// The argument list exactly as Postgres identifies the overload, e.g.
    /// `integer, text`. Used verbatim in `DbObjectId::Function` and in
    /// `DROP FUNCTION`/`COMMENT ON FUNCTION` targets.
    pub arguments: String,
    pub parameters: Vec<FunctionParam>,
    pub return_type: Option<String>,
    pub language: String,
    /// `VOLATILE`, `STABLE` or `IMMUTABLE`.
    pub volatility: String,
    pub is_strict: bool,
    /// `INVOKER` or `DEFINER`.
    pub security_type: String,
    pub is_leakproof: bool,
    /// `UNSAFE`, `RESTRICTED` or `SAFE`. `UNSAFE` is Postgres's default and
    /// is never emitted explicitly.
    pub parallel: String,
    pub kind: FunctionKind,
    /// Body text only, as stored in `pg_proc.prosrc` — no `CREATE FUNCTION`
    /// wrapper and no dollar-quote tag. The emitter assembles those.
    pub definition: String,
    pub comment: Option<String>,
    pub depends_on: Vec<DbObjectId>,
}

impl Function {
    pub fn id(&self) -> DbObjectId {
        DbObjectId::Function {
            schema: self.schema.clone(),
            name: self.name.clone(),
            arguments: self.arguments.clone(),
        }
    }
}

impl DependsOn for Function {
    fn id(&self) -> DbObjectId {
        self.id()
    }

    fn depends_on(&self) -> &[DbObjectId] {
        &self.depends_on
    }
}

impl Commentable for Function {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}
