//! View operations for schema migrations

use super::OperationKind;
use super::comments::{CommentOperation, CommentTarget};
use crate::catalog::id::DbObjectId;
use crate::render::quote_ident;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOption {
    SecurityInvoker,
    SecurityBarrier,
}

impl ViewOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewOption::SecurityInvoker => "security_invoker",
            ViewOption::SecurityBarrier => "security_barrier",
        }
    }
}

#[derive(Debug, Clone)]
pub enum ViewOperation {
    Create {
        schema: String,
        name: String,
        definition: String,
        security_invoker: bool,
        security_barrier: bool,
    },
    Drop {
        schema: String,
        name: String,
    },
    Replace {
        schema: String,
        name: String,
        definition: String,
    },
    SetOption {
        schema: String,
        name: String,
        option: ViewOption,
        enabled: bool,
    },
    /// Materialized views can't be CREATE OR REPLACE'd; a structural change
    /// always drops and recreates.
    CreateMaterialized {
        schema: String,
        name: String,
        definition: String,
    },
    DropMaterialized {
        schema: String,
        name: String,
    },
    Comment(CommentOperation<ViewIdentifier>),
}

impl ViewOperation {
    pub fn operation_kind(&self) -> OperationKind {
        match self {
            Self::Create { .. } | Self::CreateMaterialized { .. } => OperationKind::Create,
            Self::Drop { .. } | Self::DropMaterialized { .. } => OperationKind::Drop,
            Self::Replace { .. } | Self::SetOption { .. } => OperationKind::Alter,
            Self::Comment(_) => OperationKind::Alter,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewIdentifier {
    pub schema: String,
    pub name: String,
}

impl CommentTarget for ViewIdentifier {
    const OBJECT_TYPE: &'static str = "VIEW";

    fn identifier(&self) -> String {
        format!("{}.{}", quote_ident(&self.schema), quote_ident(&self.name))
    }

    fn db_object_id(&self) -> DbObjectId {
        DbObjectId::View {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }
}
