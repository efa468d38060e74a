//! The `Grant` catalog entity, modeling `GRANT`/`REVOKE` privileges. Rather
//! than splitting "explicit privilege", "default privilege" and "revoked
//! default privilege" into separate types, every ACL entry is a `Grant` with
//! an `is_default_acl` flag; the differ uses the flag to decide whether a
//! missing default needs a synthetic `REVOKE` (see `diff::grants`).

use super::id::DbObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GranteeType {
    Role(String),
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectType {
    Table { schema: String, name: String },
    View { schema: String, name: String },
    Schema { name: String },
    Function { schema: String, name: String, arguments: String },
    Procedure { schema: String, name: String, arguments: String },
    Sequence { schema: String, name: String },
    Type { schema: String, name: String },
    Domain { schema: String, name: String },
}

impl ObjectType {
    pub fn db_object_id(&self) -> DbObjectId {
        match self {
            ObjectType::Table { schema, name } => DbObjectId::Table {
                schema: schema.clone(),
                name: name.clone(),
            },
            ObjectType::View { schema, name } => DbObjectId::View {
                schema: schema.clone(),
                name: name.clone(),
            },
            ObjectType::Schema { name } => DbObjectId::Schema { name: name.clone() },
            ObjectType::Function { schema, name, arguments }
            | ObjectType::Procedure { schema, name, arguments } => DbObjectId::Function {
                schema: schema.clone(),
                name: name.clone(),
                arguments: arguments.clone(),
            },
            ObjectType::Sequence { schema, name } => DbObjectId::Sequence {
                schema: schema.clone(),
                name: name.clone(),
            },
            ObjectType::Type { schema, name } => DbObjectId::Type {
                schema: schema.clone(),
                name: name.clone(),
            },
            ObjectType::Domain { schema, name } => DbObjectId::Domain {
                schema: schema.clone(),
                name: name.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub grantee: GranteeType,
    pub object: ObjectType,
    pub privileges: Vec<String>,
    pub with_grant_option: bool,
    pub depends_on: Vec<DbObjectId>,
    pub object_owner: String,
    /// `true` when this grant merely reflects a privilege Postgres applies
    /// by default (owner grants, PUBLIC EXECUTE on functions, PUBLIC USAGE
    /// on types/domains) rather than one an explicit `GRANT` created.
    pub is_default_acl: bool,
}

impl Grant {
    pub fn id(&self) -> DbObjectId {
        let grantee = match &self.grantee {
            GranteeType::Role(role) => role.clone(),
            GranteeType::Public => "PUBLIC".to_string(),
        };
        DbObjectId::Grant {
            id: format!("{}#{}", self.object.db_object_id().path(), grantee),
        }
    }
}
