//! The in-memory catalog (intermediate representation) that the differ,
//! orderer, and emitter all operate over. Building a `Catalog` from a live
//! database or from parsed DDL text is outside this crate; callers hand in
//! two already-constructed `Catalog` values (e.g. deserialized from a
//! snapshot file) and this module only holds the data and the lookups the
//! rest of the pipeline needs.

use crate::catalog::id::{DbObjectId, DependsOn};
use crate::diff::functions::{format_attributes, format_parameter_list, format_return_clause};
use crate::diff::operations::{
    ConstraintIdentifier, ConstraintOperation, FunctionOperation, MigrationStep, PolicyIdentifier,
    PolicyOperation, TableOperation, TriggerIdentifier, TriggerOperation, ViewOperation,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod comments;
pub mod constraint;
pub mod custom_type;
pub mod domain;
pub mod function;
pub mod grant;
pub mod id;
pub mod index;
pub mod policy;
pub mod schema;
pub mod sequence;
pub mod table;
pub mod triggers;
pub mod utils;
pub mod view;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub schemas: Vec<schema::Schema>,
    pub tables: Vec<table::Table>,
    pub views: Vec<view::View>,
    pub types: Vec<custom_type::CustomType>,
    pub domains: Vec<domain::Domain>,
    pub functions: Vec<function::Function>,
    pub sequences: Vec<sequence::Sequence>,
    pub indexes: Vec<index::Index>,
    pub constraints: Vec<constraint::Constraint>,
    pub triggers: Vec<triggers::Trigger>,
    pub policies: Vec<policy::Policy>,
    pub grants: Vec<grant::Grant>,

    #[serde(skip)]
    pub forward_deps: BTreeMap<DbObjectId, Vec<DbObjectId>>,
    #[serde(skip)]
    pub reverse_deps: BTreeMap<DbObjectId, Vec<DbObjectId>>,
}

impl Catalog {
    /// Create an empty catalog, used as the "old" side when emitting the
    /// creates-only DDL for a brand new database.
    pub fn empty() -> Self {
        Self {
            schemas: Vec::new(),
            tables: Vec::new(),
            views: Vec::new(),
            types: Vec::new(),
            domains: Vec::new(),
            functions: Vec::new(),
            sequences: Vec::new(),
            indexes: Vec::new(),
            constraints: Vec::new(),
            triggers: Vec::new(),
            policies: Vec::new(),
            grants: Vec::new(),
            forward_deps: BTreeMap::new(),
            reverse_deps: BTreeMap::new(),
        }
    }

    /// (Re)build `forward_deps`/`reverse_deps` from every entity's own
    /// `depends_on()`. Callers that deserialize a catalog from a snapshot
    /// file must call this once before diffing, since dependency maps are
    /// not part of the serialized form.
    pub fn resolve_dependencies(&mut self) {
        let mut forward = BTreeMap::new();
        let mut reverse = BTreeMap::new();

        fn insert_deps<T: DependsOn>(
            items: &[T],
            fwd: &mut BTreeMap<DbObjectId, Vec<DbObjectId>>,
            rev: &mut BTreeMap<DbObjectId, Vec<DbObjectId>>,
        ) {
            for item in items {
                let id = item.id();
                let deps = item.depends_on();
                fwd.insert(id.clone(), deps.to_vec());

                for dep in deps {
                    rev.entry(dep.clone()).or_default().push(id.clone());
                }
            }
        }

        insert_deps(&self.tables, &mut forward, &mut reverse);
        insert_deps(&self.views, &mut forward, &mut reverse);
        insert_deps(&self.types, &mut forward, &mut reverse);
        insert_deps(&self.domains, &mut forward, &mut reverse);
        insert_deps(&self.functions, &mut forward, &mut reverse);
        insert_deps(&self.indexes, &mut forward, &mut reverse);

        self.forward_deps = forward;
        self.reverse_deps = reverse;
    }

    pub fn find_view(&self, schema: &str, name: &str) -> Option<&view::View> {
        self.views
            .iter()
            .find(|v| v.schema == schema && v.name == name)
    }

    pub fn find_table(&self, schema: &str, name: &str) -> Option<&table::Table> {
        self.tables
            .iter()
            .find(|t| t.schema == schema && t.name == name)
    }

    pub fn find_policy(&self, schema: &str, table: &str, name: &str) -> Option<&policy::Policy> {
        self.policies
            .iter()
            .find(|p| p.schema == schema && p.table_name == table && p.name == name)
    }

    pub fn find_constraint(
        &self,
        schema: &str,
        table: &str,
        name: &str,
    ) -> Option<&constraint::Constraint> {
        self.constraints
            .iter()
            .find(|c| c.schema == schema && c.table == table && c.name == name)
    }

    pub fn find_function(
        &self,
        schema: &str,
        name: &str,
        arguments: &str,
    ) -> Option<&function::Function> {
        self.functions
            .iter()
            .find(|f| f.schema == schema && f.name == name && f.arguments == arguments)
    }

    pub fn find_trigger(
        &self,
        schema: &str,
        table: &str,
        name: &str,
    ) -> Option<&triggers::Trigger> {
        self.triggers
            .iter()
            .find(|t| t.schema == schema && t.table_name == table && t.name == name)
    }

    /// Synthesize DROP and CREATE operations for cascading an object whose
    /// definition depends on a table column that is itself being dropped
    /// and recreated (e.g. `ALTER COLUMN ... TYPE` forcing dependent views
    /// out of the way). Returns `None` for object kinds that never carry
    /// such a dependency, or when the object is gone in `new_catalog`.
    pub fn synthesize_drop_create(
        &self,
        id: &DbObjectId,
        new_catalog: &Catalog,
    ) -> Option<(MigrationStep, MigrationStep)> {
        match id {
            DbObjectId::View { schema, name } => {
                let drop = MigrationStep::View(ViewOperation::Drop {
                    schema: schema.clone(),
                    name: name.clone(),
                });

                let view = new_catalog.find_view(schema, name)?;
                let create = MigrationStep::View(ViewOperation::Create {
                    schema: view.schema.clone(),
                    name: view.name.clone(),
                    definition: view.definition.clone(),
                    security_invoker: view.security_invoker,
                    security_barrier: view.security_barrier,
                });

                Some((drop, create))
            }

            DbObjectId::Table { schema, name } => {
                let drop = MigrationStep::Table(TableOperation::Drop {
                    schema: schema.clone(),
                    name: name.clone(),
                });

                let table = new_catalog.find_table(schema, name)?;
                let create = MigrationStep::Table(TableOperation::Create {
                    schema: table.schema.clone(),
                    name: table.name.clone(),
                    columns: table.columns.clone(),
                    primary_key: table.primary_key.clone(),
                });

                Some((drop, create))
            }

            DbObjectId::Policy {
                schema,
                table,
                name,
            } => {
                let drop = MigrationStep::Policy(PolicyOperation::Drop {
                    identifier: PolicyIdentifier {
                        schema: schema.clone(),
                        table: table.clone(),
                        name: name.clone(),
                    },
                });

                let policy = new_catalog.find_policy(schema, table, name)?;
                let create = MigrationStep::Policy(PolicyOperation::Create {
                    policy: Box::new(policy.clone()),
                });

                Some((drop, create))
            }

            DbObjectId::Constraint {
                schema,
                table,
                name,
            } => {
                let drop =
                    MigrationStep::Constraint(ConstraintOperation::Drop(ConstraintIdentifier {
                        schema: schema.clone(),
                        table: table.clone(),
                        name: name.clone(),
                    }));

                let constraint = new_catalog.find_constraint(schema, table, name)?;
                let create =
                    MigrationStep::Constraint(ConstraintOperation::Create(constraint.clone()));

                Some((drop, create))
            }

            DbObjectId::Function {
                schema,
                name,
                arguments,
            } => {
                let func = self.find_function(schema, name, arguments)?;
                let new_func = new_catalog.find_function(schema, name, arguments)?;

                let kind_str = match func.kind {
                    function::FunctionKind::Function => "FUNCTION",
                    function::FunctionKind::Procedure => "PROCEDURE",
                };

                let param_types: Vec<String> = func
                    .parameters
                    .iter()
                    .map(|p| p.data_type.clone())
                    .collect();

                let drop = MigrationStep::Function(FunctionOperation::Drop {
                    schema: schema.clone(),
                    name: name.clone(),
                    arguments: arguments.clone(),
                    kind: kind_str.to_string(),
                    parameter_types: param_types.join(", "),
                });

                let create = MigrationStep::Function(FunctionOperation::Create {
                    schema: new_func.schema.clone(),
                    name: new_func.name.clone(),
                    arguments: new_func.arguments.clone(),
                    kind: kind_str.to_string(),
                    parameters: format_parameter_list(&new_func.parameters),
                    returns: format_return_clause(new_func),
                    attributes: format_attributes(new_func),
                    definition: new_func.definition.clone(),
                });

                Some((drop, create))
            }

            DbObjectId::Trigger {
                schema,
                table,
                name,
            } => {
                let drop = MigrationStep::Trigger(TriggerOperation::Drop {
                    identifier: TriggerIdentifier {
                        schema: schema.clone(),
                        table: table.clone(),
                        name: name.clone(),
                    },
                });

                let trigger = new_catalog.find_trigger(schema, table, name)?;
                let create = MigrationStep::Trigger(TriggerOperation::Create {
                    trigger: Box::new(trigger.clone()),
                });

                Some((drop, create))
            }

            // Other kinds don't carry column-level dependencies, so they're
            // handled by the ordinary diff pass rather than cascade synthesis.
            _ => None,
        }
    }

    /// Check if the catalog contains an object with the given ID.
    pub fn contains_id(&self, id: &DbObjectId) -> bool {
        match id {
            DbObjectId::Schema { name } => self.schemas.iter().any(|s| &s.name == name),
            DbObjectId::Table { schema, name } => self
                .tables
                .iter()
                .any(|t| &t.schema == schema && &t.name == name),
            DbObjectId::View { schema, name } => self
                .views
                .iter()
                .any(|v| &v.schema == schema && &v.name == name),
            DbObjectId::Type { schema, name } => self
                .types
                .iter()
                .any(|t| &t.schema == schema && &t.name == name),
            DbObjectId::Domain { schema, name } => self
                .domains
                .iter()
                .any(|d| &d.schema == schema && &d.name == name),
            DbObjectId::Function {
                schema,
                name,
                arguments,
            } => self
                .functions
                .iter()
                .any(|f| &f.schema == schema && &f.name == name && &f.arguments == arguments),
            DbObjectId::Sequence { schema, name } => self
                .sequences
                .iter()
                .any(|s| &s.schema == schema && &s.name == name),
            DbObjectId::Index { schema, name } => self
                .indexes
                .iter()
                .any(|i| &i.schema == schema && &i.name == name),
            DbObjectId::Constraint {
                schema,
                table,
                name,
            } => self
                .constraints
                .iter()
                .any(|c| &c.schema == schema && &c.table == table && &c.name == name),
            DbObjectId::Trigger {
                schema,
                table,
                name,
            } => self
                .triggers
                .iter()
                .any(|t| &t.schema == schema && &t.table_name == table && &t.name == name),
            DbObjectId::Policy {
                schema,
                table,
                name,
            } => self
                .policies
                .iter()
                .any(|p| &p.schema == schema && &p.table_name == table && &p.name == name),
            DbObjectId::Grant { id } => self.grants.iter().any(|g| &g.id() == id),
            DbObjectId::Comment { object_id } => self.contains_id(object_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_contains_nothing() {
        let catalog = Catalog::empty();
        assert!(!catalog.contains_id(&DbObjectId::Schema {
            name: "public".into()
        }));
    }

    #[test]
    fn resolve_dependencies_builds_reverse_map() {
        let mut catalog = Catalog::empty();
        catalog.schemas.push(schema::Schema {
            name: "public".into(),
            owner: None,
            comment: None,
        });
        catalog.tables.push(table::Table::new(
            "public".into(),
            "widgets".into(),
            vec![],
            None,
            None,
            vec![DbObjectId::Schema {
                name: "public".into(),
            }],
        ));
        catalog.resolve_dependencies();

        assert_eq!(
            catalog.forward_deps[&DbObjectId::Table {
                schema: "public".into(),
                name: "widgets".into()
            }],
            vec![DbObjectId::Schema {
                name: "public".into()
            }]
        );
        assert!(
            catalog.reverse_deps[&DbObjectId::Schema {
                name: "public".into()
            }]
            .contains(&DbObjectId::Table {
                schema: "public".into(),
                name: "widgets".into()
            })
        );
    }

    /// A fixture `Catalog` is typically loaded as a JSON snapshot rather than
    /// built in Rust; round-tripping through `serde_json` is how the rest of
    /// this crate's tests will consume those fixtures.
    #[test]
    fn catalog_round_trips_through_json() {
        let mut catalog = Catalog::empty();
        catalog.schemas.push(schema::Schema {
            name: "public".into(),
            owner: None,
            comment: None,
        });

        let json = serde_json::to_string(&catalog).expect("serializes");
        let restored: Catalog = serde_json::from_str(&json).expect("deserializes");

        assert_eq!(restored.schemas.len(), 1);
        assert_eq!(restored.schemas[0].name, "public");
        // forward_deps/reverse_deps are #[serde(skip)] and must be rebuilt.
        assert!(restored.forward_deps.is_empty());
    }
}
