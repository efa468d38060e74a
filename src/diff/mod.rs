pub mod columns;
pub mod comment_utils;
pub mod constraints;
pub mod custom_types;
pub mod domains;
pub mod functions;
pub mod grants;
pub mod indexes;
pub mod operations;
pub mod policies;
pub mod schemas;
pub mod sequences;
pub mod tables;
pub mod triggers;
pub mod views;

use crate::catalog::id::{DbObjectId, DependsOn};
use crate::catalog::utils::is_system_schema;
use crate::catalog::{
    Catalog, constraint::Constraint, custom_type::CustomType, domain::Domain, function::Function,
    index::Index, sequence::Sequence, table::Table, view::View,
};
use crate::diff::operations::MigrationStep;
use petgraph::graph::DiGraph;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

pub fn diff_all(old: &Catalog, new: &Catalog) -> Vec<MigrationStep> {
    info!("Diffing catalogs...");
    let mut out = Vec::new();

    out.extend(diff_list(
        &old.schemas,
        &new.schemas,
        |s| DbObjectId::Schema {
            name: s.name.clone(),
        },
        schemas::diff,
    ));

    out.extend(diff_list(
        &old.types,
        &new.types,
        CustomType::id,
        custom_types::diff,
    ));

    out.extend(diff_list(
        &old.domains,
        &new.domains,
        Domain::id,
        domains::diff,
    ));

    out.extend(diff_list(
        &old.sequences,
        &new.sequences,
        Sequence::id,
        sequences::diff,
    ));

    out.extend(diff_list(&old.tables, &new.tables, Table::id, tables::diff));

    out.extend(diff_list(
        &old.indexes,
        &new.indexes,
        Index::id,
        indexes::diff,
    ));

    out.extend(diff_list(
        &old.constraints,
        &new.constraints,
        Constraint::id,
        constraints::diff,
    ));

    out.extend(diff_list(
        &old.triggers,
        &new.triggers,
        |t| t.id(),
        triggers::diff,
    ));

    out.extend(diff_list(
        &old.policies,
        &new.policies,
        |p| p.id(),
        policies::diff,
    ));

    out.extend(diff_list(&old.views, &new.views, View::id, views::diff));

    out.extend(diff_list(
        &old.functions,
        &new.functions,
        Function::id,
        functions::diff,
    ));

    out.extend(grants::diff_grants(&old.grants, &new.grants));

    info!("Diff complete");
    out
}

pub fn diff_list<T, I: Eq + Ord + Clone, R>(
    old: &[T],
    new: &[T],
    id_of: impl Fn(&T) -> I,
    diff_fn: impl Fn(Option<&T>, Option<&T>) -> Vec<R>,
) -> Vec<R> {
    let mut old_map = BTreeMap::new();
    let mut new_map = BTreeMap::new();
    for o in old {
        old_map.insert(id_of(o), o);
    }
    for n in new {
        new_map.insert(id_of(n), n);
    }

    let all_ids: BTreeSet<_> = old_map.keys().chain(new_map.keys()).cloned().collect();

    all_ids
        .into_iter()
        .flat_map(|id| diff_fn(old_map.get(&id).cloned(), new_map.get(&id).cloned()))
        .collect()
}

/// Topo-sort the steps by their `dependencies()` using a multi-phase approach
/// Phase 1: Primary object creation/modification (schemas, tables, views, etc.)
/// Phase 2: Relationship establishment (sequence ownership, foreign keys, etc.)
/// Uses old_catalog for drop steps, and new_catalog for create/alter steps
pub fn diff_order(
    steps: Vec<MigrationStep>,
    old_catalog: &Catalog,
    new_catalog: &Catalog,
) -> anyhow::Result<Vec<MigrationStep>> {
    info!("Ordering migration steps...");
    let mut primary_steps = Vec::new();
    let mut relationship_steps = Vec::new();

    for step in steps {
        if step.is_relationship() {
            relationship_steps.push(step);
        } else {
            primary_steps.push(step);
        }
    }

    // Order primary steps (schemas, types, tables, etc.)
    let mut ordered_steps = order_steps_by_dependencies(primary_steps, old_catalog, new_catalog)?;

    // Then add ordered relationship steps
    let ordered_relationships =
        order_steps_by_dependencies(relationship_steps, old_catalog, new_catalog)?;
    ordered_steps.extend(ordered_relationships);

    Ok(ordered_steps)
}

/// Internal function to order steps using the existing object-based dependency system
fn order_steps_by_dependencies(
    steps: Vec<MigrationStep>,
    old_catalog: &Catalog,
    new_catalog: &Catalog,
) -> anyhow::Result<Vec<MigrationStep>> {
    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let mut id_to_indices: BTreeMap<DbObjectId, Vec<usize>> = BTreeMap::new();
    let mut node_indices = Vec::new();

    // Add each step as a node in the graph
    for (i, step) in steps.iter().enumerate() {
        let idx = graph.add_node(i);
        node_indices.push(idx);
        id_to_indices.entry(step.id()).or_default().push(i);
    }

    // Track missing dependencies for warnings
    let mut missing_deps: Vec<(DbObjectId, DbObjectId)> = Vec::new();

    for (i, step) in steps.iter().enumerate() {
        let is_drop = step.is_drop();

        if let DbObjectId::Comment { object_id } = &step.id() {
            if let Some(indices) = id_to_indices.get(object_id.as_ref()) {
                for &dep_i in indices {
                    let from = node_indices[dep_i];
                    let to = node_indices[i];
                    graph.add_edge(from, to, ());
                }
            }
            continue;
        }

        // Get dependencies from catalog's forward_deps
        let catalog_deps = if is_drop {
            old_catalog.forward_deps.get(&step.id())
        } else {
            new_catalog.forward_deps.get(&step.id())
        };

        // Process catalog dependencies (use reversed edges for drops)
        if let Some(deps) = catalog_deps {
            for dep in deps {
                if let Some(indices) = id_to_indices.get(dep) {
                    for &dep_i in indices {
                        let from = node_indices[if is_drop { i } else { dep_i }];
                        let to = node_indices[if is_drop { dep_i } else { i }];
                        graph.add_edge(from, to, ());
                    }
                } else {
                    let catalog = if is_drop { old_catalog } else { new_catalog };
                    if !catalog.contains_id(dep) {
                        missing_deps.push((step.id(), dep.clone()));
                    }
                }
            }
        } else {
            // Only use step-level dependencies as a fallback when no catalog deps exist.
            // This handles dynamically generated steps (like REVOKE for missing defaults)
            // that aren't in the catalog but still need proper ordering.
            // Step-level deps always use create-style edges: dep → step
            let step_deps = step.dependencies();
            for dep in &step_deps {
                if let Some(indices) = id_to_indices.get(dep) {
                    for &dep_i in indices {
                        // Always: dependency comes before this step
                        let from = node_indices[dep_i];
                        let to = node_indices[i];
                        graph.add_edge(from, to, ());
                    }
                } else {
                    // For step-level deps, check new_catalog (these are for "create" scenarios)
                    if !new_catalog.contains_id(dep) {
                        missing_deps.push((step.id(), dep.clone()));
                    }
                }
            }
        }
    }

    // Warn about missing dependencies (excluding system schemas)
    for (object_id, missing_dep) in &missing_deps {
        // Skip system schema dependencies - these are expected to be missing
        if let Some(schema) = missing_dep.schema()
            && is_system_schema(schema)
        {
            continue;
        }

        warn!(
            "{:?} depends on {:?} which is not in the catalog (may be filtered by config)",
            object_id, missing_dep
        );
    }

    let mut drop_indices = BTreeMap::new();
    let mut create_indices = BTreeMap::new();
    let mut other_indices = BTreeMap::new();

    for (i, step) in steps.iter().enumerate() {
        let id = step.id();
        if step.is_drop() {
            drop_indices.entry(id).or_insert_with(Vec::new).push(i);
        } else if step.is_create() {
            create_indices.entry(id).or_insert_with(Vec::new).push(i);
        } else {
            other_indices.entry(id).or_insert_with(Vec::new).push(i);
        }
    }

    for (id, drops) in drop_indices {
        if let Some(creates) = create_indices.get(&id) {
            for &drop_i in &drops {
                for &create_i in creates {
                    let from = node_indices[drop_i];
                    let to = node_indices[create_i];
                    graph.add_edge(from, to, ());
                }
            }
        }
    }

    for (id, creates) in create_indices {
        if let Some(others) = other_indices.get(&id) {
            for &create_i in &creates {
                for &other_i in others {
                    let from = node_indices[create_i];
                    let to = node_indices[other_i];
                    graph.add_edge(from, to, ());
                }
            }
        }
    }

    let index_to_step_idx: BTreeMap<_, _> = node_indices
        .iter()
        .enumerate()
        .map(|(i, &node)| (node, i))
        .collect();

    let order = kahn_order_with_cycle_break(&graph, &node_indices, &steps);

    let ordered = order
        .into_iter()
        .filter_map(|node| index_to_step_idx.get(&node).map(|&i| steps[i].clone()))
        .collect();
    Ok(ordered)
}

/// Kahn's algorithm with two determinism rules:
///
/// 1. whenever several nodes are simultaneously ready, emit the one whose
///    step carries the alphabetically smallest object path first;
/// 2. on cycle (the ready set empties before every node is emitted), pick
///    the next unprocessed node in original insertion order, force its
///    in-degree to zero, and continue.
///
/// Unlike `petgraph::algo::toposort`, this never fails: circular FKs,
/// textual view cycles, array-nested type cycles, and mutually-calling
/// functions are all expected inputs, not errors.
fn kahn_order_with_cycle_break(
    graph: &DiGraph<usize, ()>,
    node_indices: &[petgraph::graph::NodeIndex],
    steps: &[MigrationStep],
) -> Vec<petgraph::graph::NodeIndex> {
    let n = steps.len();
    let mut indegree = vec![0usize; n];
    for edge in graph.raw_edges() {
        indegree[edge.target().index()] += 1;
    }

    let mut processed = vec![false; n];
    // (sort key, insertion index) so BTreeSet pops the alphabetically
    // smallest ready node first, with insertion order breaking ties.
    let mut ready: BTreeSet<(String, usize)> = BTreeSet::new();
    for i in 0..n {
        if indegree[i] == 0 {
            ready.insert((steps[i].id().path(), i));
        }
    }

    let mut order = Vec::with_capacity(n);
    let mut next_unprocessed = 0usize;

    while order.len() < n {
        if ready.is_empty() {
            while next_unprocessed < n && processed[next_unprocessed] {
                next_unprocessed += 1;
            }
            if next_unprocessed >= n {
                break;
            }
            ready.insert((steps[next_unprocessed].id().path(), next_unprocessed));
        }

        let key = ready.iter().next().cloned().expect("ready set non-empty");
        ready.remove(&key);
        let i = key.1;
        if processed[i] {
            continue;
        }
        processed[i] = true;
        order.push(node_indices[i]);

        for edge in graph.edges(node_indices[i]) {
            let t = edge.target().index();
            if processed[t] {
                continue;
            }
            indegree[t] = indegree[t].saturating_sub(1);
            if indegree[t] == 0 {
                ready.insert((steps[t].id().path(), t));
            }
        }
    }

    order
}
