use crate::catalog::custom_type::{CustomType, TypeKind};
use crate::diff::comment_utils;
use crate::diff::operations::{MigrationStep, TypeIdentifier, TypeOperation};

fn enum_definition(type_: &CustomType) -> String {
    let values: Vec<String> = type_
        .enum_values
        .iter()
        .map(|v| format!("   '{}'", v.name))
        .collect();
    format!("(\n{}\n)", values.join(",\n"))
}

fn composite_definition(type_: &CustomType) -> String {
    let attrs: Vec<String> = type_
        .composite_attributes
        .iter()
        .map(|attr| format!("\t{} {}", attr.name, attr.type_name))
        .collect();
    format!("(\n{}\n)", attrs.join(",\n"))
}

/// Diff a single custom type
pub fn diff(old: Option<&CustomType>, new: Option<&CustomType>) -> Vec<MigrationStep> {
    match (old, new) {
        // CREATE new type
        (None, Some(n)) => {
            let (kind, definition) = match n.kind {
                TypeKind::Enum => ("ENUM".to_string(), enum_definition(n)),
                TypeKind::Composite => ("COMPOSITE".to_string(), composite_definition(n)),
            };

            let mut steps = vec![MigrationStep::Type(TypeOperation::Create {
                schema: n.schema.clone(),
                name: n.name.clone(),
                kind,
                definition,
            })];

            if let Some(comment_op) = comment_utils::handle_comment_creation(
                &n.comment,
                TypeIdentifier {
                    schema: n.schema.clone(),
                    name: n.name.clone(),
                },
            ) {
                steps.push(MigrationStep::Type(TypeOperation::Comment(comment_op)));
            }

            steps
        }
        // DROP removed type
        (Some(o), None) => {
            vec![MigrationStep::Type(TypeOperation::Drop {
                schema: o.schema.clone(),
                name: o.name.clone(),
            })]
        }
        // ALTER existing type
        (Some(o), Some(n)) => {
            if o.kind != n.kind {
                return vec![
                    MigrationStep::Type(TypeOperation::Drop {
                        schema: o.schema.clone(),
                        name: o.name.clone(),
                    }),
                    diff(None, Some(n))[0].clone(),
                ];
            }

            match n.kind {
                TypeKind::Enum => {
                    let old_values: Vec<&String> = o.enum_values.iter().map(|v| &v.name).collect();
                    let new_values: Vec<&String> = n.enum_values.iter().map(|v| &v.name).collect();

                    if old_values == new_values {
                        let comment_ops =
                            comment_utils::handle_comment_diff(Some(o), Some(n), || {
                                TypeIdentifier {
                                    schema: n.schema.clone(),
                                    name: n.name.clone(),
                                }
                            });
                        comment_ops
                            .into_iter()
                            .map(|op| MigrationStep::Type(TypeOperation::Comment(op)))
                            .collect()
                    } else if old_values.iter().all(|v| new_values.contains(v)) {
                        // Only additions (no reordering of the existing values, no removals).
                        let added: Vec<usize> = (0..new_values.len())
                            .filter(|&i| !old_values.contains(&new_values[i]))
                            .collect();

                        if added.is_empty() {
                            return vec![
                                MigrationStep::Type(TypeOperation::Drop {
                                    schema: o.schema.clone(),
                                    name: o.name.clone(),
                                }),
                                diff(None, Some(n))[0].clone(),
                            ];
                        }

                        let last = new_values.len() - 1;
                        let mut steps: Vec<MigrationStep> = added
                            .into_iter()
                            .map(|i| {
                                let placement = if i == 0 {
                                    format!("BEFORE '{}'", new_values[1])
                                } else if i == last {
                                    format!("AFTER '{}'", new_values[last - 1])
                                } else {
                                    format!("AFTER '{}'", new_values[i - 1])
                                };
                                MigrationStep::Type(TypeOperation::Alter {
                                    schema: n.schema.clone(),
                                    name: n.name.clone(),
                                    action: "ADD VALUE".to_string(),
                                    definition: format!("'{}' {}", new_values[i], placement),
                                })
                            })
                            .collect();

                        let comment_ops =
                            comment_utils::handle_comment_diff(Some(o), Some(n), || {
                                TypeIdentifier {
                                    schema: n.schema.clone(),
                                    name: n.name.clone(),
                                }
                            });
                        for comment_op in comment_ops {
                            steps.push(MigrationStep::Type(TypeOperation::Comment(comment_op)));
                        }
                        steps
                    } else {
                        vec![
                            MigrationStep::Type(TypeOperation::Drop {
                                schema: o.schema.clone(),
                                name: o.name.clone(),
                            }),
                            diff(None, Some(n))[0].clone(),
                        ]
                    }
                }
                TypeKind::Composite => {
                    let old_attrs: Vec<(&String, &String)> = o
                        .composite_attributes
                        .iter()
                        .map(|attr| (&attr.name, &attr.type_name))
                        .collect();
                    let new_attrs: Vec<(&String, &String)> = n
                        .composite_attributes
                        .iter()
                        .map(|attr| (&attr.name, &attr.type_name))
                        .collect();

                    if old_attrs != new_attrs {
                        return vec![
                            MigrationStep::Type(TypeOperation::Drop {
                                schema: o.schema.clone(),
                                name: o.name.clone(),
                            }),
                            diff(None, Some(n))[0].clone(),
                        ];
                    }

                    let comment_ops =
                        comment_utils::handle_comment_diff(Some(o), Some(n), || TypeIdentifier {
                            schema: n.schema.clone(),
                            name: n.name.clone(),
                        });
                    comment_ops
                        .into_iter()
                        .map(|op| MigrationStep::Type(TypeOperation::Comment(op)))
                        .collect()
                }
            }
        }
        (None, None) => Vec::new(),
    }
}
