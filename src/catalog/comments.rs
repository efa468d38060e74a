/// Trait for catalog objects that carry an optional descriptive comment.
///
/// Shared by the differ's comment sub-diff and by the emitter's
/// `COMMENT ON ...` rendering.
pub trait Commentable {
    fn comment(&self) -> &Option<String>;
}

/// Generic comment action, reused by every kind-specific diff module so
/// comment handling stays identical across tables, columns, constraints,
/// indexes, views, functions, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentAction {
    SetComment { comment: String },
    DropComment,
}

/// Diff the comment of two already-paired objects. Returns `None` when the
/// comment is unchanged, which lets callers fold this into their larger
/// sub-diff without emitting a spurious no-op action.
pub fn diff_comment<T: Commentable>(old: &T, new: &T) -> Option<CommentAction> {
    match (old.comment(), new.comment()) {
        (None, Some(comment)) => Some(CommentAction::SetComment {
            comment: comment.clone(),
        }),
        (Some(_), None) => Some(CommentAction::DropComment),
        (Some(old_comment), Some(new_comment)) if old_comment != new_comment => {
            Some(CommentAction::SetComment {
                comment: new_comment.clone(),
            })
        }
        _ => None,
    }
}

/// Diff the comments of two optionally-present objects, folding creation and
/// removal into the same `Set`/`Drop` vocabulary as `diff_comment` uses for
/// the paired case. Returns at most one action; a `Vec` keeps the call sites
/// in `comment_utils` uniform whether the object itself was added, dropped,
/// or modified in place.
pub fn diff_comments<T: Commentable>(old: Option<&T>, new: Option<&T>) -> Vec<CommentAction> {
    match (old, new) {
        (Some(o), Some(n)) => diff_comment(o, n).into_iter().collect(),
        (None, Some(n)) => match n.comment() {
            Some(comment) => vec![CommentAction::SetComment {
                comment: comment.clone(),
            }],
            None => vec![],
        },
        (Some(o), None) => match o.comment() {
            Some(_) => vec![CommentAction::DropComment],
            None => vec![],
        },
        (None, None) => vec![],
    }
}
