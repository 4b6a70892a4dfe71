//! Comment Threads
//!
//! A post's comments form a forest keyed by `parent_id`.
//!
//! - [`collect_subtree`] finds everything a cascading delete removes
//! - [`CommentTree::assemble`] builds the read-side view with a stable order

use std::collections::{HashMap, HashSet};

use kernel::id::CommentId;

use crate::domain::entity::comment::Comment;

/// Parent edge of one comment, all a subtree walk needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadLink {
    pub comment_id: CommentId,
    pub parent_id: Option<CommentId>,
}

/// Ids of `root` and every descendant, root first.
///
/// Iterative depth-first walk with a visited set, so depth is bounded only by
/// memory and a corrupt parent cycle terminates. A leaf yields just `[root]`.
pub fn collect_subtree(root: CommentId, links: &[ThreadLink]) -> Vec<CommentId> {
    let mut children: HashMap<CommentId, Vec<CommentId>> = HashMap::new();
    for link in links {
        if let Some(parent) = link.parent_id {
            children.entry(parent).or_default().push(link.comment_id);
        }
    }

    let mut visited: HashSet<CommentId> = HashSet::new();
    let mut collected = Vec::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        collected.push(id);
        if let Some(kids) = children.get(&id) {
            stack.extend(kids.iter().copied().filter(|k| !visited.contains(k)));
        }
    }

    collected
}

/// Read-side thread view
///
/// `roots` and every `children` list are ordered by `created_at` ascending,
/// ties broken by id.
#[derive(Debug, Clone, Default)]
pub struct CommentTree {
    pub roots: Vec<Comment>,
    pub children: HashMap<CommentId, Vec<Comment>>,
}

impl CommentTree {
    pub fn assemble(comments: Vec<Comment>) -> Self {
        let mut tree = CommentTree::default();

        for comment in comments {
            match comment.parent_id {
                None => tree.roots.push(comment),
                Some(parent) => tree.children.entry(parent).or_default().push(comment),
            }
        }

        sort_thread(&mut tree.roots);
        for list in tree.children.values_mut() {
            sort_thread(list);
        }

        tree
    }

    pub fn children_of(&self, id: &CommentId) -> &[Comment] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Ascending by `created_at`, then id
pub fn sort_thread(comments: &mut [Comment]) {
    comments.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.comment_id.cmp(&b.comment_id))
    });
}
