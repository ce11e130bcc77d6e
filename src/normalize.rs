//! Removal of plural blocks that lack the `other` quantity.
//!
//! Android resolves every quantity it has no explicit form for through
//! `other`, so a `<plurals>` block without it crashes at lookup time. Such
//! blocks are dropped whole rather than repaired.
//!
//! Selection and removal are separate steps: [`incomplete_plurals`] walks the
//! tree and returns child-index paths, [`remove_nodes`] applies them.

use crate::document::{Document, Element, Node};
use tracing::debug;

pub const PLURALS: &str = "plurals";
pub const ITEM: &str = "item";
pub const QUANTITY: &str = "quantity";
pub const FALLBACK_QUANTITY: &str = "other";

/// Child indices leading from the root to a node. The root itself is `[]`.
pub type NodePath = Vec<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalized {
    pub removed_plurals: usize,
    /// The root has no element or comment children left. Stray text and
    /// formatting whitespace between its tags do not count.
    pub is_empty: bool,
}

/// True for a `<plurals>` element with no `<item quantity="other">` child.
pub fn is_incomplete_plural(element: &Element) -> bool {
    element.name == PLURALS
        && !element
            .elements()
            .any(|item| item.name == ITEM && item.attribute(QUANTITY) == Some(FALLBACK_QUANTITY))
}

/// Paths of all incomplete plural blocks below `root`, in document order.
pub fn incomplete_plurals(root: &Element) -> Vec<NodePath> {
    let mut found = Vec::new();
    let mut path = Vec::new();
    collect(root, &mut path, &mut found);
    found
}

fn collect(element: &Element, path: &mut NodePath, found: &mut Vec<NodePath>) {
    for (index, child) in element.children.iter().enumerate() {
        if let Node::Element(child) = child {
            path.push(index);
            if is_incomplete_plural(child) {
                found.push(path.clone());
            }
            collect(child, path, found);
            path.pop();
        }
    }
}

/// Remove the nodes at `paths` (as returned by [`incomplete_plurals`]).
///
/// Paths are applied in reverse document order so that removing a node never
/// shifts the index of one still waiting. Empty and stale paths are ignored.
pub fn remove_nodes(root: &mut Element, paths: &[NodePath]) -> usize {
    let mut sorted: Vec<&NodePath> = paths.iter().collect();
    sorted.sort();
    sorted.dedup();

    let mut removed = 0;
    for path in sorted.into_iter().rev() {
        let Some((index, parent_path)) = path.split_last() else {
            continue;
        };
        if let Some(parent) = element_at_mut(root, parent_path) {
            if *index < parent.children.len() {
                parent.children.remove(*index);
                removed += 1;
            }
        }
    }
    removed
}

fn element_at_mut<'a>(root: &'a mut Element, path: &[usize]) -> Option<&'a mut Element> {
    let mut current = root;
    for &index in path {
        current = match current.children.get_mut(index) {
            Some(Node::Element(child)) => child,
            _ => return None,
        };
    }
    Some(current)
}

/// Drop every incomplete plural block and report whether anything is left.
pub fn normalize(document: &mut Document) -> Normalized {
    let paths = incomplete_plurals(&document.root);
    for path in &paths {
        debug!("Removing plurals without \"{}\" at {:?}", FALLBACK_QUANTITY, path);
    }
    let removed_plurals = remove_nodes(&mut document.root, &paths);

    Normalized {
        removed_plurals,
        is_empty: !document.root.has_markup(),
    }
}
