use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::model::Element;

/// Tree node in the arena-based document structure.
#[derive(Debug)]
pub struct DocumentNode {
    /// Element payload for this node
    pub element: Element,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes, in document order
    pub children: Vec<Index>,
}

/// Arena-based XML document tree.
///
/// Uses a generational arena for memory-safe node references and O(1)
/// lookups. Parent linkage is stored per node, so detaching a subtree is a
/// single child-list update and never requires re-deriving ancestry
/// mid-edit.
#[derive(Debug)]
pub struct Document {
    /// Arena storage for all document nodes
    arena: Arena<DocumentNode>,
    /// Index of the root element, None for empty documents
    root: Option<Index>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self, element))]
    pub fn insert_node(&mut self, element: Element, parent: Option<Index>) -> Index {
        let node = DocumentNode {
            element,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else if self.root.is_none() {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&DocumentNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut DocumentNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Pre-order iterator over the tree reachable from the root.
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    /// Detach `idx` from its parent, dropping the whole subtree from the
    /// serialized document.
    ///
    /// Returns false when the node is the root, or when its parent no
    /// longer lists it (already removed), so repeated removal requests are
    /// safe no-ops. The check runs against the current parent linkage.
    #[instrument(level = "trace", skip(self))]
    pub fn detach(&mut self, idx: Index) -> bool {
        let parent_idx = match self.arena.get(idx).and_then(|n| n.parent) {
            Some(p) => p,
            None => return false,
        };
        let Some(parent) = self.arena.get_mut(parent_idx) else {
            return false;
        };

        let before = parent.children.len();
        parent.children.retain(|&c| c != idx);
        if parent.children.len() == before {
            return false;
        }

        if let Some(node) = self.arena.get_mut(idx) {
            node.parent = None;
        }
        true
    }
}

pub struct TreeIterator<'a> {
    doc: &'a Document,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(doc: &'a Document) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = doc.root() {
            stack.push(root);
        }
        Self { doc, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a DocumentNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.doc.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
