//! Support for cycle detection in DFS graph traversals.

use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

/// The reason a traversal was stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecyclerError {
    #[error("maximum nesting depth exceeded")]
    DepthLimitExceeded,
    #[error("cycle detected")]
    CycleDetected,
}

/// Cycle detector for DFS traversal of a graph.
///
/// The graph is expected to have unique node identifiers of type `T`.
/// Every node on the current path is remembered, so a cycle is reported on
/// the first revisit; the path length is bounded by `max_depth`.
pub(crate) struct Decycler<T> {
    node_ids: Vec<T>,
    max_depth: usize,
}

impl<T> Decycler<T>
where
    T: Copy + PartialEq,
{
    pub fn new(max_depth: usize) -> Self {
        Self {
            node_ids: Vec::new(),
            max_depth,
        }
    }

    /// Enters a new graph node with the given value that uniquely
    /// identifies the current node.
    ///
    /// Returns an error when a cycle is detected or the max depth of the
    /// traversal is exceeded. Otherwise, pushes the node onto the current
    /// path and returns a guard object that will pop it when dropped.
    ///
    /// The guard object derefs to the decycler, so it can be passed to
    /// a recursive traversal function to check for cycles in descendent
    /// nodes in a graph.
    pub fn enter(&mut self, node_id: T) -> Result<DecyclerGuard<'_, T>, DecyclerError> {
        if self.node_ids.contains(&node_id) {
            return Err(DecyclerError::CycleDetected);
        }
        if self.node_ids.len() >= self.max_depth {
            return Err(DecyclerError::DepthLimitExceeded);
        }
        self.node_ids.push(node_id);
        Ok(DecyclerGuard { decycler: self })
    }

    /// The number of nodes on the current path.
    pub fn depth(&self) -> usize {
        self.node_ids.len()
    }
}

pub(crate) struct DecyclerGuard<'a, T> {
    decycler: &'a mut Decycler<T>,
}

impl<T> Deref for DecyclerGuard<'_, T> {
    type Target = Decycler<T>;

    fn deref(&self) -> &Self::Target {
        self.decycler
    }
}

impl<T> DerefMut for DecyclerGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.decycler
    }
}

impl<T> Drop for DecyclerGuard<'_, T> {
    fn drop(&mut self) {
        self.decycler.node_ids.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_with_cycles() {
        let tree = Tree {
            nodes: vec![
                Node::new(vec![1, 2]),
                Node::new(vec![2, 3]),
                Node::new(vec![]),
                Node::new(vec![0, 1]),
            ],
        };
        let result = tree.traverse(&mut Decycler::new(64));
        assert!(matches!(result, Err(DecyclerError::CycleDetected)));
    }

    #[test]
    fn exceeds_max_depth() {
        let mut nodes = (0..32)
            .map(|i| Node::new(vec![i + 1]))
            .collect::<Vec<_>>();
        nodes.push(Node::new(vec![]));
        let tree = Tree { nodes };
        let result = tree.traverse(&mut Decycler::new(16));
        assert!(matches!(result, Err(DecyclerError::DepthLimitExceeded)));
    }

    #[test]
    fn well_formed_tree() {
        let tree = Tree {
            nodes: vec![
                Node::new(vec![1, 2]),
                Node::new(vec![2, 3]),
                Node::new(vec![]),
                Node::new(vec![]),
            ],
        };
        let mut decycler = Decycler::new(64);
        let result = tree.traverse(&mut decycler);
        assert!(result.is_ok());
        assert_eq!(decycler.depth(), 0);
    }

    struct Node {
        child_ids: Vec<u16>,
    }

    impl Node {
        fn new(child_ids: Vec<u16>) -> Self {
            Self { child_ids }
        }
    }

    struct Tree {
        nodes: Vec<Node>,
    }

    impl Tree {
        fn traverse(&self, decycler: &mut Decycler<u16>) -> Result<(), DecyclerError> {
            self.traverse_impl(decycler, 0)
        }

        fn traverse_impl(
            &self,
            decycler: &mut Decycler<u16>,
            node_id: u16,
        ) -> Result<(), DecyclerError> {
            let mut cycle_guard = decycler.enter(node_id)?;
            let node = &self.nodes[node_id as usize];
            for child_id in &node.child_ids {
                self.traverse_impl(&mut cycle_guard, *child_id)?;
            }
            Ok(())
        }
    }
}
