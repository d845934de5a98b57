use std::ops::Index;
use crate::puzzle::Puzzle;

/// Stable handle to a state owned by a [`StateArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Owns every state generated during one search. States point at their parent through
/// a `NodeId`, so the back-chain never holds references into the arena.
#[derive(Debug, Default)]
pub struct StateArena {
    nodes: Vec<Puzzle>,
}

impl StateArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, puzzle: Puzzle) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(puzzle);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Puzzle> {
        self.nodes.get(id.0)
    }

    /// Walk parent handles from `id` back to the root. The first item is `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: Some(id),
        }
    }

    /// Number of moves between the root and `id`.
    pub fn depth_of(&self, id: NodeId) -> usize {
        self.ancestors(id).count().saturating_sub(1)
    }
}

impl Index<NodeId> for StateArena {
    type Output = Puzzle;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

pub struct Ancestors<'a> {
    arena: &'a StateArena,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Puzzle;

    fn next(&mut self) -> Option<Self::Item> {
        let puzzle = self.arena.get(self.next?)?;
        self.next = puzzle.parent();
        Some(puzzle)
    }
}
