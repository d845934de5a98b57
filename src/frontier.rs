use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use ordered_float::OrderedFloat;
use crate::arena::NodeId;
use crate::puzzle::Puzzle;
use crate::traits::puzzle::Heuristic;

/// A discovered state waiting to be expanded, with its distance from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Entry {
    pub id: NodeId,
    pub depth: u32,
}

/// Order in which discovered states are expanded. Membership and deduplication are
/// handled by the search loop, a frontier only decides what comes out next.
pub trait Frontier {
    fn push(&mut self, entry: Entry, puzzle: &Puzzle);

    fn pop(&mut self) -> Option<Entry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First in, first out.
#[derive(Debug, Default)]
pub struct Fifo {
    queue: VecDeque<Entry>,
}

impl Frontier for Fifo {
    fn push(&mut self, entry: Entry, _puzzle: &Puzzle) {
        self.queue.push_back(entry);
    }

    fn pop(&mut self) -> Option<Entry> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Last in, first out.
#[derive(Debug, Default)]
pub struct Lifo {
    stack: Vec<Entry>,
}

impl Frontier for Lifo {
    fn push(&mut self, entry: Entry, _puzzle: &Puzzle) {
        self.stack.push(entry);
    }

    fn pop(&mut self) -> Option<Entry> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

type Key = (OrderedFloat<f64>, u32, u64);

/// Min-heap on `f`, ties go to the shallower state and then to the earlier push.
pub struct BestFirst<H: Heuristic> {
    heap: BinaryHeap<Reverse<(Key, Entry)>>,
    heuristic: H,
    pushed: u64,
}

impl<H: Heuristic> BestFirst<H> {
    pub fn new(heuristic: H) -> Self {
        Self {
            heap: BinaryHeap::new(),
            heuristic,
            pushed: 0,
        }
    }
}

impl<H: Heuristic> Frontier for BestFirst<H> {
    fn push(&mut self, entry: Entry, puzzle: &Puzzle) {
        let f = OrderedFloat(self.heuristic.get_heuristic(puzzle));
        self.heap.push(Reverse(((f, puzzle.cost(), self.pushed), entry)));
        self.pushed += 1;
    }

    fn pop(&mut self) -> Option<Entry> {
        self.heap.pop().map(|Reverse((_, entry))| entry)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
