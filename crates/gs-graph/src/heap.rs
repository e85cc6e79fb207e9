//! Array-backed binary min-heap for the Dijkstra frontier.
//!
//! # Lazy invalidation
//!
//! There is no decrease-key.  When the search finds a cheaper cost for a
//! node it simply inserts a second entry; the stale, more expensive one stays
//! in the heap and is discarded by the search when it surfaces (the node is
//! already marked visited by then).  The heap may therefore hold several
//! entries for the same node at once.
//!
//! # Ordering
//!
//! Entries are ordered by `cost` only.  The relative order of equal-cost
//! entries is an artefact of the sift sequence and is **not** specified;
//! tests must not depend on it.

use gs_core::NodeId;

/// One frontier entry: a proposed cost for reaching `node`.
///
/// Entries are immutable once inserted; a better proposal supersedes an
/// older one by being inserted alongside it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrontierEntry {
    /// Graph node this entry proposes a cost for.
    pub node: NodeId,
    /// Total cost from the nearest source.
    pub cost: f32,
    /// Hop count from the source.  Tracked for reporting; never bounds the search.
    pub depth: u32,
    /// Shortest-path-tree id of the predecessor; `None` for source entries.
    pub previous: Option<NodeId>,
    /// Accumulated edge distance (metadata) along the same path.
    pub dist: f32,
}

impl FrontierEntry {
    /// The seed entry for a search source.
    pub fn source(node: NodeId) -> Self {
        Self { node, cost: 0.0, depth: 0, previous: None, dist: 0.0 }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PriorityQueue {
    items: Vec<FrontierEntry>,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity) }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append `entry` and sift it up while it is strictly cheaper than its parent.
    pub fn insert(&mut self, entry: FrontierEntry) {
        self.items.push(entry);
        self.sift_up(self.items.len() - 1);
    }

    /// The cheapest entry, or `None` if the queue is empty.
    #[inline]
    pub fn peek_min(&self) -> Option<&FrontierEntry> {
        self.items.first()
    }

    /// Remove and return the cheapest entry, or `None` if the queue is empty.
    ///
    /// The last element moves to the root and sifts down along the path of
    /// smaller children.
    pub fn delete_min(&mut self) -> Option<FrontierEntry> {
        if self.items.is_empty() {
            return None;
        }
        let min = self.items.swap_remove(0);
        self.sift_down(0);
        Some(min)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.items[parent].cost <= self.items[i].cost {
                break;
            }
            self.items.swap(parent, i);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.items[right].cost < self.items[left].cost {
                right
            } else {
                left
            };
            if self.items[i].cost < self.items[smaller].cost {
                break;
            }
            self.items.swap(i, smaller);
            i = smaller;
        }
    }
}
