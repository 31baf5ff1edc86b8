//! Graph search over the implicit puzzle state space.
//!
//! One generic engine serves four strategies; they differ only in fringe
//! discipline and priority key. The engine keeps a closed set (no state is
//! expanded twice), a first-writer-wins parent map for plan reconstruction,
//! and a fringe-size high-water mark. A closed state is never re-opened even
//! if a cheaper path to it turns up later; this keeps expansion counts
//! reproducible at the cost of strict A* optimality against path cost (BFS
//! and A* with a consistent heuristic still return minimal plans).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::heuristic::Heuristic;
use crate::puzzle::{Move, PuzzleState};

/// Fringe discipline selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// FIFO fringe; returns a minimal-length plan.
    BreadthFirst,
    /// LIFO fringe; returns the first plan found, usually far from minimal.
    DepthFirst,
    /// Min-priority fringe keyed by the heuristic alone; no length guarantee.
    GreedyBestFirst,
    /// Min-priority fringe keyed by path cost plus heuristic; minimal-length
    /// plan under an admissible, consistent heuristic.
    AStar,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Strategy::BreadthFirst => "BFS",
            Strategy::DepthFirst => "DFS",
            Strategy::GreedyBestFirst => "Greedy Best-First",
            Strategy::AStar => "A*",
        };
        write!(f, "{}", s)
    }
}

/// Result of one search call: the plan (or `None` once the finite reachable
/// graph is exhausted) plus exploration statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub plan: Option<Vec<Move>>,
    pub states_expanded: usize,
    pub max_fringe: usize,
}

/// Uninformed breadth-first search. Optimal under unit edge cost.
pub fn bfs(start: &PuzzleState) -> SearchOutcome {
    run(start, FifoFringe::default(), |_, _| 0)
}

/// Uninformed depth-first search.
pub fn dfs(start: &PuzzleState) -> SearchOutcome {
    run(start, LifoFringe::default(), |_, _| 0)
}

/// Greedy best-first search ordered by `heuristic` alone.
pub fn best_first(start: &PuzzleState, heuristic: Heuristic) -> SearchOutcome {
    run(start, PriorityFringe::default(), move |state, _| {
        heuristic(state)
    })
}

/// A* search ordered by path cost plus `heuristic`.
pub fn astar(start: &PuzzleState, heuristic: Heuristic) -> SearchOutcome {
    run(start, PriorityFringe::default(), move |state, cost| {
        cost + heuristic(state)
    })
}

/// Dispatches to the strategy's entry point. The uninformed strategies
/// ignore `heuristic`.
pub fn solve(start: &PuzzleState, strategy: Strategy, heuristic: Heuristic) -> SearchOutcome {
    debug!("starting {} search from:\n{}", strategy, start);
    match strategy {
        Strategy::BreadthFirst => bfs(start),
        Strategy::DepthFirst => dfs(start),
        Strategy::GreedyBestFirst => best_first(start, heuristic),
        Strategy::AStar => astar(start, heuristic),
    }
}

/// Maps every discovered state to the state and move it was first reached
/// from; the root maps to `(None, None)`.
type ParentMap = FxHashMap<PuzzleState, (Option<PuzzleState>, Option<Move>)>;

/// Fringe entries carry the state's path cost from the start, recorded at
/// insertion time, so no separate cost map is needed.
trait Fringe {
    fn push(&mut self, state: PuzzleState, cost: u32, priority: u32);
    fn pop(&mut self) -> Option<(PuzzleState, u32)>;
    fn len(&self) -> usize;
}

#[derive(Default)]
struct FifoFringe(VecDeque<(PuzzleState, u32)>);

impl Fringe for FifoFringe {
    fn push(&mut self, state: PuzzleState, cost: u32, _priority: u32) {
        self.0.push_back((state, cost));
    }

    fn pop(&mut self) -> Option<(PuzzleState, u32)> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Default)]
struct LifoFringe(Vec<(PuzzleState, u32)>);

impl Fringe for LifoFringe {
    fn push(&mut self, state: PuzzleState, cost: u32, _priority: u32) {
        self.0.push((state, cost));
    }

    fn pop(&mut self) -> Option<(PuzzleState, u32)> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Min-priority fringe. Entries compare by `(priority, insertion sequence)`
/// so that equal priorities break ties in insertion order; states themselves
/// are never compared.
#[derive(Default)]
struct PriorityFringe {
    heap: BinaryHeap<HeapEntry>,
    seq: u64,
}

struct HeapEntry {
    priority: u32,
    seq: u64,
    cost: u32,
    state: PuzzleState,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap, we want the minimum out first
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Fringe for PriorityFringe {
    fn push(&mut self, state: PuzzleState, cost: u32, priority: u32) {
        self.heap.push(HeapEntry {
            priority,
            seq: self.seq,
            cost,
            state,
        });
        self.seq += 1;
    }

    fn pop(&mut self) -> Option<(PuzzleState, u32)> {
        self.heap.pop().map(|entry| (entry.state, entry.cost))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// The shared search skeleton. `key` computes a fringe priority from a state
/// and its path cost; the FIFO and LIFO fringes ignore it.
fn run<F, K>(start: &PuzzleState, mut fringe: F, key: K) -> SearchOutcome
where
    F: Fringe,
    K: Fn(&PuzzleState, u32) -> u32,
{
    let mut closed: FxHashSet<PuzzleState> = FxHashSet::default();
    let mut parents: ParentMap = FxHashMap::default();
    let mut states_expanded = 0usize;
    let mut max_fringe = 0usize;

    parents.insert(start.clone(), (None, None));
    let priority = key(start, 0);
    fringe.push(start.clone(), 0, priority);

    loop {
        max_fringe = max_fringe.max(fringe.len());

        let Some((state, cost)) = fringe.pop() else {
            debug!("fringe exhausted after {} expansions", states_expanded);
            return SearchOutcome {
                plan: None,
                states_expanded,
                max_fringe,
            };
        };

        // The first goal dequeued wins, before the closed-set check.
        if state.is_goal() {
            let plan = reconstruct(&state, &parents);
            debug!(
                "goal at depth {} after {} expansions",
                plan.len(),
                states_expanded
            );
            return SearchOutcome {
                plan: Some(plan),
                states_expanded,
                max_fringe,
            };
        }

        if closed.contains(&state) {
            continue;
        }
        states_expanded += 1;
        closed.insert(state.clone());

        for (mv, child) in state.successors() {
            if closed.contains(&child) {
                continue;
            }
            let child_cost = cost + 1;
            let priority = key(&child, child_cost);
            // first-writer-wins: the first path found to a state is the one
            // remembered
            if !parents.contains_key(&child) {
                parents.insert(child.clone(), (Some(state.clone()), Some(mv)));
            }
            fringe.push(child, child_cost, priority);
        }
    }
}

/// Walks the parent map back from `state` to the root entry and returns the
/// move sequence in forward order. A state absent from the map yields an
/// empty plan.
fn reconstruct(state: &PuzzleState, parents: &ParentMap) -> Vec<Move> {
    let mut plan = Vec::new();
    let mut current = state;
    while let Some((Some(previous), Some(mv))) = parents.get(current) {
        plan.push(*mv);
        current = previous;
    }
    plan.reverse();
    plan
}
