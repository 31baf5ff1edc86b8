//! Solvers for the sliding n-puzzle.
//!
//! [`puzzle`] models immutable board configurations and their legal slides,
//! [`heuristic`] provides admissible distance estimators, and [`search`]
//! runs four interchangeable graph-search strategies (BFS, DFS, greedy
//! best-first, A*) over the implicit state space, returning the plan and
//! exploration statistics.

pub mod heuristic;
pub mod puzzle;
pub mod search;
