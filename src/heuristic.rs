//! Distance-to-goal estimators for the informed search strategies.
//!
//! All estimators are admissible for unit-cost slides: they never
//! overestimate the true remaining move count, and they are zero exactly at
//! the goal. Values are consumed only as priority keys.

use crate::puzzle::PuzzleState;

/// A heuristic is any estimator from state to remaining-cost lower bound.
pub type Heuristic = fn(&PuzzleState) -> u32;

/// Number of non-hole tiles that are not on their goal cell.
pub fn misplaced_tiles(state: &PuzzleState) -> u32 {
    state
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(index, &value)| value != 0 && value as usize != index)
        .count() as u32
}

/// Sum over non-hole tiles of the row plus column distance to the goal cell.
/// The goal cell of value v is row-major index v. Dominates
/// [`misplaced_tiles`]: any misplaced tile is at Manhattan distance >= 1.
pub fn manhattan_distance(state: &PuzzleState) -> u32 {
    let n = state.size();
    let mut distance = 0u32;
    for (index, &value) in state.tiles().iter().enumerate() {
        if value == 0 {
            continue;
        }
        let (row, col) = (index / n, index % n);
        let (goal_row, goal_col) = (value as usize / n, value as usize % n);
        distance += row.abs_diff(goal_row) as u32;
        distance += col.abs_diff(goal_col) as u32;
    }
    distance
}

/// Manhattan distance plus 2 for every linear conflict: a pair of tiles that
/// both sit in their goal row (or column) but in reversed order, so one must
/// step aside before the other can pass. Dominates plain Manhattan distance
/// and stays admissible.
pub fn linear_conflict(state: &PuzzleState) -> u32 {
    manhattan_distance(state) + 2 * conflicts(state)
}

fn conflicts(state: &PuzzleState) -> u32 {
    let n = state.size();
    let tiles = state.tiles();
    let mut conflicts = 0u32;

    // Within a goal row, values increase left to right, and within a goal
    // column they increase top to bottom, so raw value comparison detects
    // the reversed pairs.
    for row in 0..n {
        let mut max_seen = 0u8;
        for col in 0..n {
            let value = tiles[row * n + col];
            if value != 0 && value as usize / n == row {
                if value > max_seen {
                    max_seen = value;
                } else {
                    conflicts += 1;
                }
            }
        }
    }

    for col in 0..n {
        let mut max_seen = 0u8;
        for row in 0..n {
            let value = tiles[row * n + col];
            if value != 0 && value as usize % n == col {
                if value > max_seen {
                    max_seen = value;
                } else {
                    conflicts += 1;
                }
            }
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state(rows: &[Vec<u8>]) -> PuzzleState {
        PuzzleState::from_rows(rows).unwrap()
    }

    #[test]
    fn zero_exactly_at_goal() {
        let goal = PuzzleState::solved(3);
        assert_eq!(misplaced_tiles(&goal), 0);
        assert_eq!(manhattan_distance(&goal), 0);
        assert_eq!(linear_conflict(&goal), 0);

        for (_, child) in goal.successors() {
            assert!(misplaced_tiles(&child) > 0);
            assert!(manhattan_distance(&child) > 0);
        }
    }

    #[test]
    fn demo_grid_values() {
        let start = state(&[vec![1, 4, 2], vec![0, 5, 8], vec![3, 6, 7]]);
        assert_eq!(misplaced_tiles(&start), 7);
        assert_eq!(manhattan_distance(&start), 7);
    }

    #[test]
    fn manhattan_dominates_misplaced() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let puzzle = PuzzleState::scrambled(3, &mut rng);
            assert!(manhattan_distance(&puzzle) >= misplaced_tiles(&puzzle));
            assert!(linear_conflict(&puzzle) >= manhattan_distance(&puzzle));
        }
    }

    #[test]
    fn linear_conflict_counts_reversed_pairs() {
        // 2 and 1 are both in goal row 0 but swapped: one conflict,
        // Manhattan 2, so the combined estimate is 4.
        let start = state(&[vec![0, 2, 1], vec![3, 4, 5], vec![6, 7, 8]]);
        assert_eq!(manhattan_distance(&start), 2);
        assert_eq!(linear_conflict(&start), 4);
    }
}
