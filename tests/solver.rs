use npuzzle::heuristic::{manhattan_distance, misplaced_tiles};
use npuzzle::puzzle::{Move, PuzzleState};
use npuzzle::search::{astar, best_first, bfs, dfs};

/// The classic easy 8-puzzle instance; its optimal solution is 7 moves
/// (Manhattan distance of the start is 7 and every slide changes it by
/// exactly 1).
fn demo_grid() -> PuzzleState {
    PuzzleState::from_rows(&[vec![1, 4, 2], vec![0, 5, 8], vec![3, 6, 7]]).unwrap()
}

/// A permutation in the other parity class than the goal: two non-hole
/// tiles of the solved grid swapped.
fn unsolvable_grid() -> PuzzleState {
    PuzzleState::from_rows(&[vec![0, 2, 1], vec![3, 4, 5], vec![6, 7, 8]]).unwrap()
}

fn replay(start: &PuzzleState, plan: &[Move]) -> PuzzleState {
    let mut state = start.clone();
    for &mv in plan {
        state = state.apply(mv).expect("plan contains an illegal move");
    }
    state
}

#[test]
fn bfs_finds_the_minimal_plan() {
    let start = demo_grid();
    let outcome = bfs(&start);
    let plan = outcome.plan.expect("demo grid is solvable");
    assert_eq!(plan.len(), 7);
    assert!(replay(&start, &plan).is_goal());
    assert!(outcome.states_expanded > 0);
    assert!(outcome.max_fringe >= 1);
}

#[test]
fn astar_matches_bfs_with_either_heuristic() {
    let start = demo_grid();
    for heuristic in [misplaced_tiles, manhattan_distance] {
        let outcome = astar(&start, heuristic);
        let plan = outcome.plan.expect("demo grid is solvable");
        assert_eq!(plan.len(), 7);
        assert!(replay(&start, &plan).is_goal());
    }
}

#[test]
fn astar_with_manhattan_expands_no_more_than_misplaced() {
    let start = demo_grid();
    let with_manhattan = astar(&start, manhattan_distance);
    let with_misplaced = astar(&start, misplaced_tiles);
    assert!(with_manhattan.states_expanded <= with_misplaced.states_expanded);
}

#[test]
fn dfs_plan_reaches_the_goal() {
    let start = demo_grid();
    let outcome = dfs(&start);
    let plan = outcome.plan.expect("demo grid is solvable");
    // no optimality guarantee, but the plan must replay to the goal
    assert!(plan.len() >= 7);
    assert!(replay(&start, &plan).is_goal());
}

#[test]
fn greedy_plan_reaches_the_goal() {
    let start = demo_grid();
    for heuristic in [misplaced_tiles, manhattan_distance] {
        let outcome = best_first(&start, heuristic);
        let plan = outcome.plan.expect("demo grid is solvable");
        assert!(plan.len() >= 7);
        assert!(replay(&start, &plan).is_goal());
    }
}

#[test]
fn unsolvable_grid_exhausts_the_state_graph() {
    let start = unsolvable_grid();
    assert!(!start.is_solvable());

    let outcome = bfs(&start);
    assert_eq!(outcome.plan, None);
    // the unsolvable parity class of the 8-puzzle has 9!/2 states, and every
    // one of them is expanded exactly once before the fringe runs dry
    assert_eq!(outcome.states_expanded, 181_440);
    assert!(outcome.max_fringe >= 1);
}

#[test]
fn solvability_agrees_with_bfs_reachability_on_2x2() {
    // all 12 reachable 2x2 configurations solve; the 12 others never do
    let mut solvable = 0;
    let mut unsolvable = 0;
    for permutation in permutations_2x2() {
        let state = PuzzleState::from_tiles(2, permutation).unwrap();
        let outcome = bfs(&state);
        assert_eq!(state.is_solvable(), outcome.plan.is_some());
        match outcome.plan {
            Some(_) => solvable += 1,
            None => unsolvable += 1,
        }
    }
    assert_eq!(solvable, 12);
    assert_eq!(unsolvable, 12);
}

fn permutations_2x2() -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let values = [0u8, 1, 2, 3];
    for &a in &values {
        for &b in &values {
            for &c in &values {
                for &d in &values {
                    let tiles = vec![a, b, c, d];
                    let mut sorted = tiles.clone();
                    sorted.sort_unstable();
                    if sorted == values {
                        out.push(tiles);
                    }
                }
            }
        }
    }
    out
}
