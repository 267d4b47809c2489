use rand::SeedableRng;
use rand::rngs::SmallRng;
use tile_puzzle_solver::action::{Action, actions_from_path};
use tile_puzzle_solver::solver::DEFAULT_WEIGHT;
use tile_puzzle_solver::{
    Algorithm, Configuration, PuzzleError, SolveResult, Solver, SolverOptions, Weighting,
    is_solvable,
};

const ALL_ALGORITHMS: [Algorithm; 4] = [
    Algorithm::BestFirst,
    Algorithm::IterativeDeepening,
    Algorithm::Weighted {
        weight: DEFAULT_WEIGHT,
        mode: Weighting::Static,
    },
    Algorithm::Weighted {
        weight: DEFAULT_WEIGHT,
        mode: Weighting::Dynamic,
    },
];

fn run(algorithm: Algorithm, board: &Configuration, seed: u64) -> SolveResult {
    let options = SolverOptions::new(board.dimension(), algorithm).seed(seed);
    let mut solver = Solver::new(options).unwrap();
    solver.solve(board).unwrap()
}

/// Checks the path contract and returns the number of moves.
fn assert_valid_solution(result: &SolveResult, start: &Configuration) -> usize {
    assert!(result.success);
    let path = result.path.as_ref().expect("a successful solve has a path");
    assert_eq!(path.first(), Some(start));
    assert_eq!(path.last(), Some(&Configuration::goal(start.dimension()).unwrap()));
    let actions: Vec<Action> = actions_from_path(path).expect("every step is one slide");
    assert_eq!(actions, result.actions());
    assert_eq!(actions.len(), result.moves());
    result.moves()
}

#[test]
fn scenario_unsolvable_board() {
    let board = Configuration::from_grid([[1, 2, 3], [0, 4, 5], [6, 8, 7]]).unwrap();
    assert!(!is_solvable(&board));
    for algorithm in ALL_ALGORITHMS {
        let result = run(algorithm, &board, 1);
        assert!(!result.success);
        assert_eq!(result.path, None);
        assert_eq!(result.iterations, 0);
    }
}

#[test]
fn scenario_plain_search_is_minimal() {
    let board = Configuration::from_grid([[2, 3, 5], [1, 4, 0], [7, 8, 6]]).unwrap();
    let result = run(Algorithm::BestFirst, &board, 1);
    assert_eq!(assert_valid_solution(&result, &board), 17);
    assert_eq!(
        result.path.unwrap().last().unwrap().to_string(),
        "[[0, 1, 2], [3, 4, 5], [6, 7, 8]]"
    );
}

#[test]
fn scenario_plain_and_deepening_agree() {
    let board = Configuration::from_grid([[6, 8, 7], [0, 1, 2], [3, 4, 5]]).unwrap();
    let plain = run(Algorithm::BestFirst, &board, 2);
    let deepening = run(Algorithm::IterativeDeepening, &board, 2);
    assert_eq!(assert_valid_solution(&plain, &board), 21);
    assert_eq!(assert_valid_solution(&deepening, &board), 21);
}

#[test]
fn scenario_four_by_four_all_algorithms() {
    let board =
        Configuration::from_grid([[8, 5, 9, 11], [7, 12, 10, 4], [0, 15, 13, 14], [1, 2, 6, 3]])
            .unwrap();
    let results: Vec<SolveResult> = ALL_ALGORITHMS
        .iter()
        .map(|&algorithm| run(algorithm, &board, 3))
        .collect();

    let optimal = assert_valid_solution(&results[0], &board);
    assert_eq!(optimal, 54);
    assert_eq!(assert_valid_solution(&results[1], &board), optimal);
    for weighted in &results[2..] {
        assert!(assert_valid_solution(weighted, &board) >= optimal);
    }
}

#[test]
fn scenario_plain_length_is_stable_across_seeds() {
    let board = Configuration::from_grid([[8, 6, 7], [2, 5, 4], [3, 0, 1]]).unwrap();
    let first = run(Algorithm::BestFirst, &board, 10);
    let second = run(Algorithm::BestFirst, &board, 20);
    assert_eq!(assert_valid_solution(&first, &board), 27);
    assert_eq!(first.moves(), second.moves());
}

#[test]
fn random_boards_respect_the_path_contract() {
    let mut rng = SmallRng::seed_from_u64(2024);
    for _ in 0..8 {
        let board = Configuration::random(3, &mut rng).unwrap();
        if !is_solvable(&board) {
            assert!(!run(Algorithm::BestFirst, &board, 0).success);
            continue;
        }
        let optimal = assert_valid_solution(&run(Algorithm::BestFirst, &board, 0), &board);
        let deepening = run(Algorithm::IterativeDeepening, &board, 0);
        assert_eq!(assert_valid_solution(&deepening, &board), optimal);
        for algorithm in &ALL_ALGORITHMS[2..] {
            let weighted = run(*algorithm, &board, 0);
            assert!(assert_valid_solution(&weighted, &board) >= optimal);
        }
    }
}

#[test]
fn scrambled_two_by_two_boards() {
    let mut rng = SmallRng::seed_from_u64(5);
    for moves in 0..12 {
        let board = Configuration::scrambled(2, moves, &mut rng).unwrap();
        for algorithm in ALL_ALGORITHMS {
            let result = run(algorithm, &board, moves as u64);
            let length = assert_valid_solution(&result, &board);
            if algorithm.is_optimal() {
                assert!(length <= moves);
            }
        }
    }
}

#[test]
fn dynamic_weighting_honours_max_depth_override() {
    let board = Configuration::from_grid([[2, 3, 5], [1, 4, 0], [7, 8, 6]]).unwrap();
    let options =
        SolverOptions::new(3, Algorithm::weighted(Weighting::Dynamic)).seed(4).max_depth(1);
    let result = Solver::new(options).unwrap().solve(&board).unwrap();
    assert!(assert_valid_solution(&result, &board) >= 17);
}

#[test]
fn malformed_boards_are_rejected_before_search() {
    assert!(matches!(
        Configuration::new(&[1, 2, 3, 4]),
        Err(PuzzleError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Configuration::parse("0 1\n1 3"),
        Err(PuzzleError::InvalidConfiguration(_))
    ));

    let mut solver = Solver::new(SolverOptions::new(3, Algorithm::BestFirst)).unwrap();
    let board = Configuration::goal(4).unwrap();
    assert!(matches!(
        solver.solve(&board),
        Err(PuzzleError::InvalidConfiguration(_))
    ));
}

#[test]
fn solvers_run_independently_on_threads() {
    let board = Configuration::from_grid([[6, 8, 7], [0, 1, 2], [3, 4, 5]]).unwrap();
    let board = &board;
    let moves: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = [Algorithm::BestFirst, Algorithm::IterativeDeepening]
            .into_iter()
            .map(|algorithm| scope.spawn(move || run(algorithm, board, 6).moves()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(moves, vec![21, 21]);
}
