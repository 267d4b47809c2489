use anyhow::{Result, anyhow};
use tile_puzzle_solver::{
    Algorithm, Configuration, SolveResult, Solver, SolverOptions, action::format_actions,
};

use std::{
    io::{IsTerminal, Write, stderr},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

pub fn do_solve(board: Configuration, options: SolverOptions, states: bool) -> Result<()> {
    println!("{}\n", board.pretty_print());
    let algorithm = options.algorithm;
    let mut solver = Solver::new(options)?;
    let result = with_spinner(&format!("Solving with {algorithm}..."), || {
        solver.solve(&board)
    })?;

    if !result.success {
        println!("✗ The board is not solvable.");
        return Ok(());
    }

    println!(
        "✓ Solved the board. Steps: {}, Iterations: {}, Elapsed: {}\n",
        result.moves(),
        result.iterations,
        format_elapsed(result.elapsed)
    );
    print!("{}", format_actions(&result.actions()));
    if states && let Some(path) = &result.path {
        for (i, state) in path.iter().enumerate() {
            println!("\n#{i}\n{}", state.pretty_print());
        }
    }
    Ok(())
}

pub fn do_compare(board: Configuration, options: Vec<SolverOptions>) -> Result<()> {
    println!("{}\n", board.pretty_print());
    let board = &board;
    let results = with_spinner("Running solvers...", || {
        std::thread::scope(|scope| {
            let handles: Vec<_> = options
                .into_iter()
                .map(|options| {
                    let algorithm = options.algorithm;
                    let handle = scope.spawn(move || {
                        Solver::new(options).and_then(|mut solver| solver.solve(board))
                    });
                    (algorithm, handle)
                })
                .collect();
            handles
                .into_iter()
                .map(|(algorithm, handle)| -> Result<(Algorithm, SolveResult)> {
                    let result = handle
                        .join()
                        .map_err(|_| anyhow!("{algorithm} solver panicked"))??;
                    Ok((algorithm, result))
                })
                .collect::<Result<Vec<_>>>()
        })
    })?;

    println!(
        "{:<12} {:>6} {:>12} {:>10}",
        "Algorithm", "Steps", "Iterations", "Elapsed"
    );
    for (algorithm, result) in results {
        let steps = if result.success {
            result.moves().to_string()
        } else {
            "-".to_string()
        };
        println!(
            "{:<12} {steps:>6} {:>12} {:>10}",
            algorithm.to_string(),
            result.iterations,
            format_elapsed(result.elapsed)
        );
    }
    Ok(())
}

fn with_spinner<T, F: FnOnce() -> T>(message: &str, f: F) -> T {
    if stderr().is_terminal() {
        let spinning = Arc::new(AtomicBool::new(true));
        let spinning_clone = Arc::clone(&spinning);
        let message = message.to_string();
        let started = Instant::now();

        let handle = std::thread::spawn(move || {
            let spinner_chars = ['|', '/', '-', '\\'];
            let mut i = 0;
            let stderr = stderr();
            let mut handle = stderr.lock();

            let _ = write!(handle, "\x1b[?25l"); // hide cursor
            let _ = handle.flush();

            while spinning_clone.load(Ordering::Relaxed) {
                let spinner_char = spinner_chars[i % spinner_chars.len()];
                let secs = started.elapsed().as_secs();
                let _ = write!(handle, "\r{spinner_char} {message} {secs}s");
                let _ = handle.flush();
                std::thread::sleep(Duration::from_millis(100));
                i += 1;
            }

            let _ = write!(handle, "\r\x1b[2K\r\x1b[?25h"); // clear line and show cursor
            let _ = handle.flush();
        });

        let result = f();
        spinning.store(false, Ordering::Relaxed);
        let _ = handle.join();
        result
    } else {
        f()
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 90 {
        let ms = elapsed.subsec_millis();
        format!("{secs}.{ms:03}s")
    } else {
        let minutes = secs / 60;
        let secs = secs % 60;
        format!("{minutes}m {secs}s")
    }
}
