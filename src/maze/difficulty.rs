// src/maze/difficulty.rs

use log::{debug, info, warn};
use rand::Rng;

use crate::error::{MazeError, MazeResult};
use crate::maze::generator::OriginShiftGenerator;
use crate::maze::grid::{Grid, Position};
use crate::maze::solver::{solve, Solution};
use crate::maze::Orientation;

/// Counts the steps where the path changes between horizontal and vertical.
pub fn count_bends(path: &[Position]) -> usize {
    let orientations: Vec<Orientation> = path
        .windows(2)
        .map(|pair| Orientation::of_step(pair[0], pair[1]))
        .collect();
    orientations.windows(2).filter(|o| o[0] != o[1]).count()
}

/// Bends along `path` normalised by the total cell count `dimension²`.
pub fn bend_ratio(path: &[Position], dimension: usize) -> f64 {
    let cells = dimension * dimension;
    if cells == 0 {
        return 0.0;
    }
    count_bends(path) as f64 / cells as f64
}

/// Upper bound of [`bend_ratio`] for the entrance-to-exit path of an N×N
/// grid.
///
/// The two corners share a chessboard colour, so the path visits an odd
/// number of cells: at most N² for odd N and N² - 1 for even N. Interior
/// cells are the only places a bend can happen.
pub fn max_bend_ratio(dimension: usize) -> f64 {
    if dimension < 2 {
        return 0.0;
    }
    let cells = dimension * dimension;
    let longest_path = if dimension % 2 == 1 { cells } else { cells - 1 };
    (longest_path - 2) as f64 / cells as f64
}

/// Rejects a difficulty threshold that no N×N maze can meet.
///
/// A threshold of exactly zero is always accepted, even for a single cell.
pub fn check_difficulty(threshold: f64, dimension: usize) -> MazeResult<f64> {
    if !threshold.is_finite()
        || !(0.0..1.0).contains(&threshold)
        || (threshold > 0.0 && threshold > max_bend_ratio(dimension))
    {
        return Err(MazeError::InvalidDifficulty(threshold));
    }
    Ok(threshold)
}

/// The accepted maze together with how it was obtained.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub grid: Grid,
    /// Generation attempts taken, the accepted one included.
    pub attempts: u64,
    pub bend_ratio: f64,
    pub bends: usize,
    /// `None` only if the accepted grid could not be solved.
    pub solution: Option<Solution>,
}

/// Regenerates mazes from scratch until the solution's bend ratio meets a
/// threshold.
///
/// Without a cap the loop is unbounded, and a threshold above
/// [`max_bend_ratio`] never terminates. Set [`with_max_attempts`] wherever
/// latency matters.
///
/// [`with_max_attempts`]: DifficultyController::with_max_attempts
#[derive(Debug, Clone)]
pub struct DifficultyController {
    threshold: f64,
    max_attempts: Option<u64>,
    generator: OriginShiftGenerator,
}

impl DifficultyController {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            max_attempts: None,
            generator: OriginShiftGenerator::default(),
        }
    }

    /// Rejects thresholds that cannot be met for `dimension`.
    pub fn strict(threshold: f64, dimension: usize) -> MazeResult<Self> {
        check_difficulty(threshold, dimension).map(Self::new)
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u64>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_generator(mut self, generator: OriginShiftGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Runs the retry loop for an N×N maze.
    pub fn run<R: Rng + ?Sized>(&self, dimension: usize, rng: &mut R) -> MazeResult<GenerationReport> {
        let mut attempts = 0u64;
        let mut best_ratio = 0.0f64;

        loop {
            if let Some(cap) = self.max_attempts {
                if attempts >= cap {
                    warn!(
                        "giving up on difficulty {} for {}x{} after {} attempts (best {:.4})",
                        self.threshold, dimension, dimension, attempts, best_ratio
                    );
                    return Err(MazeError::NonConvergentDifficulty {
                        threshold: self.threshold,
                        attempts,
                        best_ratio,
                    });
                }
            }
            attempts += 1;

            let grid = self.generator.generate(dimension, rng)?;
            let solution = match solve(&grid) {
                Ok(solution) => Some(solution),
                Err(MazeError::NoSolutionFound { .. }) => {
                    warn!("attempt {} produced an unsolvable {}x{} grid", attempts, dimension, dimension);
                    None
                }
                Err(err) => return Err(err),
            };

            let (bends, ratio) = match &solution {
                Some(s) => (s.bends(), bend_ratio(s.path(), dimension)),
                None => (0, 0.0),
            };
            best_ratio = best_ratio.max(ratio);
            debug!("attempt {}: {} bends, ratio {:.4}", attempts, bends, ratio);

            if ratio >= self.threshold {
                info!(
                    "accepted {}x{} maze after {} attempt(s): {} bends, ratio {:.4} >= {}",
                    dimension, dimension, attempts, bends, ratio, self.threshold
                );
                return Ok(GenerationReport {
                    grid,
                    attempts,
                    bend_ratio: ratio,
                    bends,
                    solution,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::generator::Backtrack;
    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn path(cells: &[(usize, usize)]) -> Vec<Position> {
        cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn test_count_bends() {
        assert_eq!(count_bends(&[]), 0);
        assert_eq!(count_bends(&path(&[(0, 0)])), 0);
        assert_eq!(count_bends(&path(&[(0, 0), (0, 1), (0, 2)])), 0);
        assert_eq!(count_bends(&path(&[(0, 0), (0, 1), (1, 1)])), 1);
        assert_eq!(count_bends(&path(&[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)])), 3);
    }

    #[test]
    fn test_bend_ratio_normalises_by_cell_count() {
        let staircase = path(&[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)]);
        assert_approx_eq!(bend_ratio(&staircase, 3), 3.0 / 9.0);
        assert_approx_eq!(bend_ratio(&path(&[(0, 0)]), 1), 0.0);
    }

    #[test]
    fn test_max_bend_ratio() {
        assert_approx_eq!(max_bend_ratio(1), 0.0);
        assert_approx_eq!(max_bend_ratio(2), 0.25);
        assert_approx_eq!(max_bend_ratio(3), 7.0 / 9.0);
        assert_approx_eq!(max_bend_ratio(10), 0.97);
    }

    #[test]
    fn test_two_by_two_paths_reach_the_bound() {
        // Both 2x2 spanning-tree solutions are an L of three cells.
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let report = DifficultyController::new(0.0).run(2, &mut rng).unwrap();
            assert_eq!(report.bends, 1);
            assert_approx_eq!(report.bend_ratio, max_bend_ratio(2));
        }
    }

    #[test]
    fn test_bend_ratio_bounds_on_generated_mazes() {
        let mut rng = StdRng::seed_from_u64(11);
        let controller = DifficultyController::new(0.0);
        for dimension in 2..=10 {
            let report = controller.run(dimension, &mut rng).unwrap();
            assert!(report.bend_ratio >= 0.0 && report.bend_ratio < 1.0);
            assert!(report.bend_ratio <= max_bend_ratio(dimension));
        }
    }

    #[test]
    fn test_zero_threshold_accepts_first_attempt() {
        let mut rng = StdRng::seed_from_u64(3);
        let report = DifficultyController::new(0.0).run(8, &mut rng).unwrap();
        assert_eq!(report.attempts, 1);
        assert!(report.grid.is_perfect());
        assert!(report.solution.is_some());
    }

    #[test]
    fn test_single_cell_report() {
        let mut rng = StdRng::seed_from_u64(0);
        let report = DifficultyController::new(0.0).run(1, &mut rng).unwrap();
        assert_eq!(report.attempts, 1);
        assert_eq!(report.bends, 0);
        assert_approx_eq!(report.bend_ratio, 0.0);
    }

    #[test]
    fn test_threshold_is_met() {
        let mut rng = StdRng::seed_from_u64(17);
        let report = DifficultyController::new(0.1)
            .with_max_attempts(Some(10_000))
            .run(10, &mut rng)
            .unwrap();
        assert!(report.bend_ratio >= 0.1);
        let solution = report.solution.expect("accepted maze is solvable");
        assert_eq!(solution.bends(), report.bends);
    }

    #[test]
    fn test_unreachable_threshold_hits_cap() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = DifficultyController::new(0.99)
            .with_max_attempts(Some(5))
            .with_generator(OriginShiftGenerator::new(Backtrack::Frontier))
            .run(4, &mut rng);
        match result {
            Err(MazeError::NonConvergentDifficulty { attempts, best_ratio, .. }) => {
                assert_eq!(attempts, 5);
                assert!(best_ratio < 0.99);
            }
            other => panic!("expected NonConvergentDifficulty, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_rejects_impossible_thresholds() {
        assert!(DifficultyController::strict(0.3, 10).is_ok());
        assert!(DifficultyController::strict(0.0, 1).is_ok());
        assert!(matches!(
            DifficultyController::strict(1.0, 10),
            Err(MazeError::InvalidDifficulty(_))
        ));
        assert!(DifficultyController::strict(-0.1, 10).is_err());
        assert!(DifficultyController::strict(f64::NAN, 10).is_err());
        assert!(DifficultyController::strict(0.6, 2).is_err());
        assert!(matches!(
            DifficultyController::strict(0.3, 2),
            Err(MazeError::InvalidDifficulty(_))
        ));
        assert!(DifficultyController::strict(0.25, 2).is_ok());
        assert!(DifficultyController::strict(0.98, 10).is_err());
        assert!(DifficultyController::strict(0.1, 1).is_err());
    }
}
